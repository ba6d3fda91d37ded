use thiserror::Error;

/// Application-level errors for Jarvis Mobile.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Rejected endpoint input. Never reaches the network layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Server address must not be blank")]
    Blank,

    #[error("Invalid server address '{input}': {reason}")]
    Invalid { input: String, reason: String },
}

/// Classified failure of a single request against the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection could not be established or the request timed out.
    #[error("Host unreachable: {0}")]
    Unreachable(String),

    /// The response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("{0}")]
    Unknown(String),
}

impl TransportError {
    /// Diagnostic text without the classification prefix.
    pub fn diagnostic(&self) -> &str {
        match self {
            TransportError::Unreachable(d)
            | TransportError::Malformed(d)
            | TransportError::Unknown(d) => d,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Unreachable(_) => "unreachable",
            TransportError::Malformed(_) => "malformed",
            TransportError::Unknown(_) => "unknown",
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for DomainError {
    fn from(err: toml::de::Error) -> Self {
        DomainError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DomainError {
    fn from(err: toml::ser::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}
