pub mod config;
pub mod endpoint;
pub mod error;
pub mod mode;
pub mod outcome;
pub mod protocol;

pub use config::AppConfig;
pub use endpoint::{Endpoint, DEFAULT_ENDPOINT};
pub use error::{DomainError, TransportError, ValidationError};
pub use mode::{Mode, ModeProfile, ModeState};
pub use outcome::Outcome;
pub use protocol::HostStatus;
