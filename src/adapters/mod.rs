pub mod config_store;
pub mod http_transport;
pub mod line_source;

pub use config_store::TomlConfigStore;
pub use http_transport::ReqwestTransport;
pub use line_source::LineTextSource;
