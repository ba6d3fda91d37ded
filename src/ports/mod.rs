pub mod config;
pub mod http;
pub mod speech;

pub use config::ConfigStore;
pub use http::{Method, Transport};
pub use speech::TextSource;
