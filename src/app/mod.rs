pub mod controller;
pub mod dispatcher;
pub mod monitor;
pub mod settings;
pub mod voice;

pub use controller::{AppController, ControllerOptions, EndpointChange};
pub use dispatcher::{Dispatcher, UNREACHABLE_MESSAGE};
pub use monitor::ConnectivityMonitor;
pub use settings::Settings;
pub use voice::VoiceBridge;
