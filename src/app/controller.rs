use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::{ReqwestTransport, TomlConfigStore};
use crate::app::{ConnectivityMonitor, Dispatcher, Settings, VoiceBridge};
use crate::domain::{DomainError, Endpoint, HostStatus, Mode, ModeState, Outcome};
use crate::infrastructure::init_logging;
use crate::ports::{ConfigStore, TextSource, Transport};

/// Startup overrides supplied by the hosting layer.
#[derive(Debug, Clone, Default)]
pub struct ControllerOptions {
    /// Use this directory instead of the OS application data directory.
    pub data_dir: Option<PathBuf>,
    /// Overrides the configured log level.
    pub log_level: Option<String>,
    pub mode: Mode,
}

/// Result of pointing the client at a new host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointChange {
    pub endpoint: Endpoint,
    pub reachable: bool,
}

/// Application controller that owns the core components and wires user
/// actions to them, the way a UI screen would.
pub struct AppController {
    settings: Settings,
    mode: Arc<ModeState>,
    transport: Arc<dyn Transport>,
    dispatcher: Arc<Dispatcher>,
    monitor: ConnectivityMonitor,
    voice: VoiceBridge,
    _log_guard: Option<WorkerGuard>,
}

impl AppController {
    /// Initialize the application controller.
    /// This sets up configuration, logging and the transport.
    pub fn new(options: ControllerOptions) -> Result<Self, DomainError> {
        // Step 1: Initialize config store
        let store = match options.data_dir {
            Some(dir) => TomlConfigStore::at(dir)?,
            None => TomlConfigStore::new()?,
        };
        let store: Arc<dyn ConfigStore> = Arc::new(store);

        // Step 2: Load configuration
        let settings = Settings::load(store.clone());
        let config = settings.config();

        // Step 3: Initialize logging
        let level = options
            .log_level
            .clone()
            .unwrap_or_else(|| config.logging.level.clone());
        let log_guard = init_logging(&store.logs_dir(), &level, config.logging.file_logging)?;

        info!("Jarvis Mobile starting up");

        // Step 4: Build the transport for the stored endpoint
        let transport = Arc::new(ReqwestTransport::from_config(settings.get(), &config.remote)?);

        let mut controller = Self::with_transport(settings, transport, options.mode);
        controller._log_guard = log_guard;

        info!(
            endpoint = %controller.endpoint(),
            mode = %controller.mode(),
            "AppController initialized"
        );

        Ok(controller)
    }

    /// Assemble a controller from already constructed parts.
    pub fn with_transport(settings: Settings, transport: Arc<dyn Transport>, mode: Mode) -> Self {
        transport.set_endpoint(settings.get());

        let mode = Arc::new(ModeState::new(mode));
        let dispatcher = Arc::new(Dispatcher::new(transport.clone()));
        let monitor = ConnectivityMonitor::new(transport.clone());
        let voice = VoiceBridge::new(mode.clone(), dispatcher.clone());

        Self {
            settings,
            mode,
            transport,
            dispatcher,
            monitor,
            voice,
            _log_guard: None,
        }
    }

    /// Send `text` the way the current mode dictates.
    ///
    /// Returns `None` without contacting the host when `text` is blank.
    pub async fn send(&self, text: &str) -> Option<Outcome> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(self.dispatcher.dispatch(self.mode.current(), text).await)
    }

    pub async fn send_command(&self, text: &str) -> Option<Outcome> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(self.dispatcher.send_command(text).await)
    }

    pub async fn send_type_text(&self, text: &str) -> Option<Outcome> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(self.dispatcher.send_type_text(text).await)
    }

    pub async fn ask(&self, message: &str) -> Option<Outcome> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }
        Some(self.dispatcher.ask(message).await)
    }

    /// Take one utterance from `source` and dispatch it.
    pub async fn listen(&self, source: &dyn TextSource) -> Option<Outcome> {
        self.voice.listen(source).await
    }

    pub fn mode(&self) -> Mode {
        self.mode.current()
    }

    pub fn toggle_mode(&self) -> Mode {
        let mode = self.mode.toggle();
        info!(mode = %mode, "Mode toggled");
        mode
    }

    pub fn endpoint(&self) -> Endpoint {
        self.settings.get()
    }

    /// Persist a new endpoint, retarget the transport and re-check the host.
    pub async fn set_endpoint(&self, url: &str) -> Result<EndpointChange, DomainError> {
        let endpoint = self.settings.set(url)?;
        self.transport.set_endpoint(endpoint.clone());
        let reachable = self.monitor.check_status().await;
        Ok(EndpointChange {
            endpoint,
            reachable,
        })
    }

    /// Reachability check run whenever the client comes to the foreground.
    pub async fn resume(&self) -> bool {
        self.monitor.check_status().await
    }

    /// Host details, when the host is reachable and answers sensibly.
    pub async fn host_status(&self) -> Option<HostStatus> {
        self.monitor.probe().await
    }

    /// Get the application data directory.
    pub fn data_dir(&self) -> String {
        self.settings.store().data_dir().to_string_lossy().to_string()
    }

    /// Get the config file path.
    pub fn config_path(&self) -> String {
        self.settings.store().config_path().to_string_lossy().to_string()
    }

    /// Get the logs directory path.
    pub fn logs_dir(&self) -> String {
        self.settings.store().logs_dir().to_string_lossy().to_string()
    }
}
