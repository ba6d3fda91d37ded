use std::sync::Arc;

use tracing::{debug, info};

use crate::app::Dispatcher;
use crate::domain::{ModeState, Outcome};
use crate::ports::TextSource;

/// Entry point for recognized speech.
///
/// Submitting text behaves exactly like pressing send with that text in the
/// input field: the current mode picks the dispatcher operation.
pub struct VoiceBridge {
    mode: Arc<ModeState>,
    dispatcher: Arc<Dispatcher>,
}

impl VoiceBridge {
    pub fn new(mode: Arc<ModeState>, dispatcher: Arc<Dispatcher>) -> Self {
        Self { mode, dispatcher }
    }

    /// Dispatch `text` under the current mode. Blank text sends nothing.
    pub async fn submit(&self, text: &str) -> Option<Outcome> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring blank voice input");
            return None;
        }

        let mode = self.mode.current();
        info!(mode = %mode, chars = text.chars().count(), "Voice input received");
        Some(self.dispatcher.dispatch(mode, text).await)
    }

    /// Wait for one utterance from `source` and submit it.
    ///
    /// Returns `None` when the source is cancelled or produces nothing.
    pub async fn listen(&self, source: &dyn TextSource) -> Option<Outcome> {
        let prompt = self.mode.current().profile().voice_prompt;
        let text = source.next_text(prompt).await?;
        self.submit(&text).await
    }
}
