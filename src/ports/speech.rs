use async_trait::async_trait;

/// Producer of recognized text, such as a speech recognizer.
///
/// Yields at most one utterance per call. Cancellation, silence and
/// recognizer failures all surface as `None`.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Wait for the next utterance. `prompt` tells the user what to say.
    async fn next_text(&self, prompt: &str) -> Option<String>;
}
