use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::ports::TextSource;

/// Text source fed one utterance per line.
///
/// Stands in for an external recognizer that writes its transcripts to a
/// pipe. End of input and read errors yield `None`.
pub struct LineTextSource<R> {
    reader: Mutex<R>,
    echo_prompt: bool,
}

impl LineTextSource<BufReader<Stdin>> {
    /// Read utterances from standard input, printing prompts to stderr.
    pub fn stdin() -> Self {
        Self {
            reader: Mutex::new(BufReader::new(tokio::io::stdin())),
            echo_prompt: true,
        }
    }
}

impl<R> LineTextSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(reader),
            echo_prompt: false,
        }
    }
}

#[async_trait]
impl<R> TextSource for LineTextSource<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_text(&self, prompt: &str) -> Option<String> {
        if self.echo_prompt {
            eprintln!("{}", prompt);
        }

        let mut line = String::new();
        let mut reader = self.reader.lock().await;
        match reader.read_line(&mut line).await {
            Ok(0) => {
                debug!("Text source reached end of input");
                None
            }
            Ok(_) => {
                let text = line.trim();
                if text.is_empty() {
                    debug!("Text source produced an empty utterance");
                    None
                } else {
                    Some(text.to_string())
                }
            }
            Err(e) => {
                warn!(error = %e, "Text source read failed");
                None
            }
        }
    }
}
