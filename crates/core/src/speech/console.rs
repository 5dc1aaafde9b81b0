use crate::speech::{SpeechError, SpeechSynthesizer};
use futures::future::BoxFuture;
use futures::FutureExt;

/// No-engine fallback: writes the text to stdout instead of speaking it.
#[derive(Clone, Debug)]
pub struct ConsoleSpeech;

impl ConsoleSpeech {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleSpeech {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechSynthesizer for ConsoleSpeech {
    fn speak(&self, text: String) -> BoxFuture<'_, Result<(), SpeechError>> {
        async move {
            println!("[tts] {text}");
            Ok(())
        }
        .boxed()
    }
}
