mod console;

use futures::future::BoxFuture;

pub use console::ConsoleSpeech;

#[derive(thiserror::Error, Debug)]
pub enum SpeechError {
    #[error("speech engine unavailable: {details}")]
    EngineUnavailable { details: String },
}

pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, text: String) -> BoxFuture<'_, Result<(), SpeechError>>;
}
