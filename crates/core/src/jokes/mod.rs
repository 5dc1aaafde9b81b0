mod canned;

use futures::future::BoxFuture;

pub use canned::CannedJokes;

#[derive(thiserror::Error, Debug)]
pub enum JokeError {
    #[error("no jokes available")]
    NoJokesAvailable,
}

pub trait JokeSource: Send + Sync {
    fn next_joke(&self) -> BoxFuture<'_, Result<String, JokeError>>;
}
