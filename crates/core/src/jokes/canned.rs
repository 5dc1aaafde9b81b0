use crate::jokes::{JokeError, JokeSource};
use futures::future::BoxFuture;
use futures::FutureExt;
use rand::seq::IndexedRandom;
use std::sync::Arc;

const FALLBACK_JOKES: [&str; 3] = [
    "Why don't scientists trust atoms? Because they make up everything!",
    "I told my computer I needed a break, and it said: 'No problem, I'll go to sleep.'",
    "Why did the scarecrow win an award? Because he was outstanding in his field!",
];

/// Offline joke source backed by a small built-in list; stands in when no
/// external joke service is wired up.
#[derive(Clone, Debug)]
pub struct CannedJokes {
    jokes: Arc<Vec<String>>,
}

impl CannedJokes {
    pub fn new() -> Self {
        Self {
            jokes: Arc::new(FALLBACK_JOKES.iter().map(|j| (*j).to_owned()).collect()),
        }
    }

    pub fn with_jokes(jokes: Vec<String>) -> Self {
        Self {
            jokes: Arc::new(jokes),
        }
    }
}

impl Default for CannedJokes {
    fn default() -> Self {
        Self::new()
    }
}

impl JokeSource for CannedJokes {
    fn next_joke(&self) -> BoxFuture<'_, Result<String, JokeError>> {
        async move {
            self.jokes
                .choose(&mut rand::rng())
                .cloned()
                .ok_or(JokeError::NoJokesAvailable)
        }
        .boxed()
    }
}
