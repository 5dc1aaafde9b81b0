mod demo;

use crate::capture::Frame;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use demo::DemoClassifier;

/// Closed set of emotion categories the classifier can emit for one frame.
/// The string forms match the classifier vocabulary.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Neutral,
    Happy,
    Sad,
    Angry,
    #[serde(rename = "surprise")]
    Surprised,
    #[serde(rename = "fear")]
    Fearful,
    #[serde(rename = "disgust")]
    Disgusted,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Neutral,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprised,
        Emotion::Fearful,
        Emotion::Disgusted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Neutral => "neutral",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Surprised => "surprise",
            Emotion::Fearful => "fear",
            Emotion::Disgusted => "disgust",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = ClassifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Emotion::ALL
            .iter()
            .copied()
            .find(|e| e.as_str() == lower)
            .ok_or(ClassifyError::UnknownLabel(s.to_owned()))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ClassifyError {
    #[error("emotion model unavailable: {details}")]
    ModelUnavailable { details: String },
    #[error("inference failed: {details}")]
    InferenceFailed { details: String },
    #[error("unknown emotion label: {0}")]
    UnknownLabel(String),
}

pub trait EmotionClassifier: Send + Sync {
    fn classify(&self, frame: Frame) -> BoxFuture<'_, Result<Emotion, ClassifyError>>;
}
