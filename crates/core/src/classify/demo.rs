use crate::capture::Frame;
use crate::classify::{ClassifyError, Emotion, EmotionClassifier};
use futures::future::BoxFuture;
use futures::FutureExt;
use rand::seq::IndexedRandom;

/// Demo stand-in for the real facial model: picks a uniformly random label
/// per frame. Useful for exercising the smoothing path without a camera or a
/// model on disk.
#[derive(Clone, Debug)]
pub struct DemoClassifier;

impl DemoClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DemoClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl EmotionClassifier for DemoClassifier {
    fn classify(&self, _frame: Frame) -> BoxFuture<'_, Result<Emotion, ClassifyError>> {
        async move {
            let label = Emotion::ALL
                .choose(&mut rand::rng())
                .copied()
                .unwrap_or(Emotion::Neutral);
            Ok(label)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::time::SystemTime;

    fn frame() -> Frame {
        Frame {
            sequence: 1,
            captured_at: SystemTime::now(),
            width: 2,
            height: 2,
            data: Bytes::from_static(&[0u8; 12]),
        }
    }

    #[tokio::test]
    async fn always_produces_a_known_label() {
        let classifier = DemoClassifier::new();
        for _ in 0..32 {
            let label = classifier.classify(frame()).await.unwrap();
            assert!(Emotion::ALL.contains(&label));
        }
    }
}
