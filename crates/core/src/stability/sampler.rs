use crate::capture::FrameSource;
use crate::classify::EmotionClassifier;
use crate::config::OnClassifierFailure;
use crate::stability::StabilityTracker;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Background sampling loop: once per `interval`, pull a frame, classify it,
/// feed the tracker. Runs until the tracker's stop flag is raised; the flag
/// is checked every tick, so stopping takes effect within one period.
///
/// Degraded ticks never escape the loop: a missing frame or a failed
/// classification is logged and either skipped or replaced by the configured
/// fallback label. Pause is checked before the frame pull so no inference
/// work happens while paused.
pub async fn run_sampling_loop<S, C>(
    source: S,
    classifier: C,
    tracker: StabilityTracker,
    interval: Duration,
    on_failure: OnClassifierFailure,
) where
    S: FrameSource,
    C: EmotionClassifier,
{
    let mut ticks = tokio::time::interval(interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::debug!(interval_ms = interval.as_millis() as u64, "sampling loop started");

    loop {
        ticks.tick().await;
        if tracker.is_stopped() {
            tracing::debug!("sampling loop stopping");
            break;
        }
        if tracker.is_paused() {
            continue;
        }

        let frame = match source.next_frame().await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                tracing::debug!("no frame ready, skipping tick");
                continue;
            }
            Err(e) => {
                tracing::warn!(error = %e, "frame capture failed, skipping tick");
                continue;
            }
        };

        match classifier.classify(frame).await {
            Ok(label) => tracker.record(label),
            Err(e) => match on_failure {
                OnClassifierFailure::SkipTick => {
                    tracing::warn!(error = %e, "classification failed, skipping tick");
                }
                OnClassifierFailure::RecordFallback(label) => {
                    tracing::warn!(error = %e, fallback = %label, "classification failed, recording fallback");
                    tracker.record(label);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CaptureError, Frame, FrameSource};
    use crate::classify::{ClassifyError, Emotion, EmotionClassifier};
    use bytes::Bytes;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::SystemTime;

    const TICK: Duration = Duration::from_millis(100);

    fn frame(sequence: u64) -> Frame {
        Frame {
            sequence,
            captured_at: SystemTime::now(),
            width: 2,
            height: 2,
            data: Bytes::from_static(&[0u8; 12]),
        }
    }

    #[derive(Clone)]
    struct AlwaysReadySource {
        pulls: Arc<AtomicUsize>,
    }

    impl AlwaysReadySource {
        fn new() -> Self {
            Self {
                pulls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl FrameSource for AlwaysReadySource {
        fn next_frame(&self) -> BoxFuture<'_, Result<Option<Frame>, CaptureError>> {
            async move {
                let n = self.pulls.fetch_add(1, Ordering::Relaxed) as u64;
                Ok(Some(frame(n)))
            }
            .boxed()
        }
    }

    #[derive(Clone)]
    struct NeverReadySource;

    impl FrameSource for NeverReadySource {
        fn next_frame(&self) -> BoxFuture<'_, Result<Option<Frame>, CaptureError>> {
            async move { Ok(None) }.boxed()
        }
    }

    #[derive(Clone)]
    struct ConstClassifier {
        label: Emotion,
        calls: Arc<AtomicUsize>,
    }

    impl ConstClassifier {
        fn new(label: Emotion) -> Self {
            Self {
                label,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl EmotionClassifier for ConstClassifier {
        fn classify(&self, _frame: Frame) -> BoxFuture<'_, Result<Emotion, ClassifyError>> {
            async move {
                self.calls.fetch_add(1, Ordering::Relaxed);
                Ok(self.label)
            }
            .boxed()
        }
    }

    #[derive(Clone)]
    struct FailingClassifier;

    impl EmotionClassifier for FailingClassifier {
        fn classify(&self, _frame: Frame) -> BoxFuture<'_, Result<Emotion, ClassifyError>> {
            async move {
                Err(ClassifyError::InferenceFailed {
                    details: "model blew up".to_owned(),
                })
            }
            .boxed()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn steady_labels_reach_a_verdict() {
        let tracker = StabilityTracker::new(7, 3);
        let task = tokio::spawn(run_sampling_loop(
            AlwaysReadySource::new(),
            ConstClassifier::new(Emotion::Happy),
            tracker.clone(),
            TICK,
            OnClassifierFailure::SkipTick,
        ));

        tokio::time::sleep(TICK * 4).await;
        assert_eq!(tracker.current_verdict(), Some(Emotion::Happy));

        tracker.stop();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn paused_tracker_gets_no_records_and_no_inference() {
        let tracker = StabilityTracker::new(7, 3);
        tracker.pause();
        let classifier = ConstClassifier::new(Emotion::Sad);
        let calls = classifier.calls.clone();
        let task = tokio::spawn(run_sampling_loop(
            AlwaysReadySource::new(),
            classifier,
            tracker.clone(),
            TICK,
            OnClassifierFailure::SkipTick,
        ));

        tokio::time::sleep(TICK * 5).await;
        assert_eq!(tracker.history_len(), 0);
        assert_eq!(calls.load(Ordering::Relaxed), 0);

        tracker.stop();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn missing_frames_skip_the_tick() {
        let tracker = StabilityTracker::new(7, 3);
        let task = tokio::spawn(run_sampling_loop(
            NeverReadySource,
            ConstClassifier::new(Emotion::Happy),
            tracker.clone(),
            TICK,
            OnClassifierFailure::SkipTick,
        ));

        tokio::time::sleep(TICK * 5).await;
        assert_eq!(tracker.history_len(), 0);
        assert_eq!(tracker.current_verdict(), None);

        tracker.stop();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn classifier_failure_skips_by_default() {
        let tracker = StabilityTracker::new(7, 3);
        let task = tokio::spawn(run_sampling_loop(
            AlwaysReadySource::new(),
            FailingClassifier,
            tracker.clone(),
            TICK,
            OnClassifierFailure::SkipTick,
        ));

        tokio::time::sleep(TICK * 5).await;
        assert_eq!(tracker.history_len(), 0);

        tracker.stop();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn classifier_failure_can_record_a_fallback_label() {
        let tracker = StabilityTracker::new(7, 3);
        let task = tokio::spawn(run_sampling_loop(
            AlwaysReadySource::new(),
            FailingClassifier,
            tracker.clone(),
            TICK,
            OnClassifierFailure::RecordFallback(Emotion::Neutral),
        ));

        tokio::time::sleep(TICK * 4).await;
        assert_eq!(tracker.current_verdict(), Some(Emotion::Neutral));

        tracker.stop();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_observed_within_one_period() {
        let tracker = StabilityTracker::new(7, 3);
        let task = tokio::spawn(run_sampling_loop(
            AlwaysReadySource::new(),
            ConstClassifier::new(Emotion::Happy),
            tracker.clone(),
            TICK,
            OnClassifierFailure::SkipTick,
        ));

        tokio::time::sleep(TICK * 2).await;
        tracker.stop();
        let joined = tokio::time::timeout(TICK * 2, task).await;
        assert!(joined.is_ok(), "sampler should exit within a period of stop()");

        let len_at_stop = tracker.history_len();
        tokio::time::sleep(TICK * 3).await;
        assert_eq!(tracker.history_len(), len_at_stop);
    }
}
