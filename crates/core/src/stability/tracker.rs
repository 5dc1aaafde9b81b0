use crate::classify::Emotion;
use crate::config::DetectionConfig;
use crate::stability::LabelHistory;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TrackerState {
    Running,
    Paused,
}

#[derive(Debug)]
struct TrackerShared {
    history: LabelHistory,
    verdict: Option<Emotion>,
    state: TrackerState,
}

/// Debounced mood signal shared between the sampling loop (producer) and the
/// UI-side poller (consumer). Cheap to clone; clones share state.
///
/// History, verdict and running state live under one mutex; every public
/// operation is a short critical section with no external calls inside.
/// The stop flag is a separate one-way latch read by both loops.
#[derive(Clone, Debug)]
pub struct StabilityTracker {
    shared: Arc<Mutex<TrackerShared>>,
    stopped: Arc<AtomicBool>,
    stable_threshold: usize,
}

impl StabilityTracker {
    pub fn new(rolling_window: usize, stable_threshold: usize) -> Self {
        Self {
            shared: Arc::new(Mutex::new(TrackerShared {
                history: LabelHistory::new(rolling_window),
                verdict: None,
                state: TrackerState::Running,
            })),
            stopped: Arc::new(AtomicBool::new(false)),
            stable_threshold,
        }
    }

    pub fn from_config(cfg: &DetectionConfig) -> Self {
        Self::new(cfg.rolling_window, cfg.stable_threshold)
    }

    fn lock(&self) -> MutexGuard<'_, TrackerShared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Feeds one raw label. No-op while paused. The verdict is promoted when
    /// the window has a unique mode whose count reaches the threshold; it is
    /// never demoted back to `None` by a weakening mode, only replaced by a
    /// new winner or cleared by [`resume`](Self::resume).
    pub fn record(&self, label: Emotion) {
        let mut shared = self.lock();
        if shared.state == TrackerState::Paused {
            return;
        }
        shared.history.push(label);
        if let Some((mode, count)) = shared.history.mode() {
            if count >= self.stable_threshold {
                shared.verdict = Some(mode);
            }
        }
    }

    /// Current stable verdict, `None` until evidence accumulates. Safe to
    /// poll from the interactive path; the critical section copies one value.
    pub fn current_verdict(&self) -> Option<Emotion> {
        self.lock().verdict
    }

    /// Stops sampling from advancing the history. Idempotent. The history is
    /// kept as-is; only resume discards it.
    pub fn pause(&self) {
        self.lock().state = TrackerState::Paused;
    }

    /// Restarts detection from fresh evidence: clears the history and the
    /// verdict. Idempotent.
    pub fn resume(&self) {
        let mut shared = self.lock();
        shared.state = TrackerState::Running;
        shared.history.clear();
        shared.verdict = None;
    }

    /// Signals the owning loops to exit. Observed within one period.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }

    pub fn is_paused(&self) -> bool {
        self.lock().state == TrackerState::Paused
    }

    pub fn history_len(&self) -> usize {
        self.lock().history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Emotion::{Angry, Disgusted, Fearful, Happy, Neutral, Sad, Surprised};

    fn tracker() -> StabilityTracker {
        StabilityTracker::new(7, 3)
    }

    #[test]
    fn history_stays_within_window_for_any_sequence() {
        let t = tracker();
        for i in 0..100 {
            t.record(Emotion::ALL[i % Emotion::ALL.len()]);
            assert!(t.history_len() <= 7);
        }
    }

    #[test]
    fn repeated_label_reaching_threshold_becomes_verdict() {
        let t = tracker();
        t.record(Happy);
        t.record(Happy);
        assert_eq!(t.current_verdict(), None);
        t.record(Happy);
        assert_eq!(t.current_verdict(), Some(Happy));
    }

    #[test]
    fn two_records_below_threshold_yield_no_verdict() {
        let t = tracker();
        t.record(Angry);
        t.record(Angry);
        assert_eq!(t.current_verdict(), None);
    }

    #[test]
    fn mixed_sequence_promotes_then_holds_through_tie() {
        // window 7, threshold 3
        let t = tracker();
        for label in [Happy, Sad, Happy, Neutral, Happy] {
            t.record(label);
        }
        // happy count is 3 after the 5th record
        assert_eq!(t.current_verdict(), Some(Happy));

        t.record(Sad);
        t.record(Sad);
        // sad and happy are now tied at 3; a tied round elects no winner,
        // so the verdict stays at its prior value
        assert_eq!(t.current_verdict(), Some(Happy));
    }

    #[test]
    fn verdict_survives_mode_dropping_below_threshold() {
        let t = tracker();
        for _ in 0..3 {
            t.record(Sad);
        }
        assert_eq!(t.current_verdict(), Some(Sad));

        // flood the window with a spread that never reaches threshold
        for label in [Happy, Neutral, Angry, Surprised, Fearful, Disgusted, Happy] {
            t.record(label);
        }
        assert_eq!(t.current_verdict(), Some(Sad));
    }

    #[test]
    fn new_winner_replaces_old_verdict() {
        let t = tracker();
        for _ in 0..3 {
            t.record(Sad);
        }
        assert_eq!(t.current_verdict(), Some(Sad));
        for _ in 0..4 {
            t.record(Happy);
        }
        assert_eq!(t.current_verdict(), Some(Happy));
    }

    #[test]
    fn resume_clears_history_and_verdict() {
        let t = tracker();
        for _ in 0..3 {
            t.record(Sad);
        }
        assert_eq!(t.current_verdict(), Some(Sad));

        t.resume();
        assert_eq!(t.current_verdict(), None);
        assert_eq!(t.history_len(), 0);
    }

    #[test]
    fn records_while_paused_are_dropped() {
        let t = tracker();
        t.record(Happy);
        t.pause();
        for _ in 0..10 {
            t.record(Sad);
        }
        assert_eq!(t.history_len(), 1);
        assert_eq!(t.current_verdict(), None);
    }

    #[test]
    fn pause_does_not_clear_prior_verdict() {
        let t = tracker();
        for _ in 0..3 {
            t.record(Happy);
        }
        t.pause();
        assert_eq!(t.current_verdict(), Some(Happy));
    }

    #[test]
    fn pause_and_resume_are_idempotent() {
        let t = tracker();
        t.pause();
        t.pause();
        assert!(t.is_paused());

        t.resume();
        let after_first = (t.history_len(), t.current_verdict(), t.is_paused());
        t.resume();
        assert_eq!(
            (t.history_len(), t.current_verdict(), t.is_paused()),
            after_first
        );
    }

    #[test]
    fn single_record_after_resume_is_below_threshold() {
        let t = tracker();
        for _ in 0..3 {
            t.record(Sad);
        }
        assert_eq!(t.current_verdict(), Some(Sad));

        t.pause();
        t.resume();
        t.record(Happy);
        assert_eq!(t.current_verdict(), None);
    }

    #[test]
    fn stop_is_a_one_way_latch() {
        let t = tracker();
        assert!(!t.is_stopped());
        t.stop();
        assert!(t.is_stopped());
        let clone = t.clone();
        assert!(clone.is_stopped());
    }

    #[test]
    fn clones_share_state() {
        let t = tracker();
        let producer = t.clone();
        for _ in 0..3 {
            producer.record(Neutral);
        }
        assert_eq!(t.current_verdict(), Some(Neutral));
    }
}
