use crate::classify::Emotion;
use crate::react::Reaction;
use crate::speech::SpeechSynthesizer;
use crate::stability::StabilityTracker;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Decides when a verdict becomes a user-visible reaction. Pure state
/// machine; the caller supplies the clock so it can be tested directly.
///
/// A verdict passes only when it is present, differs from the last emitted
/// one, and the debounce interval has elapsed since the last emission.
/// Observing an absent verdict (the post-resume state) forgets the last
/// emitted mood, so a re-established mood may fire again.
#[derive(Debug)]
pub struct ReactionGate {
    debounce: Duration,
    last_emitted: Option<Emotion>,
    last_fired_at: Option<Instant>,
}

impl ReactionGate {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            last_emitted: None,
            last_fired_at: None,
        }
    }

    pub fn observe(&mut self, verdict: Option<Emotion>, now: Instant) -> Option<Emotion> {
        let Some(verdict) = verdict else {
            self.last_emitted = None;
            return None;
        };
        if self.last_emitted == Some(verdict) {
            return None;
        }
        if let Some(fired_at) = self.last_fired_at {
            if now.duration_since(fired_at) < self.debounce {
                return None;
            }
        }
        self.last_emitted = Some(verdict);
        self.last_fired_at = Some(now);
        Some(verdict)
    }
}

/// Consumer-side poller: checks the tracker on its own cadence and, when the
/// gate passes, pauses detection, speaks the prompt and hands the reaction
/// to the frontend over the channel. Detection stays paused until the
/// frontend explicitly resumes it.
pub async fn run_reaction_loop<P>(
    tracker: StabilityTracker,
    speech: P,
    debounce: Duration,
    poll_interval: Duration,
    reactions: mpsc::Sender<Reaction>,
) where
    P: SpeechSynthesizer,
{
    let mut gate = ReactionGate::new(debounce);
    let mut ticks = tokio::time::interval(poll_interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tracing::debug!(poll_ms = poll_interval.as_millis() as u64, "reaction loop started");

    loop {
        ticks.tick().await;
        if tracker.is_stopped() {
            tracing::debug!("reaction loop stopping");
            break;
        }

        let now = tokio::time::Instant::now().into_std();
        if let Some(mood) = gate.observe(tracker.current_verdict(), now) {
            tracker.pause();
            let reaction = Reaction::for_mood(mood);
            tracing::info!(mood = %mood, "stable mood detected");

            if let Err(e) = speech.speak(reaction.prompt.clone()).await {
                tracing::warn!(error = %e, "speech failed");
            }
            if reactions.try_send(reaction).is_err() {
                tracing::warn!(mood = %mood, "reaction channel full or closed, dropping reaction");
            }
        }
    }
}
