use crate::capture::FrameSource;
use crate::classify::EmotionClassifier;
use crate::config::{AppConfig, DetectionConfig, OnClassifierFailure};
use crate::react::{run_reaction_loop, Reaction};
use crate::speech::SpeechSynthesizer;
use crate::stability::{run_sampling_loop, StabilityTracker};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("{task} task failed to join")]
    TaskJoin { task: &'static str },
}

#[derive(Clone, Copy, Debug)]
pub struct PipelineConfig {
    pub detection: DetectionConfig,
    pub on_classifier_failure: OnClassifierFailure,
}

impl PipelineConfig {
    pub fn from_app(app: &AppConfig) -> Self {
        Self {
            detection: app.detection,
            on_classifier_failure: app.on_classifier_failure,
        }
    }
}

/// Wires the collaborators to the smoothing core: a sampling task feeds the
/// tracker, a reaction task polls it and pushes gate-passed reactions to the
/// frontend over a bounded channel.
pub struct Pipeline<S, C, P> {
    pub source: S,
    pub classifier: C,
    pub speech: P,
    pub config: PipelineConfig,
}

impl<S, C, P> Pipeline<S, C, P>
where
    S: FrameSource + 'static,
    C: EmotionClassifier + 'static,
    P: SpeechSynthesizer + 'static,
{
    /// Spawns the sampling and reaction tasks and hands back the control
    /// handle. The tasks run until [`PipelineHandle::shutdown`].
    pub fn start(self) -> PipelineHandle {
        let detection = self.config.detection;
        let tracker = StabilityTracker::from_config(&detection);
        let (reaction_tx, reaction_rx) = mpsc::channel(Self::channel_capacity(&detection));

        let sampler = tokio::spawn(run_sampling_loop(
            self.source,
            self.classifier,
            tracker.clone(),
            detection.analyze_interval(),
            self.config.on_classifier_failure,
        ));
        let poller = tokio::spawn(run_reaction_loop(
            tracker.clone(),
            self.speech,
            detection.reaction_debounce(),
            detection.poll_interval(),
            reaction_tx,
        ));

        PipelineHandle {
            tracker,
            reactions: reaction_rx,
            sampler,
            poller,
        }
    }

    fn channel_capacity(detection: &DetectionConfig) -> usize {
        let cap = (detection.reaction_debounce_ms / 250).clamp(2, 16);
        usize::try_from(cap).unwrap_or(4)
    }
}

pub struct PipelineHandle {
    tracker: StabilityTracker,
    reactions: mpsc::Receiver<Reaction>,
    sampler: JoinHandle<()>,
    poller: JoinHandle<()>,
}

impl PipelineHandle {
    /// Next gate-passed reaction; `None` once the pipeline has shut down.
    pub async fn next_reaction(&mut self) -> Option<Reaction> {
        self.reactions.recv().await
    }

    pub fn pause_detection(&self) {
        self.tracker.pause();
    }

    /// Restarts detection from fresh evidence after a reaction.
    pub fn resume_detection(&self) {
        self.tracker.resume();
    }

    pub fn tracker(&self) -> StabilityTracker {
        self.tracker.clone()
    }

    /// Stops both tasks and waits for them. Effective within one sampling
    /// period; an in-flight classification is allowed to finish.
    pub async fn shutdown(self) -> Result<(), PipelineError> {
        self.tracker.stop();
        drop(self.reactions);
        let (sampler, poller) = tokio::join!(self.sampler, self.poller);
        sampler.map_err(|_| PipelineError::TaskJoin { task: "sampling" })?;
        poller.map_err(|_| PipelineError::TaskJoin { task: "reaction" })?;
        Ok(())
    }
}
