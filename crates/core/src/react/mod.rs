mod gate;
mod profile;

use crate::classify::Emotion;
use serde::Serialize;

pub use gate::{run_reaction_loop, ReactionGate};
pub use profile::MoodProfile;

/// Follow-up actions offered alongside a detected mood. The engines behind
/// them (player, joke service, games) live outside the core.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    PlayPlaylist,
    TellJoke,
    PlayGame,
}

/// What the gate emits once a stable mood passes the debounce: the mood, its
/// display profile, the composed spoken prompt and the suggested actions.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Reaction {
    pub mood: Emotion,
    pub profile: MoodProfile,
    pub prompt: String,
    pub suggestions: [Suggestion; 3],
}

impl Reaction {
    pub fn for_mood(mood: Emotion) -> Self {
        let profile = MoodProfile::for_emotion(mood);
        Self {
            mood,
            profile,
            prompt: profile.spoken_prompt(),
            suggestions: [
                Suggestion::PlayPlaylist,
                Suggestion::TellJoke,
                Suggestion::PlayGame,
            ],
        }
    }
}
