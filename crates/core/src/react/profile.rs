use crate::classify::Emotion;
use serde::Serialize;

/// Display copy for one mood: emoji, headline, follow-up line.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct MoodProfile {
    pub emoji: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
}

impl MoodProfile {
    pub fn for_emotion(mood: Emotion) -> Self {
        match mood {
            Emotion::Happy => Self {
                emoji: "\u{1F604}",
                title: "You're looking great!",
                subtitle: "Shall I play your upbeat playlist or a quick game?",
            },
            Emotion::Sad => Self {
                emoji: "\u{1F622}",
                title: "You look sad.",
                subtitle: "Would you like me to play your playlist or tell a joke?",
            },
            Emotion::Neutral => Self {
                emoji: "\u{1F610}",
                title: "Feeling neutral.",
                subtitle: "Want some music or a short game to spice things up?",
            },
            Emotion::Angry => Self {
                emoji: "\u{1F621}",
                title: "You seem upset.",
                subtitle: "Maybe calming music would help, want me to play it?",
            },
            Emotion::Surprised => Self {
                emoji: "\u{1F632}",
                title: "Surprised!",
                subtitle: "Want a fun fact or a quick game?",
            },
            Emotion::Fearful => Self {
                emoji: "\u{1F628}",
                title: "A bit anxious?",
                subtitle: "Let's try a calm playlist or a joke.",
            },
            Emotion::Disgusted => Self {
                emoji: "\u{1F922}",
                title: "Hmm, that's odd.",
                subtitle: "Maybe music or a quick laugh will help.",
            },
        }
    }

    pub fn spoken_prompt(&self) -> String {
        format!(
            "{} {} Would you like me to play music, tell a joke or play a game?",
            self.title, self.subtitle
        )
    }
}
