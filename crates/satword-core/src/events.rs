use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::word::Word;

/// Every change to the known set produces an Event.
/// The interactive surface emits them; the widget surface treats any of
/// them as a request to drop its cached timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    WordMarkedKnown {
        word: Word,
        at: DateTime<Utc>,
    },
    WordUnmarked {
        word: Word,
        at: DateTime<Utc>,
    },
    /// Every known word was removed at once.
    KnownSetCleared {
        removed: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::WordMarkedKnown { at, .. }
            | Event::WordUnmarked { at, .. }
            | Event::KnownSetCleared { at, .. } => *at,
        }
    }
}
