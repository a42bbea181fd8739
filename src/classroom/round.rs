use serde::Deserialize;
use serde::Serialize;

/// Stage of the classroom exercise, shared by every participant.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Pairings form and moves are accepted.
    #[default]
    Playing,
    /// Moves are frozen while results are discussed.
    Reveal,
}

/// Process-wide round counter. Only the admin advances it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub phase: Phase,
}

impl Default for Round {
    fn default() -> Self {
        Self {
            number: 1,
            phase: Phase::Playing,
        }
    }
}

impl Round {
    /// Playing -> Reveal -> next round's Playing.
    pub fn next(&self) -> Self {
        match self.phase {
            Phase::Playing => Self {
                number: self.number,
                phase: Phase::Reveal,
            },
            Phase::Reveal => Self {
                number: self.number + 1,
                phase: Phase::Playing,
            },
        }
    }

    pub fn is_open(&self) -> bool {
        self.phase == Phase::Playing
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "round {} ({:?})", self.number, self.phase)
    }
}
