use super::*;

/// Progress of a single pairing. Transitions only move forward.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    AwaitingOffer,
    AwaitingResponse,
    Complete,
}

impl Stage {
    /// Whose move it is, or None once the pairing has settled.
    pub fn turn(&self) -> Option<Role> {
        match self {
            Self::AwaitingOffer => Some(Role::Sender),
            Self::AwaitingResponse => Some(Role::Receiver),
            Self::Complete => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        *self == Self::Complete
    }
}

impl From<(Option<Offer>, Option<Response>)> for Stage {
    fn from(moves: (Option<Offer>, Option<Response>)) -> Self {
        match moves {
            (None, _) => Self::AwaitingOffer,
            (Some(_), None) => Self::AwaitingResponse,
            (Some(_), Some(_)) => Self::Complete,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AwaitingOffer => write!(f, "awaiting offer"),
            Self::AwaitingResponse => write!(f, "awaiting response"),
            Self::Complete => write!(f, "complete"),
        }
    }
}
