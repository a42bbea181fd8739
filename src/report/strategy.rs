use crate::game::*;

/// What a single offer says about the Sender.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strategy {
    /// Stingy: both types make it, nothing is revealed.
    Pooling,
    /// Generous: only a Guilty Sender makes it, type is revealed.
    Separating,
}

impl From<Offer> for Strategy {
    fn from(offer: Offer) -> Self {
        match offer {
            Offer::Stingy => Self::Pooling,
            Offer::Generous => Self::Separating,
        }
    }
}

/// Class-wide pattern of Sender behavior.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Regime {
    /// Every Sender offered Stingy.
    Pooling,
    /// Every Guilty Sender offered Generous, every Innocent Stingy.
    Separating,
    /// Some Guilty Senders bluffed, some did not.
    Hybrid,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
