use crate::Utility;
use crate::game::*;
use crate::lobby::*;

/// What a participant's screen should show right now.
///
/// Receiver-facing variants carry the offer, never the Sender's type.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    /// Expected class size is unset or zero; nothing can start.
    Unconfigured,
    /// No registry entry under this name.
    Unregistered,
    /// Registration still open.
    Waiting { registered: usize, expected: usize },
    /// Role known, no free counterpart yet.
    Unmatched { role: Role, guilt: Option<Guilt> },
    /// Sender's turn.
    Choosing {
        key: String,
        guilt: Guilt,
        menu: Vec<Offer>,
    },
    /// Receiver's turn.
    Answering {
        key: String,
        offer: Offer,
        menu: Vec<Response>,
    },
    /// Counterpart's turn.
    Pending { key: String, role: Role, stage: Stage },
    /// Pairing complete. Payoff is (sender, receiver).
    Settled {
        pairing: Pairing,
        payoff: (Utility, Utility),
    },
    /// Round is in its reveal phase.
    Closed { round: u32 },
}

impl Status {
    /// False while the participant can only wait and poll again.
    pub fn ready(&self) -> bool {
        !matches!(
            self,
            Self::Waiting { .. } | Self::Unmatched { .. } | Self::Pending { .. }
        )
    }

    /// True once nothing further can happen for this participant this round.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Unconfigured | Self::Unregistered | Self::Settled { .. } | Self::Closed { .. }
        )
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unconfigured => write!(f, "game not configured"),
            Self::Unregistered => write!(f, "not registered"),
            Self::Waiting { registered, expected } => {
                write!(f, "waiting for players {}/{}", registered, expected)
            }
            Self::Unmatched { role, .. } => write!(f, "{} looking for a match", role),
            Self::Choosing { key, guilt, .. } => write!(f, "{}: choose an offer ({})", key, guilt),
            Self::Answering { key, offer, .. } => write!(f, "{}: respond to {} offer", key, offer),
            Self::Pending { key, stage, .. } => write!(f, "{}: {}", key, stage),
            Self::Settled { pairing, payoff } => {
                write!(f, "{}: settled {:+} / {:+}", pairing.key(), payoff.0, payoff.1)
            }
            Self::Closed { round } => write!(f, "round {} closed", round),
        }
    }
}
