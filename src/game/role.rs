use serde::Deserialize;
use serde::Serialize;

/// Side of the lawsuit a participant plays for its whole lifetime.
///
/// Serialized with the narrative names the classroom uses: the Sender is
/// the defendant (eBay) and the Receiver is the plaintiff (AT&T).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "eBay")]
    Sender,
    #[serde(rename = "AT&T")]
    Receiver,
}

impl Role {
    pub fn opponent(&self) -> Self {
        match self {
            Self::Sender => Self::Receiver,
            Self::Receiver => Self::Sender,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sender => write!(f, "Sender"),
            Self::Receiver => write!(f, "Receiver"),
        }
    }
}
