use super::*;
use serde::Deserialize;
use serde::Serialize;

/// Receiver's answer to the settlement offer.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Response {
    Accept,
    Reject,
}

impl Response {
    /// Answers available once the given offer is on the table.
    pub fn menu(offer: Offer) -> Vec<Self> {
        match offer {
            Offer::Generous => vec![Self::Accept],
            Offer::Stingy => vec![Self::Accept, Self::Reject],
        }
    }

    /// The answer the rules impose without asking the Receiver, if any.
    pub fn forced(offer: Offer) -> Option<Self> {
        match offer {
            Offer::Generous => Some(Self::Accept),
            Offer::Stingy => None,
        }
    }

    pub fn allowed(&self, offer: Offer) -> bool {
        Self::menu(offer).contains(self)
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generous_is_always_accepted() {
        assert_eq!(Response::forced(Offer::Generous), Some(Response::Accept));
        assert!(!Response::Reject.allowed(Offer::Generous));
    }

    #[test]
    fn stingy_leaves_a_choice() {
        assert_eq!(Response::forced(Offer::Stingy), None);
        assert_eq!(Response::menu(Offer::Stingy).len(), 2);
    }
}
