use super::*;
use serde::Deserialize;
use serde::Serialize;

/// Settlement proposed by the Sender.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Offer {
    Generous,
    Stingy,
}

impl Offer {
    /// Offers a Sender of the given type may choose from.
    /// An Innocent defendant never signals guilt, so Generous is withheld.
    pub fn menu(guilt: Guilt) -> Vec<Self> {
        match guilt {
            Guilt::Guilty => vec![Self::Generous, Self::Stingy],
            Guilt::Innocent => vec![Self::Stingy],
        }
    }

    pub fn allowed(&self, guilt: Guilt) -> bool {
        Self::menu(guilt).contains(self)
    }
}

impl std::fmt::Display for Offer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn innocent_never_generous() {
        assert_eq!(Offer::menu(Guilt::Innocent), vec![Offer::Stingy]);
        assert!(!Offer::Generous.allowed(Guilt::Innocent));
        assert!(Offer::Stingy.allowed(Guilt::Innocent));
    }

    #[test]
    fn guilty_chooses_freely() {
        assert!(Offer::Generous.allowed(Guilt::Guilty));
        assert!(Offer::Stingy.allowed(Guilt::Guilty));
    }
}
