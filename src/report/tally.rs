use crate::game::*;
use crate::lobby::*;
use std::collections::BTreeMap;

/// Counts over settled pairings. Unsettled pairings are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    offers: BTreeMap<(Guilt, Offer), usize>,
    responses: BTreeMap<(Offer, Response), usize>,
}

impl From<&[Pairing]> for Tally {
    fn from(pairings: &[Pairing]) -> Self {
        pairings
            .iter()
            .filter_map(|pairing| match pairing.moves() {
                (Some(offer), Some(response)) => Some((pairing.guilt(), offer, response)),
                _ => None,
            })
            .fold(Self::default(), |mut tally, (guilt, offer, response)| {
                *tally.offers.entry((guilt, offer)).or_default() += 1;
                *tally.responses.entry((offer, response)).or_default() += 1;
                tally
            })
    }
}

impl Tally {
    pub fn total(&self) -> usize {
        self.offers.values().sum()
    }
    /// Senders of this type who made this offer.
    pub fn count(&self, guilt: Guilt, offer: Offer) -> usize {
        self.offers.get(&(guilt, offer)).copied().unwrap_or_default()
    }
    /// Senders of this type.
    pub fn typed(&self, guilt: Guilt) -> usize {
        [Offer::Generous, Offer::Stingy]
            .into_iter()
            .map(|offer| self.count(guilt, offer))
            .sum()
    }
    /// Offers of this kind, across types.
    pub fn offered(&self, offer: Offer) -> usize {
        [Guilt::Guilty, Guilt::Innocent]
            .into_iter()
            .map(|guilt| self.count(guilt, offer))
            .sum()
    }
    /// Responses of this kind to this offer.
    pub fn answered(&self, offer: Offer, response: Response) -> usize {
        self.responses
            .get(&(offer, response))
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_unsettled() {
        let pairings = vec![
            Pairing::new("a", "b", Guilt::Guilty, 1),
            Pairing::new("c", "d", Guilt::Innocent, 1)
                .offer(Offer::Stingy)
                .unwrap(),
            Pairing::new("e", "f", Guilt::Guilty, 1)
                .offer(Offer::Generous)
                .unwrap(),
        ];
        let tally = Tally::from(pairings.as_slice());
        assert_eq!(tally.total(), 1);
        assert_eq!(tally.count(Guilt::Guilty, Offer::Generous), 1);
        assert_eq!(tally.answered(Offer::Generous, Response::Accept), 1);
        assert_eq!(tally.offered(Offer::Stingy), 0);
    }
}
