use super::*;
use crate::NASH_ACCEPT_STINGY;
use crate::NASH_GUILTY_STINGY;
use crate::game::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Mixes at the classroom benchmark rates: a Guilty Sender bluffs Stingy
/// with probability 3/7, the Receiver accepts Stingy with probability 2/5.
/// Innocent Senders and Generous offers leave no choice.
pub struct Nash(SmallRng);

impl Nash {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    fn pick<T>(menu: &[T], wanted: T) -> T
    where
        T: Copy + PartialEq,
    {
        match menu.contains(&wanted) {
            true => wanted,
            false => menu.first().copied().unwrap_or(wanted),
        }
    }
}

impl Agent for Nash {
    fn offer(&mut self, guilt: Guilt, menu: &[Offer]) -> Offer {
        let wanted = match guilt {
            Guilt::Guilty if !self.0.random_bool(NASH_GUILTY_STINGY) => Offer::Generous,
            _ => Offer::Stingy,
        };
        Self::pick(menu, wanted)
    }

    fn respond(&mut self, offer: Offer, menu: &[Response]) -> Response {
        let wanted = match offer {
            Offer::Stingy if !self.0.random_bool(NASH_ACCEPT_STINGY) => Response::Reject,
            _ => Response::Accept,
        };
        Self::pick(menu, wanted)
    }
}
