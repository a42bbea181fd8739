use super::*;
use crate::game::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;

/// Picks uniformly among the legal moves.
pub struct Coin(SmallRng);

impl Coin {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl Agent for Coin {
    fn offer(&mut self, _: Guilt, menu: &[Offer]) -> Offer {
        menu.choose(&mut self.0)
            .copied()
            .unwrap_or(Offer::Stingy)
    }

    fn respond(&mut self, _: Offer, menu: &[Response]) -> Response {
        menu.choose(&mut self.0)
            .copied()
            .unwrap_or(Response::Accept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_on_menu() {
        let mut coin = Coin::new(1);
        for _ in 0..100 {
            assert_eq!(coin.offer(Guilt::Innocent, &Offer::menu(Guilt::Innocent)), Offer::Stingy);
            assert_eq!(
                coin.respond(Offer::Generous, &Response::menu(Offer::Generous)),
                Response::Accept
            );
        }
    }
}
