use crate::GUILT_PROBABILITY;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// Private type of a Sender. Drawn once, never revealed directly to the Receiver.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Guilt {
    Guilty,
    Innocent,
}

impl Guilt {
    /// Biased coin: Guilty with probability [`GUILT_PROBABILITY`].
    pub fn draw<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        if rng.random_bool(GUILT_PROBABILITY) {
            Self::Guilty
        } else {
            Self::Innocent
        }
    }
}

impl std::fmt::Display for Guilt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn quarter_guilty() {
        const DRAWS: usize = 10_000;
        let ref mut rng = SmallRng::seed_from_u64(0xBAD5EED);
        let guilty = (0..DRAWS)
            .map(|_| Guilt::draw(rng))
            .filter(|g| *g == Guilt::Guilty)
            .count();
        let share = guilty as f64 / DRAWS as f64;
        assert!((share - 0.25).abs() < 0.02, "guilty share {} not near 0.25", share);
    }
}
