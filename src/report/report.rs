use super::*;
use crate::GUILT_PROBABILITY;
use crate::NASH_ACCEPT_STINGY;
use crate::NASH_GUILTY_STINGY;
use crate::NASH_POSTERIOR;
use crate::Probability;
use crate::game::*;
use crate::lobby::*;

/// One observed statistic next to its benchmark value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Benchmark {
    pub label: &'static str,
    pub observed: Option<Probability>,
    pub theory: Probability,
}

impl Benchmark {
    pub fn delta(&self) -> Option<Probability> {
        self.observed.map(|p| p - self.theory)
    }
}

/// Summary of a set of pairings as shown after a round.
///
/// Frequencies are None when their denominator is empty, so a class with
/// no Guilty Senders reports "no data" rather than a misleading zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    tally: Tally,
    sender: i64,
    receiver: i64,
}

impl Report {
    pub fn new(pairings: &[Pairing], table: &PayoffTable) -> Self {
        let (sender, receiver) = pairings
            .iter()
            .filter_map(|pairing| pairing.payoff(table))
            .fold((0i64, 0i64), |(s, r), (ds, dr)| (s + ds as i64, r + dr as i64));
        Self {
            tally: Tally::from(pairings),
            sender,
            receiver,
        }
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    fn ratio(numerator: usize, denominator: usize) -> Option<Probability> {
        match denominator {
            0 => None,
            d => Some(numerator as Probability / d as Probability),
        }
    }

    /// Share of settled pairings whose offer carries this strategy label.
    pub fn share(&self, strategy: Strategy) -> Option<Probability> {
        let labelled = Offer::menu(Guilt::Guilty)
            .into_iter()
            .filter(|offer| Strategy::from(*offer) == strategy)
            .map(|offer| self.tally.offered(offer))
            .sum();
        Self::ratio(labelled, self.tally.total())
    }

    pub fn regime(&self) -> Option<Regime> {
        if self.tally.total() == 0 {
            None
        } else if self.tally.offered(Offer::Generous) == 0 {
            Some(Regime::Pooling)
        } else if self.tally.count(Guilt::Guilty, Offer::Stingy) == 0 {
            Some(Regime::Separating)
        } else {
            Some(Regime::Hybrid)
        }
    }

    /// Observed P(Guilty).
    pub fn prior(&self) -> Option<Probability> {
        Self::ratio(self.tally.typed(Guilt::Guilty), self.tally.total())
    }

    /// Observed P(offer | type).
    pub fn offer_rate(&self, guilt: Guilt, offer: Offer) -> Option<Probability> {
        Self::ratio(self.tally.count(guilt, offer), self.tally.typed(guilt))
    }

    /// Observed P(response | offer).
    pub fn response_rate(&self, offer: Offer, response: Response) -> Option<Probability> {
        Self::ratio(self.tally.answered(offer, response), self.tally.offered(offer))
    }

    /// P(Guilty | Stingy) by Bayes' rule, with observed frequencies plugged
    /// in for the prior and both likelihoods. None until a Stingy offer is seen.
    pub fn posterior(&self) -> Option<Probability> {
        let prior = self.prior()?;
        let likelihood = |guilt| self.offer_rate(guilt, Offer::Stingy).unwrap_or(0.);
        let guilty = prior * likelihood(Guilt::Guilty);
        let innocent = (1. - prior) * likelihood(Guilt::Innocent);
        match guilty + innocent {
            evidence if evidence > 0. => Some(guilty / evidence),
            _ => None,
        }
    }

    /// Average payoff per settled pairing for the given side.
    pub fn mean_payoff(&self, role: Role) -> Option<f64> {
        let total = match role {
            Role::Sender => self.sender,
            Role::Receiver => self.receiver,
        };
        match self.tally.total() {
            0 => None,
            n => Some(total as f64 / n as f64),
        }
    }

    #[rustfmt::skip]
    pub fn benchmarks(&self) -> Vec<Benchmark> {
        vec![
            Benchmark { label: "P(Guilty)",          observed: self.prior(),                                        theory: GUILT_PROBABILITY  },
            Benchmark { label: "P(Stingy | Guilty)", observed: self.offer_rate(Guilt::Guilty, Offer::Stingy),       theory: NASH_GUILTY_STINGY },
            Benchmark { label: "P(Accept | Stingy)", observed: self.response_rate(Offer::Stingy, Response::Accept), theory: NASH_ACCEPT_STINGY },
            Benchmark { label: "P(Guilty | Stingy)", observed: self.posterior(),                                    theory: NASH_POSTERIOR     },
        ]
    }
}

fn percent(p: Option<Probability>) -> String {
    p.map(|p| format!("{:>6.1}%", 100. * p))
        .unwrap_or_else(|| format!("{:>7}", "-"))
}

#[rustfmt::skip]
impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Settled pairings: {}", self.tally.total())?;
        writeln!(f, "Sender regime:    {}", self.regime().map(|r| r.to_string()).unwrap_or("-".into()))?;
        writeln!(f, "Pooling share:    {}", percent(self.share(Strategy::Pooling)).trim())?;
        writeln!(f, "┌──────────┬──────────┬───────┬─────────┐")?;
        writeln!(f, "│ Type     │ Offer    │ Count │    Rate │")?;
        writeln!(f, "├──────────┼──────────┼───────┼─────────┤")?;
        for guilt in [Guilt::Guilty, Guilt::Innocent] {
            for offer in [Offer::Generous, Offer::Stingy] {
                writeln!(
                    f,
                    "│ {:<8} │ {:<8} │ {:>5} │ {} │",
                    guilt.to_string(),
                    offer.to_string(),
                    self.tally.count(guilt, offer),
                    percent(self.offer_rate(guilt, offer)),
                )?;
            }
        }
        writeln!(f, "├──────────┼──────────┼───────┼─────────┤")?;
        writeln!(f, "│ Offer    │ Response │ Count │    Rate │")?;
        writeln!(f, "├──────────┼──────────┼───────┼─────────┤")?;
        for offer in [Offer::Generous, Offer::Stingy] {
            for response in [Response::Accept, Response::Reject] {
                writeln!(
                    f,
                    "│ {:<8} │ {:<8} │ {:>5} │ {} │",
                    offer.to_string(),
                    response.to_string(),
                    self.tally.answered(offer, response),
                    percent(self.response_rate(offer, response)),
                )?;
            }
        }
        writeln!(f, "└──────────┴──────────┴───────┴─────────┘")?;
        writeln!(f, "┌────────────────────┬──────────┬──────────┬──────────┐")?;
        writeln!(f, "│ Statistic          │ Observed │   Theory │    Delta │")?;
        writeln!(f, "├────────────────────┼──────────┼──────────┼──────────┤")?;
        for benchmark in self.benchmarks() {
            writeln!(
                f,
                "│ {:<18} │ {:>8} │ {:>8} │ {:>8} │",
                benchmark.label,
                benchmark.observed.map(|p| format!("{:.3}", p)).unwrap_or("-".into()),
                format!("{:.3}", benchmark.theory),
                benchmark.delta().map(|d| format!("{:+.3}", d)).unwrap_or("-".into()),
            )?;
        }
        writeln!(f, "└────────────────────┴──────────┴──────────┴──────────┘")?;
        writeln!(
            f,
            "Mean payoff: sender {} / receiver {}",
            self.mean_payoff(Role::Sender).map(|x| format!("{:+.1}", x)).unwrap_or("-".into()),
            self.mean_payoff(Role::Receiver).map(|x| format!("{:+.1}", x)).unwrap_or("-".into()),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: Probability = 1e-12;

    fn settled(guilt: Guilt, offer: Offer, response: Response) -> Pairing {
        let pairing = Pairing::new("s", "r", guilt, 1).offer(offer).unwrap();
        match pairing.stage() {
            Stage::Complete => pairing,
            _ => pairing.respond(response).unwrap(),
        }
    }

    fn class(spec: &[(usize, Guilt, Offer, Response)]) -> Vec<Pairing> {
        spec.iter()
            .flat_map(|(n, g, o, r)| std::iter::repeat_with(|| settled(*g, *o, *r)).take(*n))
            .collect()
    }

    #[test]
    fn empty() {
        let report = Report::new(&[], &PayoffTable::default());
        assert_eq!(report.tally().total(), 0);
        assert_eq!(report.share(Strategy::Pooling), None);
        assert_eq!(report.regime(), None);
        assert_eq!(report.posterior(), None);
        assert_eq!(report.mean_payoff(Role::Sender), None);
    }

    #[test]
    fn separating_class() {
        // 4 Guilty all Generous, 6 Innocent all Stingy
        let pairings = class(&[
            (4, Guilt::Guilty, Offer::Generous, Response::Accept),
            (3, Guilt::Innocent, Offer::Stingy, Response::Accept),
            (3, Guilt::Innocent, Offer::Stingy, Response::Reject),
        ]);
        let report = Report::new(&pairings, &PayoffTable::default());
        assert_eq!(report.tally().total(), 10);
        assert_eq!(report.share(Strategy::Pooling), Some(0.6));
        assert_eq!(report.share(Strategy::Separating), Some(0.4));
        assert_eq!(report.regime(), Some(Regime::Separating));
        assert_eq!(report.prior(), Some(0.4));
        assert_eq!(report.posterior(), Some(0.));
        assert_eq!(report.response_rate(Offer::Stingy, Response::Accept), Some(0.5));
        assert_eq!(report.offer_rate(Guilt::Guilty, Offer::Generous), Some(1.));
    }

    #[test]
    fn hybrid_posterior() {
        let pairings = class(&[
            (2, Guilt::Guilty, Offer::Generous, Response::Accept),
            (2, Guilt::Guilty, Offer::Stingy, Response::Reject),
            (6, Guilt::Innocent, Offer::Stingy, Response::Accept),
        ]);
        let report = Report::new(&pairings, &PayoffTable::default());
        assert_eq!(report.regime(), Some(Regime::Hybrid));
        assert_eq!(report.share(Strategy::Pooling), Some(0.8));
        let posterior = report.posterior().unwrap();
        assert!((posterior - 0.25).abs() < EPSILON, "{}", posterior);
        let direct = report.tally().count(Guilt::Guilty, Offer::Stingy) as f64
            / report.tally().offered(Offer::Stingy) as f64;
        assert!((posterior - direct).abs() < EPSILON);
    }

    #[test]
    fn pooling_class() {
        let pairings = class(&[
            (1, Guilt::Guilty, Offer::Stingy, Response::Accept),
            (3, Guilt::Innocent, Offer::Stingy, Response::Reject),
        ]);
        let report = Report::new(&pairings, &PayoffTable::default());
        assert_eq!(report.regime(), Some(Regime::Pooling));
        assert_eq!(report.share(Strategy::Pooling), Some(1.));
        assert_eq!(report.response_rate(Offer::Generous, Response::Accept), None);
    }

    #[test]
    fn mean_payoffs() {
        let pairings = class(&[
            (1, Guilt::Guilty, Offer::Stingy, Response::Reject),
            (1, Guilt::Innocent, Offer::Stingy, Response::Reject),
        ]);
        let report = Report::new(&pairings, &PayoffTable::default());
        assert_eq!(report.mean_payoff(Role::Sender), Some(-100.));
        assert_eq!(report.mean_payoff(Role::Receiver), Some(0.));
    }

    #[test]
    fn equilibrium_benchmarks() {
        let pairings = class(&[
            (4, Guilt::Guilty, Offer::Generous, Response::Accept),
            (3, Guilt::Guilty, Offer::Stingy, Response::Accept),
            (21, Guilt::Innocent, Offer::Stingy, Response::Reject),
        ]);
        let report = Report::new(&pairings, &PayoffTable::default());
        let benchmarks = report.benchmarks();
        assert_eq!(benchmarks.len(), 4);
        for benchmark in &benchmarks[..2] {
            assert!(benchmark.delta().unwrap().abs() < EPSILON, "{:?}", benchmark);
        }
        assert!(benchmarks[3].delta().unwrap().abs() < EPSILON, "{:?}", benchmarks[3]);
        let printed = report.to_string();
        assert!(printed.contains("P(Guilty | Stingy)"));
    }
}
