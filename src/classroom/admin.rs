use super::*;
use crate::EXPECTED;
use crate::MATCHES;
use crate::PLAYERS;
use crate::ROUND;
use crate::ROUNDS;
use crate::game::*;
use crate::lobby::*;
use crate::report::*;
use crate::store::*;
use serde_json::Map;
use serde_json::Value;

/// Which pairings a report is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The current round's live registry.
    Live,
    /// One archived round.
    Round(u32),
    /// Every archived round plus the live registry.
    All,
}

/// Headcount shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub registered: usize,
    pub expected: Option<usize>,
    pub senders: usize,
    pub receivers: usize,
    pub pairings: usize,
    pub settled: usize,
    pub round: Round,
}

impl std::fmt::Display for Overview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | players {}/{} | senders {} receivers {} | pairings {} settled {}",
            self.round,
            self.registered,
            self.expected.map(|n| n.to_string()).unwrap_or("?".into()),
            self.senders,
            self.receivers,
            self.pairings,
            self.settled,
        )
    }
}

/// Administrative controls. Single-writer by convention: one admin at a time.
impl<S> Classroom<S>
where
    S: Store,
{
    /// Sets the expected class size. Must be positive and even.
    pub async fn configure(&self, expected: usize) -> anyhow::Result<()> {
        if expected == 0 || expected % 2 != 0 {
            anyhow::bail!("expected players must be a positive even number, got {}", expected);
        }
        self.store().set(EXPECTED, serde_json::json!(expected)).await?;
        log::info!("expecting {} players", expected);
        Ok(())
    }

    /// Moves the exercise forward one phase. Leaving a reveal archives the
    /// round's settled pairings and clears the live registry so everyone
    /// rematches with the same role and type.
    pub async fn advance(&self) -> anyhow::Result<Round> {
        let round = self.round().await?;
        let next = round.next();
        if !next.is_open() {
            self.store().set(ROUND, serde_json::to_value(next)?).await?;
            log::info!("{} revealed", round);
            return Ok(next);
        }
        let pairings = records::<Pairing>(self.store().get(MATCHES).await?);
        let archive = pairings
            .into_iter()
            .filter(|(key, pairing)| match pairing.stage() {
                Stage::Complete => true,
                stage => {
                    log::warn!("dropping unsettled pairing {} ({})", key, stage);
                    false
                }
            })
            .map(|(key, pairing)| Ok::<_, anyhow::Error>((key, serde_json::to_value(pairing)?)))
            .collect::<anyhow::Result<Map<String, Value>>>()?;
        let settled = archive.len();
        let path = join([ROUNDS, round.number.to_string().as_str()]);
        self.store().set(&path, Value::Object(archive)).await?;
        self.store().delete(MATCHES).await?;
        self.store().set(ROUND, serde_json::to_value(next)?).await?;
        log::info!("archived {} pairings, starting {}", settled, next);
        Ok(next)
    }

    /// Discards the current round's pairings without archiving them.
    pub async fn reset_round(&self) -> anyhow::Result<()> {
        let round = self.round().await?;
        self.store().delete(MATCHES).await?;
        let reopened = Round {
            number: round.number,
            phase: Phase::Playing,
        };
        self.store().set(ROUND, serde_json::to_value(reopened)?).await?;
        log::warn!("reset {}", reopened);
        Ok(())
    }

    /// Bulk delete of players, pairings, archives and the round counter.
    /// The expected class size survives.
    pub async fn reset(&self) -> anyhow::Result<()> {
        for path in [PLAYERS, MATCHES, ROUNDS, ROUND] {
            self.store().delete(path).await?;
        }
        log::warn!("classroom reset");
        Ok(())
    }

    pub async fn overview(&self) -> anyhow::Result<Overview> {
        let roster = records::<Participant>(self.store().get(PLAYERS).await?);
        let pairings = records::<Pairing>(self.store().get(MATCHES).await?);
        let count = |role: Role| {
            roster
                .iter()
                .filter(|(_, p)| p.is_assigned() && p.role() == Some(role))
                .count()
        };
        Ok(Overview {
            registered: roster.len(),
            expected: self.expected().await?,
            senders: count(Role::Sender),
            receivers: count(Role::Receiver),
            pairings: pairings.len(),
            settled: pairings
                .iter()
                .filter(|(_, p)| p.stage().is_terminal())
                .count(),
            round: self.round().await?,
        })
    }

    pub async fn pairings(&self, scope: Scope) -> anyhow::Result<Vec<Pairing>> {
        let live = || async { self.store().get(MATCHES).await };
        let snapshots = match scope {
            Scope::Live => vec![live().await?],
            Scope::Round(n) => vec![self.store().get(&join([ROUNDS, n.to_string().as_str()])).await?],
            Scope::All => {
                let archived = records::<Value>(self.store().get(ROUNDS).await?)
                    .into_iter()
                    .map(|(_, round)| Some(round));
                archived.chain(std::iter::once(live().await?)).collect()
            }
        };
        Ok(snapshots
            .into_iter()
            .flat_map(records::<Pairing>)
            .map(|(_, pairing)| pairing)
            .collect())
    }

    pub async fn report(&self, scope: Scope) -> anyhow::Result<Report> {
        Ok(Report::new(&self.pairings(scope).await?, self.table()))
    }
}
