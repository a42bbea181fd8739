use super::*;
use crate::PAYOFF_SENTINEL;
use crate::Utility;
use serde::Deserialize;
use serde::Serialize;

/// One terminal outcome of the game and what it pays each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub guilt: Guilt,
    pub offer: Offer,
    pub response: Response,
    pub sender: Utility,
    pub receiver: Utility,
}

impl Row {
    const fn new(
        guilt: Guilt,
        offer: Offer,
        response: Response,
        sender: Utility,
        receiver: Utility,
    ) -> Self {
        Self {
            guilt,
            offer,
            response,
            sender,
            receiver,
        }
    }

    /// Whether the rules can ever produce this (type, offer, response) triple.
    pub fn reachable(&self) -> bool {
        self.offer.allowed(self.guilt) && self.response.allowed(self.offer)
    }
}

/// Canonical payoffs used unless a classroom loads its own table.
#[rustfmt::skip]
pub const CANONICAL: [Row; 5] = [
    Row::new(Guilt::Guilty,   Offer::Generous, Response::Accept, -100,  100),
    Row::new(Guilt::Guilty,   Offer::Stingy,   Response::Accept,  -20,   20),
    Row::new(Guilt::Guilty,   Offer::Stingy,   Response::Reject, -200,  100),
    Row::new(Guilt::Innocent, Offer::Stingy,   Response::Accept,  -10,   20),
    Row::new(Guilt::Innocent, Offer::Stingy,   Response::Reject,    0, -100),
];

/// Payoff scheme as data. Variants of the classroom exercise differ only in
/// these rows; lookups of unreachable triples yield [`PAYOFF_SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Row>", into = "Vec<Row>")]
pub struct PayoffTable(Vec<Row>);

impl Default for PayoffTable {
    fn default() -> Self {
        Self(CANONICAL.to_vec())
    }
}

impl PayoffTable {
    /// Validates that every row is reachable and no triple is listed twice.
    pub fn new(rows: Vec<Row>) -> anyhow::Result<Self> {
        if let Some(row) = rows.iter().find(|row| !row.reachable()) {
            anyhow::bail!(
                "unreachable outcome {} / {} / {} cannot carry a payoff",
                row.guilt,
                row.offer,
                row.response
            );
        }
        for (i, a) in rows.iter().enumerate() {
            if rows[i + 1..].iter().any(|b| Self::triple(a) == Self::triple(b)) {
                anyhow::bail!(
                    "outcome {} / {} / {} listed twice",
                    a.guilt,
                    a.offer,
                    a.response
                );
            }
        }
        Ok(Self(rows))
    }

    /// Reads a JSON array of rows from disk.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let table = serde_json::from_str::<Self>(&json)?;
        log::info!("loaded payoff table with {} rows from {}", table.0.len(), path.display());
        Ok(table)
    }

    /// (sender, receiver) payoff. Total over all triples.
    pub fn lookup(&self, guilt: Guilt, offer: Offer, response: Response) -> (Utility, Utility) {
        self.0
            .iter()
            .find(|row| Self::triple(row) == (guilt, offer, response))
            .map(|row| (row.sender, row.receiver))
            .unwrap_or(PAYOFF_SENTINEL)
    }

    pub fn rows(&self) -> &[Row] {
        &self.0
    }

    fn triple(row: &Row) -> (Guilt, Offer, Response) {
        (row.guilt, row.offer, row.response)
    }
}

impl TryFrom<Vec<Row>> for PayoffTable {
    type Error = anyhow::Error;
    fn try_from(rows: Vec<Row>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<PayoffTable> for Vec<Row> {
    fn from(table: PayoffTable) -> Self {
        table.0
    }
}

#[rustfmt::skip]
impl std::fmt::Display for PayoffTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "┌──────────┬──────────┬──────────┬────────┬──────────┐")?;
        writeln!(f, "│ Type     │ Offer    │ Response │ Sender │ Receiver │")?;
        writeln!(f, "├──────────┼──────────┼──────────┼────────┼──────────┤")?;
        for row in &self.0 {
            writeln!(
                f,
                "│ {:<8} │ {:<8} │ {:<8} │ {:>+6} │ {:>+8} │",
                row.guilt.to_string(),
                row.offer.to_string(),
                row.response.to_string(),
                row.sender,
                row.receiver,
            )?;
        }
        writeln!(f, "└──────────┴──────────┴──────────┴────────┴──────────┘")?;
        Ok(())
    }
}
