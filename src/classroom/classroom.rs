use super::*;
use crate::CAS_ATTEMPTS;
use crate::EXPECTED;
use crate::MATCHES;
use crate::PLAYERS;
use crate::ROUND;
use crate::game::*;
use crate::lobby::*;
use crate::store::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Mutex;

/// One classroom game on top of a shared store.
///
/// Holds no game state of its own besides the payoff table and the coin
/// used for type draws; every call starts from a fresh snapshot.
pub struct Classroom<S> {
    store: S,
    table: PayoffTable,
    rng: Mutex<SmallRng>,
}

impl<S> Classroom<S>
where
    S: Store,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            table: PayoffTable::default(),
            rng: Mutex::new(SmallRng::from_rng(&mut rand::rng())),
        }
    }

    /// Deterministic type draws, for reproducible runs.
    pub fn seeded(store: S, seed: u64) -> Self {
        Self {
            store,
            table: PayoffTable::default(),
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    pub fn with_table(self, table: PayoffTable) -> Self {
        Self { table, ..self }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
    pub fn table(&self) -> &PayoffTable {
        &self.table
    }

    /// Expected class size, or None while unset or zero.
    pub async fn expected(&self) -> anyhow::Result<Option<usize>> {
        Ok(record::<usize>(self.store.get(EXPECTED).await?).filter(|n| *n > 0))
    }

    pub async fn round(&self) -> anyhow::Result<Round> {
        Ok(record::<Round>(self.store.get(ROUND).await?).unwrap_or_default())
    }

    /// Adds `name` to the registry. Registering twice keeps the first record.
    pub async fn register(&self, name: &str) -> anyhow::Result<()> {
        let name = Participant::key(name)?;
        let path = join([PLAYERS, name]);
        let record = serde_json::to_value(Participant::default())?;
        if self.store.swap(&path, None, Some(record)).await? {
            log::info!("registered {}", name);
        } else {
            log::debug!("{} already registered", name);
        }
        Ok(())
    }

    /// One pass of the participant's page: assigns a role, finds a
    /// counterpart, and reports what the participant should see.
    /// Losing a write race is not an error; the participant just keeps
    /// waiting and the next poll tries again.
    pub async fn poll(&self, name: &str) -> anyhow::Result<Status> {
        let name = Participant::key(name)?;
        let Some(expected) = self.expected().await? else {
            return Ok(Status::Unconfigured);
        };
        let roster = records::<Participant>(self.store.get(PLAYERS).await?);
        let Some(me) = roster
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, me)| me.clone())
        else {
            return Ok(Status::Unregistered);
        };
        let round = self.round().await?;
        if !round.is_open() {
            return Ok(Status::Closed {
                round: round.number,
            });
        }
        if roster.len() < expected && !me.is_assigned() {
            return Ok(Status::Waiting {
                registered: roster.len(),
                expected,
            });
        }
        let me = match me.is_assigned() {
            true => me,
            false => match assign(&self.store, name, expected, self.coin()?).await? {
                Some(me) => me,
                None => {
                    return Ok(Status::Waiting {
                        registered: roster.len(),
                        expected,
                    });
                }
            },
        };
        let role = me.role().ok_or_else(|| anyhow::anyhow!("{} has no role", name))?;
        let Some(pairing) = pair(&self.store, name, round.number).await? else {
            return Ok(Status::Unmatched {
                role,
                guilt: me.guilt(),
            });
        };
        Ok(self.view(name, role, pairing))
    }

    /// Records the Sender's offer.
    pub async fn offer(&self, name: &str, offer: Offer) -> anyhow::Result<Pairing> {
        let name = Participant::key(name)?;
        self.transition(name, Role::Sender, |pairing| pairing.offer(offer))
            .await
            .inspect(|p| log::info!("{} offered {} in {}", name, offer, p.key()))
    }

    /// Records the Receiver's response.
    pub async fn respond(&self, name: &str, response: Response) -> anyhow::Result<Pairing> {
        let name = Participant::key(name)?;
        self.transition(name, Role::Receiver, |pairing| pairing.respond(response))
            .await
            .inspect(|p| log::info!("{} answered {} in {}", name, response, p.key()))
    }
}

impl<S> Classroom<S>
where
    S: Store,
{
    fn coin(&self) -> anyhow::Result<Guilt> {
        self.rng
            .lock()
            .map(|mut rng| Guilt::draw(&mut *rng))
            .map_err(|_| anyhow::anyhow!("type coin poisoned"))
    }

    fn view(&self, name: &str, role: Role, pairing: Pairing) -> Status {
        let key = pairing.key();
        match (pairing.stage(), role, pairing.moves()) {
            (Stage::Complete, _, _) => Status::Settled {
                payoff: pairing
                    .payoff(&self.table)
                    .unwrap_or(crate::PAYOFF_SENTINEL),
                pairing,
            },
            (Stage::AwaitingOffer, Role::Sender, _) => Status::Choosing {
                key,
                guilt: pairing.guilt(),
                menu: Offer::menu(pairing.guilt()),
            },
            (Stage::AwaitingResponse, Role::Receiver, (Some(offer), _)) => Status::Answering {
                key,
                offer,
                menu: Response::menu(offer),
            },
            (stage, role, _) => {
                log::debug!("{} waits on {}", name, pairing);
                Status::Pending { key, role, stage }
            }
        }
    }

    /// Applies a write-once move to the pairing `name` plays `role` in.
    async fn transition<F>(&self, name: &str, role: Role, apply: F) -> anyhow::Result<Pairing>
    where
        F: Fn(Pairing) -> anyhow::Result<Pairing>,
    {
        if !self.round().await?.is_open() {
            anyhow::bail!("round is closed, moves are frozen");
        }
        for _ in 0..CAS_ATTEMPTS {
            let pairings = records::<Pairing>(self.store.get(MATCHES).await?);
            let key = existing(name, &pairings)
                .filter(|pairing| pairing.role_of(name) == Some(role))
                .map(Pairing::key)
                .ok_or_else(|| anyhow::anyhow!("{} is not a {} in any pairing", name, role))?;
            let path = join([MATCHES, key.as_str()]);
            let before = self.store.get(&path).await?;
            let pairing = record::<Pairing>(before.clone())
                .ok_or_else(|| anyhow::anyhow!("pairing {} vanished", key))?;
            let after = serde_json::to_value(apply(pairing)?)?;
            if self.store.swap(&path, before, Some(after.clone())).await? {
                return Ok(serde_json::from_value(after)?);
            }
        }
        anyhow::bail!("gave up updating {} after {} attempts", name, CAS_ATTEMPTS)
    }
}
