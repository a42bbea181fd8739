use super::*;
use crate::CAS_ATTEMPTS;
use crate::MATCHES;
use crate::PLAYERS;
use crate::game::*;
use crate::store::*;
use serde_json::Map;
use serde_json::Value;

/// First participant of the opposite role, other than `name`, who is not
/// already part of a pairing. Scans in registry order.
pub fn counterpart<'a>(
    name: &str,
    role: Role,
    roster: &'a [(String, Participant)],
    pairings: &[(String, Pairing)],
) -> Option<&'a (String, Participant)> {
    roster
        .iter()
        .filter(|(key, _)| key != name)
        .filter(|(_, p)| p.is_assigned() && p.role() == Some(role.opponent()))
        .find(|(key, _)| !pairings.iter().any(|(_, m)| m.involves(key)))
}

/// The pairing `name` takes part in, if any.
pub fn existing<'a>(name: &str, pairings: &'a [(String, Pairing)]) -> Option<&'a Pairing> {
    pairings
        .iter()
        .map(|(_, pairing)| pairing)
        .find(|pairing| pairing.involves(name))
}

/// Finds or creates the pairing for `name` in the current round.
///
/// Idempotent: a participant already paired gets its pairing back unchanged.
/// New pairings are written by swapping the whole registry, so a participant
/// can never be claimed by two pairings, even across different keys. Returns
/// None while no counterpart is free, or when every swap lost to another
/// writer; either way the caller polls again later.
pub async fn pair<S>(store: &S, name: &str, round: u32) -> anyhow::Result<Option<Pairing>>
where
    S: Store + ?Sized,
{
    let roster = records::<Participant>(store.get(PLAYERS).await?);
    let Some(role) = roster
        .iter()
        .find(|(key, _)| key == name)
        .filter(|(_, me)| me.is_assigned())
        .and_then(|(_, me)| me.role())
    else {
        return Ok(None);
    };
    for _ in 0..CAS_ATTEMPTS {
        let snapshot = store.get(MATCHES).await?;
        let pairings = records::<Pairing>(snapshot.clone());
        if let Some(pairing) = existing(name, &pairings) {
            return Ok(Some(pairing.clone()));
        }
        let Some((other, participant)) = counterpart(name, role, &roster, &pairings) else {
            log::debug!("no free {} for {} yet", role.opponent(), name);
            return Ok(None);
        };
        let pairing = match role {
            Role::Sender => roster
                .iter()
                .find(|(key, _)| key == name)
                .and_then(|(_, me)| me.guilt())
                .map(|guilt| Pairing::new(name, other, guilt, round)),
            Role::Receiver => participant
                .guilt()
                .map(|guilt| Pairing::new(other, name, guilt, round)),
        }
        .ok_or_else(|| anyhow::anyhow!("sender in {} / {} has no type", name, other))?;
        let mut registry = match snapshot.clone() {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        registry.insert(pairing.key(), serde_json::to_value(&pairing)?);
        if store.swap(MATCHES, snapshot, Some(Value::Object(registry))).await? {
            log::info!("paired {}", pairing.key());
            return Ok(Some(pairing));
        }
    }
    log::debug!("{} lost {} pairing races, retrying next poll", name, CAS_ATTEMPTS);
    Ok(None)
}
