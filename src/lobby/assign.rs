use super::*;
use crate::CAS_ATTEMPTS;
use crate::PLAYERS;
use crate::game::*;
use crate::store::*;
use serde_json::Map;
use serde_json::Value;

/// Fills the Sender pool first, up to half of the expected class, then
/// the Receiver pool. Arrival order decides, not a lottery.
pub fn balance(senders: usize, expected: usize) -> Role {
    if senders < expected / 2 {
        Role::Sender
    } else {
        Role::Receiver
    }
}

/// Gives `name` a role (and a type, if it lands in the Sender pool).
///
/// The whole registry is swapped atomically, so two participants assigned
/// at the same time cannot both see the same pool counts. Already-assigned
/// participants are returned untouched. None if every swap lost to another
/// writer; the participant stays unassigned and tries again on its next poll.
pub async fn assign<S>(
    store: &S,
    name: &str,
    expected: usize,
    coin: Guilt,
) -> anyhow::Result<Option<Participant>>
where
    S: Store + ?Sized,
{
    for _ in 0..CAS_ATTEMPTS {
        let snapshot = store.get(PLAYERS).await?;
        let roster = records::<Participant>(snapshot.clone());
        let me = roster
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, participant)| participant.clone())
            .ok_or_else(|| anyhow::anyhow!("{} is not registered", name))?;
        if me.is_assigned() {
            return Ok(Some(me));
        }
        let senders = roster
            .iter()
            .filter(|(key, p)| key != name && p.role() == Some(Role::Sender))
            .count();
        let me = me.assign(balance(senders, expected), coin);
        let mut registry = match snapshot.clone() {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        registry.insert(name.to_string(), serde_json::to_value(&me)?);
        if store.swap(PLAYERS, snapshot, Some(Value::Object(registry))).await? {
            log::info!(
                "{} assigned {}{}",
                name,
                me.role().map(|r| r.to_string()).unwrap_or_default(),
                me.guilt().map(|g| format!(" ({})", g)).unwrap_or_default()
            );
            return Ok(Some(me));
        }
    }
    log::debug!("{} lost {} assignment races, retrying next poll", name, CAS_ATTEMPTS);
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn registered(names: &[&str]) -> Memory {
        let store = Memory::default();
        for name in names {
            let record = serde_json::to_value(Participant::default()).unwrap();
            store.set(&join([PLAYERS, *name]), record).await.unwrap();
        }
        store
    }

    #[test]
    fn fills_senders_first() {
        assert_eq!(balance(0, 4), Role::Sender);
        assert_eq!(balance(1, 4), Role::Sender);
        assert_eq!(balance(2, 4), Role::Receiver);
        assert_eq!(balance(0, 0), Role::Receiver);
    }

    #[tokio::test]
    async fn even_split() {
        let names = ["a", "b", "c", "d", "e", "f"];
        let store = registered(&names).await;
        let mut roles = Vec::new();
        for name in names {
            let me = assign(&store, name, 6, Guilt::Innocent).await.unwrap().unwrap();
            roles.push(me.role());
        }
        let senders = roles.iter().filter(|r| **r == Some(Role::Sender)).count();
        assert_eq!(senders, 3);
        assert_eq!(roles[..3], [Some(Role::Sender); 3]);
    }

    #[tokio::test]
    async fn at_most_once() {
        let store = registered(&["a"]).await;
        let first = assign(&store, "a", 2, Guilt::Guilty).await.unwrap();
        let again = assign(&store, "a", 2, Guilt::Innocent).await.unwrap();
        assert!(first.is_some());
        assert_eq!(first, again);
        assert_eq!(again.and_then(|p| p.guilt()), Some(Guilt::Guilty));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_assignments_stay_balanced() {
        let names = (0..40).map(|i| format!("s{:02}", i)).collect::<Vec<_>>();
        let store = std::sync::Arc::new(Yielding::default());
        for name in &names {
            let record = serde_json::to_value(Participant::default()).unwrap();
            store.set(&join([PLAYERS, name.as_str()]), record).await.unwrap();
        }
        let handles = names
            .iter()
            .cloned()
            .map(|name| {
                let store = store.clone();
                tokio::spawn(async move {
                    loop {
                        match assign(&*store, &name, 40, Guilt::Innocent).await? {
                            Some(me) => return anyhow::Ok(me),
                            None => tokio::task::yield_now().await,
                        }
                    }
                })
            })
            .collect::<Vec<_>>();
        let mut senders = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().role() == Some(Role::Sender) {
                senders += 1;
            }
        }
        assert_eq!(senders, 20);
        let roster = records::<Participant>(store.get(PLAYERS).await.unwrap());
        assert!(roster.iter().all(|(_, p)| p.is_assigned()));
        let stored = roster
            .iter()
            .filter(|(_, p)| p.role() == Some(Role::Sender))
            .count();
        assert_eq!(stored, 20);
    }

    #[tokio::test]
    async fn lost_races_leave_participant_unassigned() {
        let store = Contended::new(&[PLAYERS]);
        let record = serde_json::to_value(Participant::default()).unwrap();
        store.set(&join([PLAYERS, "a"]), record).await.unwrap();
        assert_eq!(assign(&store, "a", 2, Guilt::Guilty).await.unwrap(), None);
        let roster = records::<Participant>(store.get(PLAYERS).await.unwrap());
        assert!(!roster[0].1.is_assigned());
    }

    #[tokio::test]
    async fn retries_half_written_record() {
        let store = Memory::default();
        store.set(&join([PLAYERS, "a"]), json!({ "role": "eBay" })).await.unwrap();
        let me = assign(&store, "a", 2, Guilt::Guilty).await.unwrap().unwrap();
        assert_eq!(me.role(), Some(Role::Sender));
        assert_eq!(me.guilt(), Some(Guilt::Guilty));
    }

    #[tokio::test]
    async fn unknown_participant() {
        let store = Memory::default();
        assert!(assign(&store, "ghost", 2, Guilt::Guilty).await.is_err());
    }
}
