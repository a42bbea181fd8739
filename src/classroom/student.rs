use super::*;
use crate::players::*;
use crate::store::*;
use std::sync::Arc;
use std::time::Duration;

/// Runs one participant's poll-and-rerun loop in its own task.
///
/// - registers, then polls every `interval`
/// - asks the Agent for a move whenever the status is actionable
/// - stops once the status is final for the round
pub struct Student {
    name: String,
    agent: Box<dyn Agent>,
    interval: Duration,
}

impl Student {
    pub fn new(name: &str, agent: Box<dyn Agent>, interval: Duration) -> Self {
        Self {
            name: name.to_string(),
            agent,
            interval,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spawns the loop; the handle resolves to the last status seen
    /// together with the Student, so it can attend the next round.
    pub fn spawn<S>(
        mut self,
        classroom: Arc<Classroom<S>>,
    ) -> tokio::task::JoinHandle<(Self, anyhow::Result<Status>)>
    where
        S: Store + 'static,
    {
        tokio::spawn(async move {
            let result = self.attend(&classroom).await;
            (self, result)
        })
    }

    /// Registration failures end the loop. Anything that goes wrong after
    /// that is logged and retried on the next pass, since the store is the
    /// only source of truth and a fresh poll sees whatever did land.
    pub async fn attend<S>(&mut self, classroom: &Classroom<S>) -> anyhow::Result<Status>
    where
        S: Store,
    {
        classroom.register(&self.name).await?;
        loop {
            match self.pass(classroom).await {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {}
                Err(e) => log::warn!("{} retries after: {}", self.name, e),
            }
            tokio::time::sleep(self.interval).await;
        }
    }

    /// One poll, plus the move it calls for. Some once the loop should stop.
    async fn pass<S>(&mut self, classroom: &Classroom<S>) -> anyhow::Result<Option<Status>>
    where
        S: Store,
    {
        let status = classroom.poll(&self.name).await?;
        match status {
            Status::Choosing { guilt, ref menu, .. } => {
                let offer = self.agent.offer(guilt, menu);
                classroom.offer(&self.name, offer).await?;
                Ok(None)
            }
            Status::Answering { offer, ref menu, .. } => {
                let response = self.agent.respond(offer, menu);
                classroom.respond(&self.name, response).await?;
                Ok(None)
            }
            Status::Unconfigured => {
                log::warn!("{} stops: {}", self.name, status);
                Ok(Some(status))
            }
            status if status.is_final() => {
                log::debug!("{} done: {}", self.name, status);
                Ok(Some(status))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lobby::*;
    use crate::store::Memory;

    fn student(name: &str, seed: u64) -> Student {
        Student::new(name, Box::new(Coin::new(seed)), Duration::from_millis(1))
    }

    #[tokio::test]
    async fn unconfigured_halts() {
        let classroom = Arc::new(Classroom::seeded(Memory::default(), 0));
        let (_, status) = student("Alice", 0).spawn(classroom).await.unwrap();
        assert_eq!(status.unwrap(), Status::Unconfigured);
    }

    #[tokio::test]
    async fn whole_class_settles() {
        let classroom = Arc::new(Classroom::seeded(Memory::default(), 3));
        classroom.configure(10).await.unwrap();
        let handles = (0..10)
            .map(|i| student(&format!("student{}", i), i).spawn(classroom.clone()))
            .collect::<Vec<_>>();
        for handle in handles {
            let (_, status) = handle.await.unwrap();
            assert!(matches!(status.unwrap(), Status::Settled { .. }));
        }
        let pairings = classroom.pairings(Scope::Live).await.unwrap();
        assert_eq!(pairings.len(), 5);
        for pairing in &pairings {
            assert!(pairing.stage().is_terminal());
            if pairing.guilt() == crate::game::Guilt::Innocent {
                assert_ne!(pairing.moves().0, Some(crate::game::Offer::Generous));
            }
        }
        let roster = records::<Participant>(classroom.store().get(crate::PLAYERS).await.unwrap());
        assert_eq!(roster.len(), 10);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn crowded_class_settles_everyone() {
        let classroom = Arc::new(Classroom::seeded(Yielding::default(), 5));
        classroom.configure(80).await.unwrap();
        let handles = (0..80)
            .map(|i| student(&format!("s{:02}", i), i).spawn(classroom.clone()))
            .collect::<Vec<_>>();
        let settled = tokio::time::timeout(
            Duration::from_secs(30),
            futures::future::join_all(handles),
        )
        .await
        .expect("every student finishes");
        for result in settled {
            let (student, status) = result.unwrap();
            match status.unwrap() {
                Status::Settled { .. } => {}
                other => panic!("{} ended on {:?}", student.name(), other),
            }
        }
        let overview = classroom.overview().await.unwrap();
        assert_eq!(overview.senders, 40);
        assert_eq!(overview.receivers, 40);
        let pairings = classroom.pairings(Scope::Live).await.unwrap();
        assert_eq!(pairings.len(), 40);
        let mut seen = std::collections::HashSet::new();
        for pairing in &pairings {
            assert!(seen.insert(pairing.sender().to_string()));
            assert!(seen.insert(pairing.receiver().to_string()));
        }
    }
}
