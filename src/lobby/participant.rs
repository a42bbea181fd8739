use crate::VERSUS;
use crate::game::*;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Characters the document store cannot hold in a key.
const FORBIDDEN: [char; 6] = ['/', '.', '#', '$', '[', ']'];

/// Registry entry for one student, keyed in the store by display name.
///
/// Role and guilt start out absent and are attached exactly once. A record
/// whose role is missing (say, a session died between registration and
/// assignment) is simply assigned again on the next pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    guilt: Option<Guilt>,
    #[serde(default = "Utc::now")]
    joined: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned: Option<DateTime<Utc>>,
}

impl Default for Participant {
    fn default() -> Self {
        Self {
            role: None,
            guilt: None,
            joined: Utc::now(),
            assigned: None,
        }
    }
}

impl Participant {
    /// Normalizes a display name into a store key.
    pub fn key(name: &str) -> anyhow::Result<&str> {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!("name must not be empty");
        }
        if name.contains(&FORBIDDEN[..]) || name.contains(VERSUS) {
            anyhow::bail!("name {:?} contains a reserved character sequence", name);
        }
        Ok(name)
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }
    pub fn guilt(&self) -> Option<Guilt> {
        self.guilt
    }
    pub fn joined(&self) -> DateTime<Utc> {
        self.joined
    }
    pub fn assigned(&self) -> Option<DateTime<Utc>> {
        self.assigned
    }
    /// A Sender without a type is as good as unassigned.
    pub fn is_assigned(&self) -> bool {
        match self.role {
            Some(Role::Sender) => self.guilt.is_some(),
            Some(Role::Receiver) => true,
            None => false,
        }
    }

    /// Attaches role and, for Senders, the pre-drawn coin. No-op once assigned.
    /// A role left behind by an interrupted write is kept.
    pub fn assign(mut self, role: Role, coin: Guilt) -> Self {
        if self.is_assigned() {
            return self;
        }
        let role = self.role.unwrap_or(role);
        self.role = Some(role);
        self.guilt = match role {
            Role::Sender => Some(coin),
            Role::Receiver => None,
        };
        self.assigned = Some(Utc::now());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys() {
        assert_eq!(Participant::key("  Alice ").unwrap(), "Alice");
        assert!(Participant::key("   ").is_err());
        assert!(Participant::key("a/b").is_err());
        assert!(Participant::key("x.y").is_err());
        assert!(Participant::key("Al_vs_Bo").is_err());
    }

    #[test]
    fn assignment_is_permanent() {
        let sender = Participant::default().assign(Role::Sender, Guilt::Guilty);
        assert_eq!(sender.role(), Some(Role::Sender));
        assert_eq!(sender.guilt(), Some(Guilt::Guilty));
        let again = sender.clone().assign(Role::Receiver, Guilt::Innocent);
        assert_eq!(again, sender);
    }

    #[test]
    fn receivers_have_no_type() {
        let receiver = Participant::default().assign(Role::Receiver, Guilt::Guilty);
        assert_eq!(receiver.guilt(), None);
        assert!(receiver.is_assigned());
    }

    #[test]
    fn legacy_record_without_role() {
        let record = serde_json::json!({ "joined": "2024-03-01T10:00:00Z" });
        let participant = serde_json::from_value::<Participant>(record).unwrap();
        assert!(!participant.is_assigned());
    }
}
