use crate::Utility;
use crate::VERSUS;
use crate::game::*;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// One Sender facing one Receiver for a round.
///
/// The Sender's type is copied in at pairing time. Receiver-facing views
/// never read it; the Receiver learns about it only through the offer.
/// Offer and response are each written once, in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    sender: String,
    receiver: String,
    guilt: Guilt,
    #[serde(default = "first")]
    round: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    offer: Option<Offer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    response: Option<Response>,
    #[serde(default = "Utc::now")]
    created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    offered: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    responded: Option<DateTime<Utc>>,
}

fn first() -> u32 {
    1
}

impl Pairing {
    pub fn new(sender: &str, receiver: &str, guilt: Guilt, round: u32) -> Self {
        Self {
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            guilt,
            round,
            offer: None,
            response: None,
            created: Utc::now(),
            offered: None,
            responded: None,
        }
    }

    /// Canonical store key. Sender first, so both sides derive the same key.
    pub fn key(&self) -> String {
        format!("{}{}{}", self.sender, VERSUS, self.receiver)
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }
    pub fn receiver(&self) -> &str {
        &self.receiver
    }
    pub fn guilt(&self) -> Guilt {
        self.guilt
    }
    pub fn round(&self) -> u32 {
        self.round
    }
    pub fn moves(&self) -> (Option<Offer>, Option<Response>) {
        (self.offer, self.response)
    }
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }
    pub fn offered(&self) -> Option<DateTime<Utc>> {
        self.offered
    }
    pub fn responded(&self) -> Option<DateTime<Utc>> {
        self.responded
    }
    pub fn stage(&self) -> Stage {
        Stage::from(self.moves())
    }

    pub fn involves(&self, name: &str) -> bool {
        self.sender == name || self.receiver == name
    }

    pub fn role_of(&self, name: &str) -> Option<Role> {
        if self.sender == name {
            Some(Role::Sender)
        } else if self.receiver == name {
            Some(Role::Receiver)
        } else {
            None
        }
    }

    pub fn counterpart(&self, name: &str) -> Option<&str> {
        match self.role_of(name)? {
            Role::Sender => Some(self.receiver.as_str()),
            Role::Receiver => Some(self.sender.as_str()),
        }
    }

    /// Sender's move. Generous offers settle the pairing on the spot,
    /// since the only answer to them is Accept.
    pub fn offer(mut self, offer: Offer) -> anyhow::Result<Self> {
        if self.stage() != Stage::AwaitingOffer {
            anyhow::bail!("{} already has an offer on the table", self.key());
        }
        if !offer.allowed(self.guilt) {
            anyhow::bail!("{} offer is not available to a {} sender", offer, self.guilt);
        }
        let now = Utc::now();
        self.offer = Some(offer);
        self.offered = Some(now);
        if let Some(response) = Response::forced(offer) {
            self.response = Some(response);
            self.responded = Some(now);
        }
        Ok(self)
    }

    /// Receiver's move.
    pub fn respond(mut self, response: Response) -> anyhow::Result<Self> {
        let offer = match (self.stage(), self.offer) {
            (Stage::AwaitingResponse, Some(offer)) => offer,
            (Stage::AwaitingOffer, _) => anyhow::bail!("{} has no offer yet", self.key()),
            _ => anyhow::bail!("{} is already settled", self.key()),
        };
        if !response.allowed(offer) {
            anyhow::bail!("{} is not a valid answer to a {} offer", response, offer);
        }
        self.response = Some(response);
        self.responded = Some(Utc::now());
        Ok(self)
    }

    /// (sender, receiver) payoff once the pairing is complete.
    pub fn payoff(&self, table: &PayoffTable) -> Option<(Utility, Utility)> {
        match self.moves() {
            (Some(offer), Some(response)) => Some(table.lookup(self.guilt, offer, response)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Pairing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.key(), self.stage())
    }
}
