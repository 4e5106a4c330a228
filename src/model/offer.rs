//! A purchasable ticket tier for an event.
//!
//! # Actor Framework
//! Implements [`ActorEntity`](resource_actor::ActorEntity) in
//! [`offer_actor::entity`](crate::offer_actor::entity). Offers are listed once per event
//! ([`OfferCreate`]) and afterwards only change through seat reservations
//! ([`OfferAction`](crate::offer_actor::OfferAction)).
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Tier identifier as the registration page uses it (`general`, `vip`, `student`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfferId(pub String);

impl From<&str> for OfferId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Display for OfferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketOffer {
    pub id: OfferId,
    pub name: String,
    pub description: String,
    /// Whole currency units; RWF has no minor unit.
    pub unit_price: u64,
    pub currency: String,
    pub remaining: u32,
    pub benefits: Vec<String>,
}

impl TicketOffer {
    pub fn is_free(&self) -> bool {
        self.unit_price == 0
    }

    pub fn is_available(&self) -> bool {
        self.remaining > 0
    }
}

/// Payload for listing an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferCreate {
    pub id: OfferId,
    pub name: String,
    pub description: String,
    pub unit_price: u64,
    pub currency: String,
    pub remaining: u32,
    pub benefits: Vec<String>,
}

impl From<OfferCreate> for TicketOffer {
    fn from(params: OfferCreate) -> Self {
        Self {
            id: params.id,
            name: params.name,
            description: params.description,
            unit_price: params.unit_price,
            currency: params.currency,
            remaining: params.remaining,
            benefits: params.benefits,
        }
    }
}
