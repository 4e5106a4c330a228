//! A ticket produced by a completed registration.
//!
//! # Actor Framework
//! Implements [`ActorEntity`](resource_actor::ActorEntity) in
//! [`ticket_actor::entity`](crate::ticket_actor::entity), keyed by [`TicketId`]. The
//! workflow builds the ticket; recording it in the ledger is the caller's decision.
use crate::model::{EventId, OfferId, PaymentMethod};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uuid::Uuid;

/// Type-safe identifier for tickets, rendered as `TKT-` plus 32 upper-case hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketId(pub Uuid);

impl TicketId {
    /// A fresh random (v4) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TKT-{}", self.0.simple().to_string().to_uppercase())
    }
}

/// How the ticket was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPayment {
    FreeRegistration,
    Paid(PaymentMethod),
}

impl TicketPayment {
    pub fn label(self) -> &'static str {
        match self {
            TicketPayment::FreeRegistration => "Free Registration",
            TicketPayment::Paid(method) => method.name(),
        }
    }
}

impl Display for TicketPayment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Confirmed,
    Pending,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum CheckInStatus {
    NotCheckedIn,
    CheckedIn { at: DateTime<Utc> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuedTicket {
    pub ticket_id: TicketId,
    pub event_id: EventId,
    pub event_title: String,
    pub attendee_id: String,
    pub offer_id: OfferId,
    /// Offer name at the time of purchase, e.g. "VIP Access".
    pub ticket_type: String,
    pub payment_method: TicketPayment,
    pub payment_status: PaymentStatus,
    pub amount: u64,
    pub currency: String,
    pub status: TicketStatus,
    pub check_in: CheckInStatus,
    pub purchased_at: DateTime<Utc>,
}

impl IssuedTicket {
    pub fn is_checked_in(&self) -> bool {
        matches!(self.check_in, CheckInStatus::CheckedIn { .. })
    }

    /// Case-insensitive substring match on the event title or the `TKT-` id.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.event_title.to_lowercase().contains(&term)
            || self.ticket_id.to_string().to_lowercase().contains(&term)
    }
}
