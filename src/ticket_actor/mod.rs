//! # Ticket Ledger Actor
//!
//! In-memory record of issued tickets, backing the "my tickets" and ticket detail views.
//! Nothing is written to disk; the ledger lives as long as its
//! [`RegistrationSystem`](crate::lifecycle::RegistrationSystem).
//!
//! - [`entity`]: [`ActorEntity`](resource_actor::ActorEntity) implementation for
//!   [`IssuedTicket`]
//! - [`actions`]: check-in and cancellation
//! - [`error`]: [`TicketError`]

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::IssuedTicket;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new ticket ledger actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<IssuedTicket>, ResourceClient<IssuedTicket>) {
    ResourceActor::new(buffer_size)
}
