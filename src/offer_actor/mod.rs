//! # Offer Actor
//!
//! Hosts the ticket offers listed for one event and owns their seat inventory.
//!
//! ## Structure
//!
//! - [`entity`]: [`ActorEntity`](resource_actor::ActorEntity) implementation for
//!   [`TicketOffer`]
//! - [`error`]: [`OfferError`]
//! - [`actions`]: [`OfferAction`] and [`OfferActionResult`]
//! - [`new()`]: factory returning the actor and its raw client
//!
//! ## Usage
//!
//! ```rust
//! use ticket_registration::clients::OfferClient;
//! use ticket_registration::model::{OfferCreate, OfferId};
//! use ticket_registration::offer_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = offer_actor::new(32);
//!     let client = OfferClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     client.list_offer(OfferCreate {
//!         id: OfferId::from("vip"),
//!         name: "VIP Access".to_string(),
//!         description: "Premium experience".to_string(),
//!         unit_price: 25_000,
//!         currency: "RWF".to_string(),
//!         remaining: 2,
//!         benefits: vec![],
//!     }).await?;
//!
//!     let remaining = client.reserve_seat(OfferId::from("vip")).await?;
//!     assert_eq!(remaining, 1);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::TicketOffer;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new offer actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<TicketOffer>, ResourceClient<TicketOffer>) {
    ResourceActor::new(buffer_size)
}
