//! # Resource Actor
//!
//! In-memory resource stores that live inside their own Tokio task. Each resource type
//! (ticket offers, issued tickets) gets one [`ResourceActor`] that owns the store and
//! processes requests one at a time, so the store never needs a lock.
//!
//! ## Pieces
//!
//! - [`ActorEntity`]: the contract a resource implements (id, creation payload, custom actions).
//! - [`ResourceActor`]: the server half. Owns the store and runs the message loop.
//! - [`ResourceClient`]: the cloneable client half. Sends requests and awaits one-shot replies.
//! - [`ActorClient`]: default `get` / `list` for domain-specific client wrappers.
//! - [`mock`]: in-memory stand-ins for clients so callers can be tested without actors.
//!
//! ## Request Flow
//!
//! ```text
//! OfferClient::reserve_seat(id)
//!   -> ResourceClient::perform_action(id, ReserveSeat)
//!     -> mpsc channel -> ResourceActor::run loop
//!       -> TicketOffer::handle_action(ReserveSeat, &ctx)
//!     <- oneshot reply
//! ```
//!
//! ## Shutdown
//!
//! An actor stops when every client (every sender) has been dropped. Owners keep the
//! `JoinHandle` returned by `tokio::spawn(actor.run(ctx))` and await it after dropping
//! their clients.
//!
//! ## Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use resource_actor::{ActorEntity, ResourceActor};
//!
//! #[derive(Clone, Debug)]
//! struct Seat { id: u32, taken: bool }
//! #[derive(Debug)] struct SeatCreate { id: u32 }
//! #[derive(Debug)] enum SeatAction { Take }
//! #[derive(Debug, thiserror::Error)] #[error("seat already taken")] struct SeatTaken;
//!
//! #[async_trait]
//! impl ActorEntity for Seat {
//!     type Id = u32; type Create = SeatCreate; type Action = SeatAction;
//!     type ActionResult = (); type Context = (); type Error = SeatTaken;
//!     fn from_create_params(params: SeatCreate) -> Result<Self, SeatTaken> {
//!         Ok(Self { id: params.id, taken: false })
//!     }
//!     fn id(&self) -> u32 { self.id }
//!     async fn handle_action(&mut self, _: SeatAction, _: &()) -> Result<(), SeatTaken> {
//!         if self.taken { return Err(SeatTaken); }
//!         self.taken = true;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Seat>::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(SeatCreate { id: 7 }).await.unwrap();
//!     client.perform_action(id, SeatAction::Take).await.unwrap();
//!     assert!(client.perform_action(id, SeatAction::Take).await.is_err());
//! }
//! ```

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
