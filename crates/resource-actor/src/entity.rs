//! # ActorEntity Trait
//!
//! The contract every resource hosted by a [`ResourceActor`](crate::ResourceActor) implements.
//!
//! Entities carry their own identifier. Offers are keyed by the tier id the event page uses
//! (`"general"`, `"vip"`), and tickets by the id generated when they are issued, so the actor
//! never invents ids. It only refuses duplicates.
//!
//! # Provided Methods
//! [`ActorEntity::on_create`] defaults to a no-op. Override it to validate a new entity
//! against other actors reachable through the injected `Context`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can call other actors. The `Context` type is injected
/// into every hook at `run()` time rather than at construction, which lets actors be created
/// first and wired together afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier. `Ord` keeps `List` results in a stable order.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug;

    /// Payload used to create a new instance.
    type Create: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `ReserveSeat`).
    type Action: Send + Sync + Debug;

    /// Result returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into the actor. Use `()` when there are none.
    type Context: Send + Sync;

    /// One error enum per resource, shared by every hook and action.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Builds the entity from its creation payload. Called before `on_create`.
    fn from_create_params(params: Self::Create) -> Result<Self, Self::Error>;

    /// The key this entity is stored under.
    fn id(&self) -> Self::Id;

    /// Called after construction and before the entity becomes visible to other requests.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handles a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
