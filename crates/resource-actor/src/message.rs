//! # Messages
//!
//! Requests sent from a [`ResourceClient`](crate::ResourceClient) to its
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// One-shot reply channel carried by every request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to the actor.
///
/// Resources here are loaded once and then only change through their own actions
/// (a seat is reserved, a ticket is checked in), so the request set is
/// create / read / list plus the entity's custom `Action`.
///
/// - **Create**: inserts a new entity built from [`ActorEntity::Create`]. Replies with its id.
/// - **Get**: fetches a snapshot of one entity.
/// - **List**: fetches snapshots of every entity, ordered by id.
/// - **Action**: runs an [`ActorEntity::Action`] against one entity.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
