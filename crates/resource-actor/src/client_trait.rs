//! # ActorClient Trait
//!
//! Shared read operations for domain clients that wrap a [`ResourceClient`].
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard read operations.
///
/// A wrapper supplies access to its inner [`ResourceClient`] and a mapping from
/// [`FrameworkError`] into its own error type, and gets `get` and `list` for free.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use resource_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
///
/// #[derive(Clone, Debug)] struct Venue { id: u32 }
/// #[derive(Debug)] struct VenueCreate { id: u32 }
/// #[derive(Debug)] enum VenueAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct VenueError(String);
///
/// #[async_trait]
/// impl ActorEntity for Venue {
///     type Id = u32; type Create = VenueCreate; type Action = VenueAction;
///     type ActionResult = (); type Context = (); type Error = VenueError;
///     fn from_create_params(p: VenueCreate) -> Result<Self, VenueError> { Ok(Self { id: p.id }) }
///     fn id(&self) -> u32 { self.id }
///     async fn handle_action(&mut self, a: VenueAction, _: &()) -> Result<(), VenueError> {
///         match a {}
///     }
/// }
///
/// struct VenueClient { inner: ResourceClient<Venue> }
///
/// #[async_trait]
/// impl ActorClient<Venue> for VenueClient {
///     type Error = VenueError;
///     fn inner(&self) -> &ResourceClient<Venue> { &self.inner }
///     fn map_error(e: FrameworkError) -> VenueError { VenueError(e.to_string()) }
/// }
///
/// async fn usage(client: VenueClient) {
///     // get() and list() are provided
///     let _ = client.get(1).await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity, ordered by ID.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
