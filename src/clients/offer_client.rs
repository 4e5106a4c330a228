//! # Offer Client
//!
//! High-level API for the offer actor: listing offers and moving seats in and out of
//! inventory.
use crate::model::{OfferCreate, OfferId, TicketOffer};
use crate::offer_actor::{OfferAction, OfferActionResult, OfferError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the offer actor.
#[derive(Clone)]
pub struct OfferClient {
    inner: ResourceClient<TicketOffer>,
}

#[async_trait]
impl ActorClient<TicketOffer> for OfferClient {
    type Error = OfferError;

    fn inner(&self) -> &ResourceClient<TicketOffer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> OfferError {
        match e {
            FrameworkError::NotFound(id) => OfferError::NotFound(OfferId(id)),
            FrameworkError::AlreadyExists(id) => OfferError::AlreadyListed(OfferId(id)),
            other => match other.downcast_entity::<OfferError>() {
                Some(domain) => domain.clone(),
                None => OfferError::ActorCommunicationError(other.to_string()),
            },
        }
    }
}

impl OfferClient {
    pub fn new(inner: ResourceClient<TicketOffer>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(offer_id = %params.id))]
    pub async fn list_offer(&self, params: OfferCreate) -> Result<OfferId, OfferError> {
        debug!(?params, "list_offer called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Fetches one offer, treating an unknown id as an error.
    #[instrument(skip(self))]
    pub async fn offer(&self, id: OfferId) -> Result<TicketOffer, OfferError> {
        self.get(id.clone())
            .await?
            .ok_or(OfferError::NotFound(id))
    }

    /// Every listed offer, ordered by id.
    pub async fn offers(&self) -> Result<Vec<TicketOffer>, OfferError> {
        self.list().await
    }

    /// Seats still available for `id`.
    #[instrument(skip(self))]
    pub async fn check_availability(&self, id: OfferId) -> Result<u32, OfferError> {
        match self.action(id, OfferAction::CheckAvailability).await? {
            OfferActionResult::CheckAvailability(remaining) => Ok(remaining),
            other => Err(unexpected(other)),
        }
    }

    /// Takes one seat. Returns how many remain afterwards.
    #[instrument(skip(self))]
    pub async fn reserve_seat(&self, id: OfferId) -> Result<u32, OfferError> {
        debug!("Reserving seat");
        match self.action(id, OfferAction::ReserveSeat).await? {
            OfferActionResult::ReserveSeat { remaining } => Ok(remaining),
            other => Err(unexpected(other)),
        }
    }

    /// Puts one seat back. Returns how many remain afterwards.
    #[instrument(skip(self))]
    pub async fn release_seat(&self, id: OfferId) -> Result<u32, OfferError> {
        debug!("Releasing seat");
        match self.action(id, OfferAction::ReleaseSeat).await? {
            OfferActionResult::ReleaseSeat { remaining } => Ok(remaining),
            other => Err(unexpected(other)),
        }
    }

    async fn action(
        &self,
        id: OfferId,
        action: OfferAction,
    ) -> Result<OfferActionResult, OfferError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: OfferActionResult) -> OfferError {
    OfferError::ActorCommunicationError(format!("mismatched action result: {result:?}"))
}
