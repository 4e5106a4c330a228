//! Error types for the offer actor.

use crate::model::OfferId;
use thiserror::Error;

/// Errors that can occur during offer operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OfferError {
    /// No offer with this id is listed for the event.
    #[error("Offer not found: {0}")]
    NotFound(OfferId),

    /// Every seat of the offer is taken.
    #[error("Offer sold out: {0}")]
    SoldOut(OfferId),

    /// An offer with this id is already listed.
    #[error("Offer already listed: {0}")]
    AlreadyListed(OfferId),

    /// The listing payload is unusable.
    #[error("Invalid offer: {0}")]
    Invalid(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
