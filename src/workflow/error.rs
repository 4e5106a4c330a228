//! Error types for the registration workflow.

use super::WorkflowStage;
use crate::model::OfferId;
use crate::offer_actor::OfferError;
use thiserror::Error;

/// Why a payment gateway refused or failed a charge.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    #[error("Payment declined: {0}")]
    Declined(String),

    #[error("Payment gateway timed out")]
    Timeout,

    #[error("Payment gateway unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WorkflowError {
    #[error("Offer not found: {0}")]
    OfferNotFound(OfferId),

    #[error("Offer sold out: {0}")]
    SoldOut(OfferId),

    /// A second attempt was opened while one is still running.
    #[error("A payment attempt is already in progress")]
    AttemptInProgress,

    #[error("No payment attempt is open")]
    NoActiveAttempt,

    #[error("Cannot {action} while {stage}")]
    InvalidTransition {
        stage: WorkflowStage,
        action: &'static str,
    },

    /// The workflow already issued its ticket.
    #[error("Registration already completed")]
    AlreadyCompleted,

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Offer(OfferError),
}

impl From<OfferError> for WorkflowError {
    fn from(e: OfferError) -> Self {
        match e {
            OfferError::NotFound(id) => WorkflowError::OfferNotFound(id),
            OfferError::SoldOut(id) => WorkflowError::SoldOut(id),
            other => WorkflowError::Offer(other),
        }
    }
}
