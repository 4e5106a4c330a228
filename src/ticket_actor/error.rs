//! Error types for the ticket ledger.

use crate::model::TicketId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TicketError {
    #[error("Ticket not found: {0}")]
    NotFound(TicketId),

    #[error("Ticket already checked in: {0}")]
    AlreadyCheckedIn(TicketId),

    /// Pending and cancelled tickets cannot be used.
    #[error("Ticket is not confirmed: {0}")]
    NotConfirmed(TicketId),

    #[error("Ticket already recorded: {0}")]
    AlreadyRecorded(TicketId),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
