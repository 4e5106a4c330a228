//! Custom actions for the offer actor.
//!
//! Seat inventory lives on the [`TicketOffer`](crate::model::TicketOffer) itself; these
//! actions are the only way it changes after the offer is listed.

/// Custom actions for offer entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferAction {
    /// Reads the remaining seat count without changing it.
    CheckAvailability,
    /// Takes one seat.
    ///
    /// # Errors
    /// Fails with [`OfferError::SoldOut`](super::OfferError::SoldOut) when none remain.
    ReserveSeat,
    /// Returns a previously reserved seat.
    ReleaseSeat,
}

/// Results from [`OfferAction`]s; variants match 1:1 with the actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferActionResult {
    CheckAvailability(u32),
    ReserveSeat { remaining: u32 },
    ReleaseSeat { remaining: u32 },
}
