//! Custom actions for the ticket ledger.

/// Custom actions for issued tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketAction {
    /// Marks the ticket as used at the door.
    CheckIn,
    /// Voids the ticket. Checked-in tickets cannot be cancelled.
    Cancel,
}

/// Results from [`TicketAction`]s; both return the updated ticket.
#[derive(Debug, Clone, PartialEq)]
pub enum TicketActionResult {
    CheckIn(crate::model::IssuedTicket),
    Cancel(crate::model::IssuedTicket),
}
