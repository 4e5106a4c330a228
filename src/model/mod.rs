//! Plain data for the registration flow: events, offers, payment details and issued tickets.
//!
//! [`TicketOffer`] and [`IssuedTicket`] are hosted by resource actors; see
//! [`offer_actor`](crate::offer_actor) and [`ticket_actor`](crate::ticket_actor) for their
//! [`ActorEntity`](resource_actor::ActorEntity) implementations.

pub mod event;
pub mod offer;
pub mod payment;
pub mod ticket;

pub use event::*;
pub use offer::*;
pub use payment::*;
pub use ticket::*;
