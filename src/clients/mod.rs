//! Domain clients wrapping [`ResourceClient`](resource_actor::ResourceClient).

pub mod offer_client;
pub mod ticket_client;

pub use offer_client::*;
pub use ticket_client::*;
