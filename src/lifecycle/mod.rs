//! Starting, wiring and stopping the registration actors.

pub mod registration_system;
pub mod tracing;

pub use registration_system::*;
pub use self::tracing::setup_tracing;
