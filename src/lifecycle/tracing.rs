//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`.
//! Module paths are hidden (`with_target(false)`); the actor loop tags its lines with
//! `entity_type` and the workflow with `offer_id` and `stage` instead.
//!
//! ## Usage
//!
//! ```bash
//! # Stage changes, issued tickets, actor lifecycle
//! RUST_LOG=info cargo run
//!
//! # Also charge requests, seat holds and full payloads
//! RUST_LOG=debug cargo run
//!
//! # Only the workflow
//! RUST_LOG=ticket_registration::workflow=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! A VIP purchase paid with mobile money, at `RUST_LOG=info`:
//!
//! ```text
//! INFO begin: Payment attempt opened offer_id=vip price=25000 attendee="user_1"
//! INFO begin: Stage changed offer_id=vip stage=selecting_method attendee="user_1"
//! INFO select_method: Stage changed offer_id=vip stage=entering_details method=MobileMoney
//! INFO submit: Stage changed offer_id=vip stage=processing attendee="user_1"
//! INFO Action ok entity_type="TicketOffer" id=vip
//! INFO submit: Stage changed offer_id=vip stage=success attendee="user_1"
//! INFO submit: Ticket issued ticket_id=TKT-4F1C... amount=25000 attendee="user_1"
//! ```
//!
//! With `RUST_LOG=debug` the charge request and form values are logged once, at the point the
//! gateway is called.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and offer_id identify the source instead
        .compact()
        .init();
}
