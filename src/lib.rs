//! # Ticket Registration
//!
//! The registration flow of an event-ticketing site: pick a ticket offer, pay for it (or not,
//! if it is free) and walk away with exactly one issued ticket.
//!
//! ## 🏗️ How It Fits Together
//!
//! Offers and issued tickets are in-memory resources, each owned by its own
//! [`ResourceActor`](resource_actor::ResourceActor) task. The payment flow itself is a plain
//! state machine ([`workflow::RegistrationWorkflow`]) that talks to the offer actor through
//! an [`OfferClient`](clients::OfferClient) to hold and release seats.
//!
//! ```text
//! RegistrationWorkflow ──reserve/release seat──▶ offer actor   (TicketOffer store)
//!          │
//!          └──on_success(IssuedTicket)──▶ caller ──record_ticket──▶ ticket ledger actor
//! ```
//!
//! The workflow never writes to the ledger itself. Recording the ticket is up to whoever
//! receives the success callback.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. Data ([`model`], [`catalog`])
//! Offers, payment methods, form fields, issued tickets and the event context. [`catalog`]
//! derives the three standard tiers (general, VIP, student) from an event's seat count.
//!
//! ### 2. Actors ([`offer_actor`], [`ticket_actor`])
//! [`ActorEntity`](resource_actor::ActorEntity) implementations. The offer actor owns seat
//! inventory; the ticket ledger handles check-in and cancellation.
//!
//! ### 3. The Interface ([`clients`])
//! Domain wrappers around the generic `ResourceClient` that translate framework errors into
//! [`OfferError`](offer_actor::OfferError) and [`TicketError`](ticket_actor::TicketError).
//!
//! ### 4. The Flow ([`workflow`])
//! Stages, the payment attempt, the gateway seam and the controller.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`RegistrationSystem`](lifecycle::RegistrationSystem) starts and stops the actors for one
//! event; [`Config`](config::Config) reads timings from the environment.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Skip the simulated delays
//! REGISTRATION_PROCESSING_DELAY_MS=0 REGISTRATION_CONFIRMATION_DELAY_MS=0 cargo run
//! ```

pub mod catalog;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod offer_actor;
pub mod ticket_actor;
pub mod workflow;
