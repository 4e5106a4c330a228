//! # Registration Workflow
//!
//! The payment flow behind the "Register" button, as a state machine:
//!
//! ```text
//! SelectingMethod ──(free offer)──────────────────────────────▶ Success
//!        │  ▲
//!        ▼  │ change_method
//! EnteringDetails ──submit──▶ Processing ──approved──▶ Success
//!        │                        │
//!        │                        └──declined / timeout──▶ EnteringDetails
//!        └──cancel──▶ Cancelled   (also from SelectingMethod)
//! ```
//!
//! [`RegistrationWorkflow`] owns at most one [`PaymentAttempt`]. A seat is taken from the
//! offer while payment is processing and is only kept once the ticket is issued.
//!
//! ```rust
//! use ticket_registration::config::{Config, WorkflowConfig};
//! use ticket_registration::lifecycle::RegistrationSystem;
//! use ticket_registration::model::{AttendeeContext, EventId, EventRecord, OfferId, PaymentMethod};
//! use ticket_registration::workflow::MethodOutcome;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let event = EventRecord {
//!         id: EventId::from("tech-conference-2025"),
//!         title: "Tech Conference 2025".to_string(),
//!         date: chrono::NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
//!         start_time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//!         venue: "Kigali Convention Centre".to_string(),
//!         capacity: 500,
//!         available_seats: 100,
//!     };
//!     let config = Config { workflow: WorkflowConfig::immediate(), ..Config::default() };
//!     let system = RegistrationSystem::for_event(event, config).await?;
//!
//!     let attendee = AttendeeContext {
//!         user_id: "user_1".to_string(),
//!         display_name: "Aline Uwase".to_string(),
//!         email: "aline@example.com".to_string(),
//!     };
//!     let mut workflow = system.open_registration(attendee, |ticket| {
//!         println!("issued {}", ticket.ticket_id);
//!     });
//!
//!     workflow.begin(OfferId::from("general")).await?;
//!     let outcome = workflow.select_method(PaymentMethod::MobileMoney).await?;
//!     assert!(matches!(outcome, MethodOutcome::Issued(ref t) if t.amount == 0));
//!
//!     drop(workflow);
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod attempt;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod stage;

pub use attempt::*;
pub use controller::*;
pub use error::*;
pub use gateway::*;
pub use stage::*;
