use crate::catalog;
use crate::clients::{OfferClient, TicketClient};
use crate::config::Config;
use crate::model::{AttendeeContext, EventRecord, IssuedTicket, RegistrationContext};
use crate::offer_actor::OfferError;
use crate::workflow::{RegistrationWorkflow, SimulatedGateway};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Failed to list offers: {0}")]
    Offer(#[from] OfferError),

    #[error("Actor task failed: {0}")]
    ActorTask(String),
}

/// Runs the actors behind one event's registration page.
///
/// `RegistrationSystem` is responsible for:
/// - **Lifecycle Management**: starting the offer and ticket ledger actors and stopping them
/// - **Seeding**: listing the event's standard offers before any attendee can register
/// - **Wiring**: handing each new [`RegistrationWorkflow`] its event context and offer client
///
/// # Example
///
/// ```ignore
/// let system = RegistrationSystem::for_event(event, Config::from_env()).await?;
/// let mut workflow = system.open_registration(attendee, |ticket| println!("{ticket:?}"));
/// // ... drive the workflow ...
/// system.shutdown().await?;
/// ```
pub struct RegistrationSystem {
    /// Client for the offer actor
    pub offer_client: OfferClient,

    /// Client for the ticket ledger actor
    pub ticket_client: TicketClient,

    event: EventRecord,
    config: Config,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl RegistrationSystem {
    /// Starts both actors and lists the event's standard offers.
    pub async fn for_event(event: EventRecord, config: Config) -> Result<Self, SystemError> {
        let (offer_actor, offer_client) = crate::offer_actor::new(config.actor_buffer);
        let (ticket_actor, ticket_client) = crate::ticket_actor::new(config.actor_buffer);

        let offer_handle = tokio::spawn(offer_actor.run(()));
        let ticket_handle = tokio::spawn(ticket_actor.run(()));

        let offer_client = OfferClient::new(offer_client);
        let ticket_client = TicketClient::new(ticket_client);

        for offer in catalog::standard_offers(&event) {
            offer_client.list_offer(offer).await?;
        }
        info!(event_id = %event.id, seats = event.available_seats, "Registration open");

        Ok(Self {
            offer_client,
            ticket_client,
            event,
            config,
            handles: vec![offer_handle, ticket_handle],
        })
    }

    pub fn event(&self) -> &EventRecord {
        &self.event
    }

    /// A fresh workflow for `attendee`, paying through the simulated gateway.
    pub fn open_registration(
        &self,
        attendee: AttendeeContext,
        on_success: impl FnOnce(IssuedTicket) + Send + 'static,
    ) -> RegistrationWorkflow {
        let context = RegistrationContext {
            event: self.event.clone(),
            attendee,
        };
        let gateway = SimulatedGateway::new(self.config.workflow.processing_delay());
        RegistrationWorkflow::new(
            context,
            self.offer_client.clone(),
            Arc::new(gateway),
            self.config.workflow,
            on_success,
        )
    }

    /// Drops the clients and waits for both actors to exit.
    ///
    /// Workflows still holding an [`OfferClient`] clone keep the offer actor alive, so drop
    /// them first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down registration...");

        drop(self.offer_client);
        drop(self.ticket_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorTask(e.to_string()));
            }
        }

        info!("Registration shutdown complete.");
        Ok(())
    }
}
