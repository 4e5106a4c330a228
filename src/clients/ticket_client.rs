//! # Ticket Client
//!
//! High-level API for the ticket ledger.
use crate::model::{IssuedTicket, TicketId, TicketStatus};
use crate::ticket_actor::{TicketAction, TicketActionResult, TicketError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Status filter offered on the tickets page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketFilter {
    #[default]
    All,
    Confirmed,
    Pending,
    Cancelled,
}

impl TicketFilter {
    pub fn matches(self, status: TicketStatus) -> bool {
        match self {
            TicketFilter::All => true,
            TicketFilter::Confirmed => status == TicketStatus::Confirmed,
            TicketFilter::Pending => status == TicketStatus::Pending,
            TicketFilter::Cancelled => status == TicketStatus::Cancelled,
        }
    }
}

/// Client for interacting with the ticket ledger actor.
#[derive(Clone)]
pub struct TicketClient {
    inner: ResourceClient<IssuedTicket>,
}

#[async_trait]
impl ActorClient<IssuedTicket> for TicketClient {
    type Error = TicketError;

    fn inner(&self) -> &ResourceClient<IssuedTicket> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> TicketError {
        match e {
            FrameworkError::NotFound(id) => match parse_ticket_id(&id) {
                Some(ticket_id) => TicketError::NotFound(ticket_id),
                None => TicketError::ActorCommunicationError(format!("Item not found: {id}")),
            },
            FrameworkError::AlreadyExists(id) => match parse_ticket_id(&id) {
                Some(ticket_id) => TicketError::AlreadyRecorded(ticket_id),
                None => TicketError::ActorCommunicationError(format!("Duplicate ticket: {id}")),
            },
            other => match other.downcast_entity::<TicketError>() {
                Some(domain) => domain.clone(),
                None => TicketError::ActorCommunicationError(other.to_string()),
            },
        }
    }
}

/// Reverses `TicketId`'s `TKT-<hex>` display form.
fn parse_ticket_id(display: &str) -> Option<TicketId> {
    let hex = display.strip_prefix("TKT-")?;
    Uuid::parse_str(hex).ok().map(TicketId)
}

impl TicketClient {
    pub fn new(inner: ResourceClient<IssuedTicket>) -> Self {
        Self { inner }
    }

    /// Stores a ticket the registration workflow issued.
    #[instrument(skip(self, ticket), fields(ticket_id = %ticket.ticket_id))]
    pub async fn record_ticket(&self, ticket: IssuedTicket) -> Result<TicketId, TicketError> {
        debug!(?ticket, "record_ticket called");
        let id = self.inner.create(ticket).await.map_err(Self::map_error)?;
        info!("Ticket recorded");
        Ok(id)
    }

    /// Fetches one ticket, treating an unknown id as an error.
    pub async fn ticket(&self, id: TicketId) -> Result<IssuedTicket, TicketError> {
        self.get(id).await?.ok_or(TicketError::NotFound(id))
    }

    /// Tickets held by `attendee_id` whose status passes `filter`, newest first.
    ///
    /// A `search` term narrows the result to tickets whose event title or ticket id contains
    /// it, ignoring case. An empty term matches everything.
    #[instrument(skip(self))]
    pub async fn tickets_for(
        &self,
        attendee_id: &str,
        filter: TicketFilter,
        search: Option<&str>,
    ) -> Result<Vec<IssuedTicket>, TicketError> {
        let mut tickets: Vec<IssuedTicket> = self
            .list()
            .await?
            .into_iter()
            .filter(|t| t.attendee_id == attendee_id && filter.matches(t.status))
            .filter(|t| search.map_or(true, |term| t.matches_search(term)))
            .collect();
        tickets.sort_by(|a, b| b.purchased_at.cmp(&a.purchased_at));
        Ok(tickets)
    }

    #[instrument(skip(self))]
    pub async fn check_in(&self, id: TicketId) -> Result<IssuedTicket, TicketError> {
        match self.action(id, TicketAction::CheckIn).await? {
            TicketActionResult::CheckIn(ticket) => Ok(ticket),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn cancel_ticket(&self, id: TicketId) -> Result<IssuedTicket, TicketError> {
        match self.action(id, TicketAction::Cancel).await? {
            TicketActionResult::Cancel(ticket) => Ok(ticket),
            other => Err(unexpected(other)),
        }
    }

    async fn action(
        &self,
        id: TicketId,
        action: TicketAction,
    ) -> Result<TicketActionResult, TicketError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

fn unexpected(result: TicketActionResult) -> TicketError {
    TicketError::ActorCommunicationError(format!("mismatched action result: {result:?}"))
}
