//! [`ActorEntity`] implementation for [`IssuedTicket`].
//!
//! The ledger only records tickets the registration workflow already issued, so
//! creation takes the finished ticket as its payload.

use super::actions::{TicketAction, TicketActionResult};
use super::error::TicketError;
use crate::model::{CheckInStatus, IssuedTicket, TicketId, TicketStatus};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;

#[async_trait]
impl ActorEntity for IssuedTicket {
    type Id = TicketId;
    type Create = IssuedTicket;
    type Action = TicketAction;
    type ActionResult = TicketActionResult;
    type Context = ();
    type Error = TicketError;

    fn from_create_params(ticket: IssuedTicket) -> Result<Self, TicketError> {
        Ok(ticket)
    }

    fn id(&self) -> TicketId {
        self.ticket_id
    }

    async fn handle_action(
        &mut self,
        action: TicketAction,
        _ctx: &(),
    ) -> Result<TicketActionResult, TicketError> {
        match action {
            TicketAction::CheckIn => {
                if self.is_checked_in() {
                    return Err(TicketError::AlreadyCheckedIn(self.ticket_id));
                }
                if self.status != TicketStatus::Confirmed {
                    return Err(TicketError::NotConfirmed(self.ticket_id));
                }
                self.check_in = CheckInStatus::CheckedIn { at: Utc::now() };
                Ok(TicketActionResult::CheckIn(self.clone()))
            }
            TicketAction::Cancel => {
                if self.is_checked_in() {
                    return Err(TicketError::AlreadyCheckedIn(self.ticket_id));
                }
                self.status = TicketStatus::Cancelled;
                Ok(TicketActionResult::Cancel(self.clone()))
            }
        }
    }
}
