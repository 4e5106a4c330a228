//! [`ActorEntity`] implementation for [`TicketOffer`].

use super::actions::{OfferAction, OfferActionResult};
use super::error::OfferError;
use crate::model::{OfferCreate, OfferId, TicketOffer};
use async_trait::async_trait;
use resource_actor::ActorEntity;
use tracing::debug;

#[async_trait]
impl ActorEntity for TicketOffer {
    type Id = OfferId;
    type Create = OfferCreate;
    type Action = OfferAction;
    type ActionResult = OfferActionResult;
    type Context = ();
    type Error = OfferError;

    fn from_create_params(params: OfferCreate) -> Result<Self, OfferError> {
        if params.id.0.trim().is_empty() {
            return Err(OfferError::Invalid("offer id must not be empty".to_string()));
        }
        if params.currency.trim().is_empty() {
            return Err(OfferError::Invalid(format!("offer {} has no currency", params.id)));
        }
        Ok(TicketOffer::from(params))
    }

    fn id(&self) -> OfferId {
        self.id.clone()
    }

    /// # Actions
    /// - `CheckAvailability`: returns the remaining count
    /// - `ReserveSeat`: decrements the remaining count, fails when it is already zero
    /// - `ReleaseSeat`: increments the remaining count
    async fn handle_action(
        &mut self,
        action: OfferAction,
        _ctx: &(),
    ) -> Result<OfferActionResult, OfferError> {
        match action {
            OfferAction::CheckAvailability => {
                Ok(OfferActionResult::CheckAvailability(self.remaining))
            }
            OfferAction::ReserveSeat => {
                if self.remaining == 0 {
                    return Err(OfferError::SoldOut(self.id.clone()));
                }
                self.remaining -= 1;
                debug!(offer_id = %self.id, remaining = self.remaining, "Seat reserved");
                Ok(OfferActionResult::ReserveSeat {
                    remaining: self.remaining,
                })
            }
            OfferAction::ReleaseSeat => {
                self.remaining = self.remaining.saturating_add(1);
                debug!(offer_id = %self.id, remaining = self.remaining, "Seat released");
                Ok(OfferActionResult::ReleaseSeat {
                    remaining: self.remaining,
                })
            }
        }
    }
}
