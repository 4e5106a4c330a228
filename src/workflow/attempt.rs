use super::WorkflowStage;
use crate::model::{FormFields, PaymentMethod, TicketOffer};

/// One run through the payment flow for a single offer.
///
/// Created by [`RegistrationWorkflow::begin`](super::RegistrationWorkflow::begin) and
/// discarded on cancel, completion, or teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentAttempt {
    /// Offer as it looked when the attempt was opened.
    pub offer: TicketOffer,
    pub method: Option<PaymentMethod>,
    pub form_fields: FormFields,
    pub stage: WorkflowStage,
}

impl PaymentAttempt {
    pub fn new(offer: TicketOffer) -> Self {
        Self {
            offer,
            method: None,
            form_fields: FormFields::default(),
            stage: WorkflowStage::SelectingMethod,
        }
    }

    /// Forgets the chosen method and everything typed into the form.
    pub fn clear_details(&mut self) {
        self.method = None;
        self.form_fields.clear();
    }
}
