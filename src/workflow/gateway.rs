//! Payment gateway seam.
//!
//! The workflow only knows the [`PaymentGateway`] trait. [`SimulatedGateway`] stands in for a
//! real processor: it waits out the processing delay and approves every charge.

use super::GatewayError;
use crate::model::{FormFields, OfferId, PaymentMethod, PaymentStatus};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// What the workflow asks the gateway to collect.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
    pub offer_id: OfferId,
    pub method: PaymentMethod,
    pub amount: u64,
    pub currency: String,
    /// Form values exactly as entered.
    pub fields: FormFields,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Collects the payment. The returned status is recorded on the ticket.
    async fn charge(&self, request: &ChargeRequest) -> Result<PaymentStatus, GatewayError>;
}

/// Approves everything after a fixed delay.
#[derive(Debug, Clone, Default)]
pub struct SimulatedGateway {
    latency: Duration,
}

impl SimulatedGateway {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, request: &ChargeRequest) -> Result<PaymentStatus, GatewayError> {
        debug!(?request, "Simulating charge");
        tokio::time::sleep(self.latency).await;
        Ok(PaymentStatus::Completed)
    }
}
