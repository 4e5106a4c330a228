use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Node of the payment flow a [`PaymentAttempt`](super::PaymentAttempt) is in.
///
/// `Success` and `Cancelled` are terminal: an attempt that reaches either is closed. Cancellation
/// is only reachable from the stages where [`can_cancel`](Self::can_cancel) holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    SelectingMethod,
    EnteringDetails,
    Processing,
    Success,
    Cancelled,
}

impl WorkflowStage {
    pub fn can_cancel(self) -> bool {
        matches!(
            self,
            WorkflowStage::SelectingMethod | WorkflowStage::EnteringDetails
        )
    }
}

impl Display for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WorkflowStage::SelectingMethod => "selecting_method",
            WorkflowStage::EnteringDetails => "entering_details",
            WorkflowStage::Processing => "processing",
            WorkflowStage::Success => "success",
            WorkflowStage::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}
