//! Runtime configuration.
//!
//! Values come from `REGISTRATION_*` environment variables and fall back to the timings the
//! registration page has always used.
//!
//! | Variable | Default |
//! |---|---|
//! | `REGISTRATION_PROCESSING_DELAY_MS` | 3000 |
//! | `REGISTRATION_CONFIRMATION_DELAY_MS` | 2000 |
//! | `REGISTRATION_GATEWAY_TIMEOUT_MS` | 30000 |
//! | `REGISTRATION_ACTOR_BUFFER` | 32 |

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub workflow: WorkflowConfig,
    /// Channel capacity of each actor's mailbox.
    pub actor_buffer: usize,
}

/// Timings of the payment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// How long the simulated gateway takes to approve a charge.
    pub processing_delay_ms: u64,
    /// Pause between showing success and handing the ticket to the caller.
    pub confirmation_delay_ms: u64,
    /// Upper bound on a single gateway call.
    pub gateway_timeout_ms: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: 3_000,
            confirmation_delay_ms: 2_000,
            gateway_timeout_ms: 30_000,
        }
    }
}

impl WorkflowConfig {
    /// No artificial delays. The gateway timeout stays generous.
    pub fn immediate() -> Self {
        Self {
            processing_delay_ms: 0,
            confirmation_delay_ms: 0,
            gateway_timeout_ms: 5_000,
        }
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    pub fn confirmation_delay(&self) -> Duration {
        Duration::from_millis(self.confirmation_delay_ms)
    }

    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_millis(self.gateway_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workflow: WorkflowConfig::default(),
            actor_buffer: 32,
        }
    }
}

impl Config {
    /// Reads configuration from the environment. Unset or unparsable values use defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            workflow: WorkflowConfig {
                processing_delay_ms: env_or(
                    "REGISTRATION_PROCESSING_DELAY_MS",
                    defaults.workflow.processing_delay_ms,
                ),
                confirmation_delay_ms: env_or(
                    "REGISTRATION_CONFIRMATION_DELAY_MS",
                    defaults.workflow.confirmation_delay_ms,
                ),
                gateway_timeout_ms: env_or(
                    "REGISTRATION_GATEWAY_TIMEOUT_MS",
                    defaults.workflow.gateway_timeout_ms,
                ),
            },
            actor_buffer: env_or("REGISTRATION_ACTOR_BUFFER", defaults.actor_buffer),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
