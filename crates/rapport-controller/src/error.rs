//! Error types for relationship controls.

use crate::Mutation;
use rapport_domain::UserId;
use thiserror::Error;

/// Failure reported by an injected mutation callback
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// Transport failure (network, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The server refused the change
    #[error("Rejected by server: {0}")]
    Rejected(String),

    /// The service has no endpoint for this mutation
    #[error("Mutation not supported: {0}")]
    Unsupported(&'static str),
}

/// Control operation errors
#[derive(Debug, Error)]
pub enum ControlError {
    /// The mutation was rejected; optimistic state has been rolled back
    #[error("{mutation} for user {target} failed: {source}")]
    MutationFailed {
        /// The mutation that was attempted
        mutation: Mutation,
        /// Target user of the control
        target: UserId,
        /// What the service reported
        source: MutationError,
    },
}

impl ControlError {
    /// The underlying mutation failure
    pub fn mutation_error(&self) -> &MutationError {
        match self {
            ControlError::MutationFailed { source, .. } => source,
        }
    }
}
