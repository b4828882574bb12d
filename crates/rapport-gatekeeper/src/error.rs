//! Gatekeeper error types

use crate::Finding;
use rapport_domain::ParseError;
use thiserror::Error;

/// Errors that can occur while admitting a relationship payload
#[derive(Error, Debug)]
pub enum GatekeeperError {
    /// Payload is not a JSON relationship object
    #[error("Malformed relationship payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Producer used a status or action outside the closed vocabulary.
    ///
    /// This means the producer and the resolver have drifted apart. It is
    /// never mapped to a default.
    #[error("Contract violation: {0}")]
    ContractViolation(#[from] ParseError),

    /// Payload failed validation under the active configuration
    #[error("Relationship payload rejected: {}", describe(.0))]
    Rejected(Vec<Finding>),
}

fn describe(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
