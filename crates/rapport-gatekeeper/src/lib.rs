//! Rapport Gatekeeper
//!
//! Validates relationship payloads at the transport boundary.
//!
//! The resolver in `rapport-domain` is a total function over a strict
//! [`RelationshipSignals`](rapport_domain::RelationshipSignals) type. Transport
//! responses are loosely shaped JSON. The Gatekeeper sits between the two:
//! - Decodes the camelCase wire object (missing flags read as `false`)
//! - Splits the overloaded `canSendFriendRequest` flag
//! - Re-derives mutual follow, status and action instead of trusting them
//! - Treats unknown status/action strings as contract violations
//!
//! # Examples
//!
//! ```
//! use rapport_domain::RelationshipStatus;
//! use rapport_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//! let result = gatekeeper
//!     .validate_json(r#"{"isFollowedBy": true, "canSendFriendRequest": true}"#)
//!     .unwrap();
//!
//! assert_eq!(result.relationship.status, RelationshipStatus::Followers);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod validator;
mod wire;

pub use config::ValidationConfig;
pub use error::GatekeeperError;
pub use validator::{Finding, Gatekeeper, ValidationResult, ValidationStatus};
pub use wire::WireRelationship;
