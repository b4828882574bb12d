//! Rapport Domain Layer
//!
//! This crate contains the relationship resolver: the pure functions that map
//! a snapshot of social-graph signals between two users to a single canonical
//! status and the one action the viewer may take next.
//!
//! It has ZERO external dependencies. Every other crate in the workspace
//! (boundary validation, optimistic controls, the CLI) depends on it.
//!
//! ## Key Concepts
//!
//! - **Signal snapshot**: follow, friendship and block flags between viewer and target
//! - **Canonical status**: exactly one [`RelationshipStatus`] per snapshot
//! - **Available action**: exactly one [`RelationshipAction`] per status
//! - **Interaction gates**: blocking disables every affordance, messaging
//!   additionally requires a bidirectional tie
//!
//! ## Example
//!
//! ```
//! use rapport_domain::{RelationshipSignals, RelationshipStatus, RelationshipAction, UserRelationship};
//!
//! let signals = RelationshipSignals {
//!     is_followed_by: true,
//!     allow_friend_requests: true,
//!     ..Default::default()
//! };
//!
//! let relationship = UserRelationship::resolve(signals);
//! assert_eq!(relationship.status, RelationshipStatus::Followers);
//! assert_eq!(relationship.action, RelationshipAction::Follow);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action;
pub mod error;
pub mod relationship;
pub mod resolver;
pub mod signals;
pub mod status;

// Re-exports for convenience
pub use action::RelationshipAction;
pub use error::ParseError;
pub use relationship::UserRelationship;
pub use resolver::{
    calculate_relationship_status, can_interact_with_user, can_send_message,
    get_available_action, to_friendship_button_status,
};
pub use signals::{FriendshipStatus, RelationshipSignals, UserId};
pub use status::{FriendshipButtonStatus, RelationshipStatus};
