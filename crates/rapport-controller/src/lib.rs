//! Rapport Action Controllers
//!
//! Optimistic state machines behind the relationship buttons of a profile.
//! Each control owns its own state, applies the expected outcome of a
//! mutation immediately, and rolls back if the injected service rejects it.
//!
//! Controls:
//!
//! - [`FollowControl`]: follow/unfollow toggle
//! - [`FriendRequestControl`]: composer, remove, cancel, accept and decline
//! - [`BlockControl`]: block/unblock
//!
//! Mutations go through the [`SocialMutations`] trait. [`ScriptedMutations`]
//! is an in-memory implementation for tests and simulations.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rapport_controller::{Activation, FriendRequestControl, ScriptedMutations};
//! use rapport_domain::{FriendshipButtonStatus, RelationshipSignals, UserId};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), rapport_controller::ControlError> {
//! let service = ScriptedMutations::new();
//! let signals = RelationshipSignals { allow_friend_requests: true, ..Default::default() };
//! let control = FriendRequestControl::new(UserId::new(1), signals, Arc::new(service.clone()));
//!
//! assert_eq!(control.primary().await?, Activation::ComposerOpened);
//! control.set_message("Hi from the conference");
//! assert_eq!(control.confirm_composer().await?, Activation::Committed);
//! assert_eq!(control.button_status(), FriendshipButtonStatus::RequestSent);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod block;
mod error;
mod follow;
mod friend_request;
mod mutations;
mod optimistic;

pub use block::BlockControl;
pub use error::{ControlError, MutationError};
pub use follow::FollowControl;
pub use friend_request::FriendRequestControl;
pub use mutations::{Mutation, RecordedCall, ScriptedMutations, SocialMutations};
pub use optimistic::{Activation, Affordance};
