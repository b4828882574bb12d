//! Follow/unfollow control

use crate::optimistic::OptimisticCore;
use crate::{Activation, Affordance, ControlError, Mutation, SocialMutations};
use rapport_domain::{
    RelationshipAction, RelationshipSignals, RelationshipStatus, UserId, UserRelationship,
};
use std::sync::Arc;

/// Follow toggle for one target user
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use rapport_controller::{Activation, FollowControl, ScriptedMutations};
/// use rapport_domain::{RelationshipSignals, RelationshipStatus, UserId};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let signals = RelationshipSignals { is_followed_by: true, ..Default::default() };
/// let control = FollowControl::new(UserId::new(42), signals, Arc::new(ScriptedMutations::new()));
///
/// assert_eq!(control.toggle().await.unwrap(), Activation::Committed);
/// assert_eq!(control.status(), RelationshipStatus::MutualFollow);
/// # }
/// ```
pub struct FollowControl {
    core: OptimisticCore,
}

impl FollowControl {
    /// Create a control seeded with the server's snapshot
    pub fn new(
        target: UserId,
        signals: RelationshipSignals,
        service: Arc<dyn SocialMutations>,
    ) -> Self {
        Self {
            core: OptimisticCore::new(target, signals, service),
        }
    }

    /// Follow when not following, unfollow otherwise
    ///
    /// Ignored while a toggle is in flight or a block is involved.
    pub async fn toggle(&self) -> Result<Activation, ControlError> {
        self.core
            .activate(Affordance::Toggle, None, |signals| {
                if signals.is_block_involved() {
                    return None;
                }
                let mutation = if signals.is_following {
                    Mutation::Unfollow
                } else {
                    Mutation::Follow
                };
                let mut next = *signals;
                next.is_following = !signals.is_following;
                Some((mutation, next))
            })
            .await
    }

    /// Target user
    pub fn target(&self) -> UserId {
        self.core.target()
    }

    /// Current (possibly optimistic) status
    pub fn status(&self) -> RelationshipStatus {
        self.core.relationship().status
    }

    /// Action offered for the current status
    pub fn action(&self) -> RelationshipAction {
        self.core.relationship().action
    }

    /// Current resolved view
    pub fn relationship(&self) -> UserRelationship {
        self.core.relationship()
    }

    /// Current signals
    pub fn signals(&self) -> RelationshipSignals {
        self.core.signals()
    }

    /// Whether the toggle is awaiting the server
    pub fn is_loading(&self) -> bool {
        self.core.is_loading(Affordance::Toggle)
    }

    /// Replace local state with a fresh server snapshot
    pub fn sync(&self, signals: RelationshipSignals) {
        self.core.sync(signals);
    }
}
