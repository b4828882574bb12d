//! Block/unblock control

use crate::optimistic::OptimisticCore;
use crate::{Activation, Affordance, ControlError, Mutation, SocialMutations};
use rapport_domain::{
    RelationshipAction, RelationshipSignals, RelationshipStatus, UserId, UserRelationship,
};
use std::sync::Arc;

/// Block control for one target user
///
/// Only the viewer's own block is touched. A block by the target keeps the
/// status `blocked` after an unblock.
pub struct BlockControl {
    core: OptimisticCore,
}

impl BlockControl {
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

    /// Block the target; ignored if already blocked by the viewer
    pub async fn block(&self) -> Result<Activation, ControlError> {
        self.core
            .activate(Affordance::Toggle, None, |signals| {
                (!signals.is_blocked).then(|| {
                    let mut next = *signals;
                    next.is_blocked = true;
                    (Mutation::Block, next)
                })
            })
            .await
    }

    /// Lift the viewer's block; ignored if there is none
    pub async fn unblock(&self) -> Result<Activation, ControlError> {
        self.core
            .activate(Affordance::Toggle, None, |signals| {
                signals.is_blocked.then(|| {
                    let mut next = *signals;
                    next.is_blocked = false;
                    (Mutation::Unblock, next)
                })
            })
            .await
    }

    /// Block or unblock depending on the viewer's current block
    pub async fn toggle(&self) -> Result<Activation, ControlError> {
        if self.core.signals().is_blocked {
            self.unblock().await
        } else {
            self.block().await
        }
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

    /// Whether a block or unblock is awaiting the server
    pub fn is_loading(&self) -> bool {
        self.core.is_loading(Affordance::Toggle)
    }

    /// Replace local state with a fresh server snapshot
    pub fn sync(&self, signals: RelationshipSignals) {
        self.core.sync(signals);
    }
}
