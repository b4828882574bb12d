//! Relationship module - a resolved view of one viewer/target pair

use crate::resolver::{
    calculate_relationship_status, can_interact_with_user, can_send_message,
    get_available_action, to_friendship_button_status,
};
use crate::{FriendshipButtonStatus, RelationshipAction, RelationshipSignals, RelationshipStatus};

/// Signals together with the status and action derived from them
///
/// Status and action are always computed here, never copied from a producer,
/// so a `UserRelationship` cannot hold a status its own signals disagree with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserRelationship {
    /// The snapshot this view was resolved from
    pub signals: RelationshipSignals,

    /// Canonical status of the pair
    pub status: RelationshipStatus,

    /// The single action the viewer may take
    pub action: RelationshipAction,
}

impl UserRelationship {
    /// Resolve a signal snapshot
    pub fn resolve(signals: RelationshipSignals) -> Self {
        let status = calculate_relationship_status(&signals);
        let action = get_available_action(status, &signals);

        Self {
            signals,
            status,
            action,
        }
    }

    /// Whether any interactive affordance may be shown
    pub fn can_interact(&self) -> bool {
        can_interact_with_user(&self.signals)
    }

    /// Whether the viewer may message the target
    pub fn can_message(&self) -> bool {
        can_send_message(&self.signals)
    }

    /// The friend-request control's view of this relationship
    pub fn friendship_button_status(&self) -> FriendshipButtonStatus {
        to_friendship_button_status(self.status)
    }
}

impl From<RelationshipSignals> for UserRelationship {
    fn from(signals: RelationshipSignals) -> Self {
        Self::resolve(signals)
    }
}
