//! Relationship resolver
//!
//! Pure, total functions over [`RelationshipSignals`]. Nothing here performs
//! I/O or fails: every well-formed snapshot maps to exactly one status and
//! every status maps to exactly one action.

use crate::{
    FriendshipButtonStatus, RelationshipAction, RelationshipSignals, RelationshipStatus,
};

/// Compute the canonical status for a signal snapshot
///
/// Precedence, first match wins:
/// 1. a block in either direction
/// 2. friendship
/// 3. a pending request (inbound or outbound)
/// 4. mutual follow, then following, then followers
/// 5. none
///
/// # Examples
///
/// ```
/// use rapport_domain::{calculate_relationship_status, RelationshipSignals, RelationshipStatus};
///
/// let signals = RelationshipSignals {
///     is_friend: true,
///     is_blocked: true,
///     ..Default::default()
/// };
/// assert_eq!(calculate_relationship_status(&signals), RelationshipStatus::Blocked);
/// ```
pub fn calculate_relationship_status(signals: &RelationshipSignals) -> RelationshipStatus {
    if signals.is_block_involved() {
        return RelationshipStatus::Blocked;
    }

    if signals.is_friend {
        return RelationshipStatus::Friends;
    }

    if signals.has_pending_request() {
        return if signals.pending_outbound {
            RelationshipStatus::RequestSent
        } else {
            RelationshipStatus::PendingRequest
        };
    }

    match (signals.is_following, signals.is_followed_by) {
        (true, true) => RelationshipStatus::MutualFollow,
        (true, false) => RelationshipStatus::Following,
        (false, true) => RelationshipStatus::Followers,
        (false, false) => RelationshipStatus::None,
    }
}

/// Look up the single action available for a status
///
/// Only `None` consults the signals: it offers a friend request when the
/// target accepts them, and a follow otherwise.
pub fn get_available_action(
    status: RelationshipStatus,
    signals: &RelationshipSignals,
) -> RelationshipAction {
    match status {
        RelationshipStatus::Friends => RelationshipAction::RemoveFriend,
        RelationshipStatus::Following => RelationshipAction::Unfollow,
        RelationshipStatus::Followers => RelationshipAction::Follow,
        RelationshipStatus::MutualFollow => RelationshipAction::Unfollow,
        RelationshipStatus::PendingRequest => RelationshipAction::AcceptFriendRequest,
        RelationshipStatus::RequestSent => RelationshipAction::CancelFriendRequest,
        RelationshipStatus::Blocked => RelationshipAction::Unblock,
        RelationshipStatus::None => {
            if signals.allow_friend_requests {
                RelationshipAction::SendFriendRequest
            } else {
                RelationshipAction::Follow
            }
        }
    }
}

/// Whether any interactive affordance may be shown for the target
pub fn can_interact_with_user(signals: &RelationshipSignals) -> bool {
    !signals.is_blocked && !signals.is_blocked_by
}

/// Whether the viewer may message the target
///
/// Requires one of the two bidirectional tiers: friendship or mutual follow.
pub fn can_send_message(signals: &RelationshipSignals) -> bool {
    can_interact_with_user(signals) && (signals.is_friend || signals.is_mutual_follow())
}

/// Project a status onto the friend-request control's five states
pub fn to_friendship_button_status(status: RelationshipStatus) -> FriendshipButtonStatus {
    match status {
        RelationshipStatus::Friends => FriendshipButtonStatus::Friends,
        RelationshipStatus::PendingRequest => FriendshipButtonStatus::PendingRequest,
        RelationshipStatus::RequestSent => FriendshipButtonStatus::RequestSent,
        RelationshipStatus::Blocked => FriendshipButtonStatus::Blocked,
        RelationshipStatus::Following
        | RelationshipStatus::Followers
        | RelationshipStatus::MutualFollow
        | RelationshipStatus::None => FriendshipButtonStatus::None,
    }
}
