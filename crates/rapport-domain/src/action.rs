//! Action module - the single affordance offered for a status

use crate::ParseError;
use std::fmt;

/// The one action available to the viewer for a given status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipAction {
    /// Lift the viewer's block
    Unblock,

    /// End the friendship
    RemoveFriend,

    /// Drop the viewer's follow edge
    Unfollow,

    /// Add a follow edge
    Follow,

    /// Accept the inbound friend request
    AcceptFriendRequest,

    /// Withdraw the outbound friend request
    CancelFriendRequest,

    /// Offer a new friend request
    SendFriendRequest,
}

impl RelationshipAction {
    /// Every action
    pub const ALL: [RelationshipAction; 7] = [
        RelationshipAction::Unblock,
        RelationshipAction::RemoveFriend,
        RelationshipAction::Unfollow,
        RelationshipAction::Follow,
        RelationshipAction::AcceptFriendRequest,
        RelationshipAction::CancelFriendRequest,
        RelationshipAction::SendFriendRequest,
    ];

    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipAction::Unblock => "unblock",
            RelationshipAction::RemoveFriend => "remove_friend",
            RelationshipAction::Unfollow => "unfollow",
            RelationshipAction::Follow => "follow",
            RelationshipAction::AcceptFriendRequest => "accept_friend_request",
            RelationshipAction::CancelFriendRequest => "cancel_friend_request",
            RelationshipAction::SendFriendRequest => "send_friend_request",
        }
    }

    /// Parse from the wire name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.as_str() == s)
    }
}

impl std::str::FromStr for RelationshipAction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::UnknownAction(s.to_string()))
    }
}

impl fmt::Display for RelationshipAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names() {
        assert_eq!(RelationshipAction::AcceptFriendRequest.to_string(), "accept_friend_request");
        assert_eq!(RelationshipAction::parse("unblock"), Some(RelationshipAction::Unblock));
        assert!("poke".parse::<RelationshipAction>().is_err());
    }
}
