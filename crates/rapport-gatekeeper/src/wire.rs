//! Wire shape of a relationship as the transport delivers it

use serde::{Deserialize, Serialize};

/// Relationship object as returned by the social API
///
/// Every field is optional on the wire. Booleans default to `false`, strings
/// are kept raw so the validator can tell a missing value from a bad one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireRelationship {
    /// Viewer follows target
    pub is_following: bool,
    /// Target follows viewer
    pub is_followed_by: bool,
    /// Convenience flag; only checked, never trusted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mutual_follow: Option<bool>,
    /// Viewer and target are friends
    pub is_friend: bool,
    /// Overloaded policy flag, split by the validator
    pub can_send_friend_request: bool,
    /// `pending`, `accepted`, `declined` or null
    pub friendship_status: Option<String>,
    /// Viewer blocked target
    pub is_blocked: bool,
    /// Target blocked viewer
    pub is_blocked_by: bool,
    /// Server-computed status, checked against the resolver
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_status: Option<String>,
    /// Server-computed action, checked against the resolver
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_available: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_parsing() {
        let json = r#"{
            "isFollowing": false,
            "isFollowedBy": true,
            "isMutualFollow": false,
            "isFriend": false,
            "canSendFriendRequest": true,
            "friendshipStatus": null,
            "isBlocked": false,
            "isBlockedBy": false,
            "relationshipStatus": "followers",
            "actionAvailable": "follow"
        }"#;

        let wire: WireRelationship = serde_json::from_str(json).unwrap();
        assert!(wire.is_followed_by);
        assert!(wire.can_send_friend_request);
        assert_eq!(wire.friendship_status, None);
        assert_eq!(wire.relationship_status.as_deref(), Some("followers"));
    }

    #[test]
    fn test_missing_flags_default_to_false() {
        let wire: WireRelationship = serde_json::from_str(r#"{"isFriend": true}"#).unwrap();
        assert!(wire.is_friend);
        assert!(!wire.is_blocked);
        assert_eq!(wire.is_mutual_follow, None);
    }
}
