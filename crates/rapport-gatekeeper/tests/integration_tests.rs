//! Integration tests for the Gatekeeper
//!
//! Payloads are shaped like the social API's relationship objects.

use rapport_domain::{FriendshipButtonStatus, RelationshipAction, RelationshipStatus};
use rapport_gatekeeper::{Gatekeeper, GatekeeperError, ValidationConfig, ValidationStatus};

const FRIENDS: &str = r#"{
    "isFollowing": true,
    "isFollowedBy": true,
    "isMutualFollow": true,
    "isFriend": true,
    "canSendFriendRequest": false,
    "friendshipStatus": "accepted",
    "isBlocked": false,
    "isBlockedBy": false,
    "relationshipStatus": "friends",
    "actionAvailable": "remove_friend"
}"#;

const BLOCKED_FRIEND: &str = r#"{
    "isFollowing": true,
    "isFollowedBy": true,
    "isMutualFollow": true,
    "isFriend": true,
    "canSendFriendRequest": false,
    "friendshipStatus": "accepted",
    "isBlocked": false,
    "isBlockedBy": true,
    "relationshipStatus": "blocked",
    "actionAvailable": "unblock"
}"#;

const STRANGER_OPEN: &str = r#"{
    "isFollowing": false,
    "isFollowedBy": false,
    "isMutualFollow": false,
    "isFriend": false,
    "canSendFriendRequest": true,
    "friendshipStatus": null,
    "isBlocked": false,
    "isBlockedBy": false,
    "relationshipStatus": "none",
    "actionAvailable": "send_friend_request"
}"#;

#[test]
fn test_consistent_payloads_accepted_under_strict_rules() {
    let gatekeeper = Gatekeeper::new(ValidationConfig::strict());

    for payload in [FRIENDS, BLOCKED_FRIEND, STRANGER_OPEN] {
        let result = gatekeeper.validate_json(payload).unwrap();
        assert_eq!(result.status, ValidationStatus::Accepted, "{}", payload);
    }
}

#[test]
fn test_blocked_friend_cannot_message() {
    let relationship = Gatekeeper::default()
        .validate_json(BLOCKED_FRIEND)
        .unwrap()
        .into_relationship()
        .unwrap();

    assert_eq!(relationship.status, RelationshipStatus::Blocked);
    assert_eq!(relationship.action, RelationshipAction::Unblock);
    assert_eq!(
        relationship.friendship_button_status(),
        FriendshipButtonStatus::Blocked
    );
    assert!(!relationship.can_interact());
    assert!(!relationship.can_message());
}

#[test]
fn test_stale_server_status_is_replaced() {
    // Server still reports friends after the friendship ended
    let payload = FRIENDS.replace(r#""isFriend": true"#, r#""isFriend": false"#);

    let result = Gatekeeper::default().validate_json(&payload).unwrap();

    assert_eq!(result.status, ValidationStatus::Normalized);
    assert_eq!(result.findings.len(), 2);
    let relationship = result.into_relationship().unwrap();
    assert_eq!(relationship.status, RelationshipStatus::MutualFollow);
    assert_eq!(relationship.action, RelationshipAction::Unfollow);
}

#[test]
fn test_vocabulary_drift_is_fatal_in_every_preset() {
    let payload = STRANGER_OPEN.replace("send_friend_request", "wave");

    for config in [
        ValidationConfig::permissive(),
        ValidationConfig::default(),
        ValidationConfig::strict(),
    ] {
        let err = Gatekeeper::new(config).validate_json(&payload).unwrap_err();
        assert!(matches!(err, GatekeeperError::ContractViolation(_)));
        assert!(err.to_string().contains("wave"));
    }
}

#[test]
fn test_rejection_message_lists_findings() {
    let payload = STRANGER_OPEN.replace(
        r#""relationshipStatus": "none""#,
        r#""relationshipStatus": "following""#,
    );

    let err = Gatekeeper::new(ValidationConfig::strict())
        .validate_json(&payload)
        .unwrap()
        .into_relationship()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Relationship payload rejected: relationshipStatus is 'following' but signals resolve to 'none'"
    );
}
