//! Relationship payload validation logic

use crate::{GatekeeperError, ValidationConfig, WireRelationship};
use rapport_domain::{
    FriendshipStatus, RelationshipAction, RelationshipSignals, RelationshipStatus,
    UserRelationship,
};
use std::fmt;

/// Result of admitting a relationship payload
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the payload was accepted as-is, corrected, or rejected
    pub status: ValidationStatus,

    /// Inconsistencies found (empty when `Accepted`)
    pub findings: Vec<Finding>,

    /// Relationship resolved from the strict signals
    pub relationship: UserRelationship,
}

impl ValidationResult {
    /// Take the relationship, failing if the payload was rejected
    pub fn into_relationship(self) -> Result<UserRelationship, GatekeeperError> {
        match self.status {
            ValidationStatus::Rejected => Err(GatekeeperError::Rejected(self.findings)),
            ValidationStatus::Accepted | ValidationStatus::Normalized => Ok(self.relationship),
        }
    }
}

/// Validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// Payload was internally consistent
    Accepted,

    /// Payload had inconsistencies; derived values replaced reported ones
    Normalized,

    /// Payload had an inconsistency the configuration does not tolerate
    Rejected,
}

impl ValidationStatus {
    /// Get the status name
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Accepted => "accepted",
            ValidationStatus::Normalized => "normalized",
            ValidationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inconsistency between reported and derived relationship data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// `isMutualFollow` does not equal `isFollowing && isFollowedBy`
    MutualFollowMismatch {
        /// Value on the wire
        reported: bool,
        /// Value derived from the follow edges
        derived: bool,
    },

    /// Server status differs from the resolver's
    StatusMismatch {
        /// Status on the wire
        reported: RelationshipStatus,
        /// Status from the resolver
        derived: RelationshipStatus,
    },

    /// Server action differs from the resolver's
    ActionMismatch {
        /// Action on the wire
        reported: RelationshipAction,
        /// Action from the resolver
        derived: RelationshipAction,
    },

    /// `friendshipStatus` is not a known value
    UnknownFriendshipStatus(String),
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::MutualFollowMismatch { reported, derived } => write!(
                f,
                "isMutualFollow is {} but follow edges imply {}",
                reported, derived
            ),
            Finding::StatusMismatch { reported, derived } => write!(
                f,
                "relationshipStatus is '{}' but signals resolve to '{}'",
                reported, derived
            ),
            Finding::ActionMismatch { reported, derived } => write!(
                f,
                "actionAvailable is '{}' but status offers '{}'",
                reported, derived
            ),
            Finding::UnknownFriendshipStatus(value) => {
                write!(f, "friendshipStatus '{}' is not recognised", value)
            }
        }
    }
}

/// The Gatekeeper turns wire payloads into strict, resolved relationships
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    config: ValidationConfig,
}

impl Gatekeeper {
    /// Create a new Gatekeeper with the given configuration
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Decode and validate a JSON payload
    pub fn validate_json(&self, json: &str) -> Result<ValidationResult, GatekeeperError> {
        let wire: WireRelationship = serde_json::from_str(json)?;
        self.validate(&wire)
    }

    /// Validate a decoded payload against the configured rules
    ///
    /// # Errors
    ///
    /// `ContractViolation` when `relationshipStatus` or `actionAvailable`
    /// carries a value outside the closed vocabulary. Recoverable
    /// inconsistencies never error here; they are reported in the result.
    pub fn validate(&self, wire: &WireRelationship) -> Result<ValidationResult, GatekeeperError> {
        // Vocabulary drift is checked first: it is fatal whatever the config says
        let reported_status = wire
            .relationship_status
            .as_deref()
            .map(str::parse::<RelationshipStatus>)
            .transpose()?;
        let reported_action = wire
            .action_available
            .as_deref()
            .map(str::parse::<RelationshipAction>)
            .transpose()?;

        let mut findings = Vec::new();
        let mut rejected = false;

        // 1. Friendship status
        let friendship_status = match wire.friendship_status.as_deref() {
            None => None,
            Some(raw) => match FriendshipStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    findings.push(Finding::UnknownFriendshipStatus(raw.to_string()));
                    rejected |= self.config.reject_unknown_friendship_status;
                    None
                }
            },
        };

        let signals = RelationshipSignals {
            is_following: wire.is_following,
            is_followed_by: wire.is_followed_by,
            is_friend: wire.is_friend,
            friendship_status,
            is_blocked: wire.is_blocked,
            is_blocked_by: wire.is_blocked_by,
            ..Default::default()
        }
        .from_legacy_flag(wire.can_send_friend_request);

        // 2. Derived convenience flag
        if let Some(reported) = wire.is_mutual_follow {
            let derived = signals.is_mutual_follow();
            if reported != derived {
                findings.push(Finding::MutualFollowMismatch { reported, derived });
                rejected |= self.config.reject_mutual_follow_mismatch;
            }
        }

        let relationship = UserRelationship::resolve(signals);

        // 3. Server-computed status and action
        if let Some(reported) = reported_status {
            if reported != relationship.status {
                findings.push(Finding::StatusMismatch {
                    reported,
                    derived: relationship.status,
                });
                rejected |= self.config.reject_status_mismatch;
            }
        }

        if let Some(reported) = reported_action {
            if reported != relationship.action {
                findings.push(Finding::ActionMismatch {
                    reported,
                    derived: relationship.action,
                });
                rejected |= self.config.reject_action_mismatch;
            }
        }

        let status = if rejected {
            ValidationStatus::Rejected
        } else if findings.is_empty() {
            ValidationStatus::Accepted
        } else {
            ValidationStatus::Normalized
        };

        for finding in &findings {
            tracing::warn!(?status, "Relationship payload inconsistency: {}", finding);
        }

        Ok(ValidationResult {
            status,
            findings,
            relationship,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapport_domain::ParseError;

    fn create_followers_payload() -> WireRelationship {
        WireRelationship {
            is_followed_by: true,
            is_mutual_follow: Some(false),
            can_send_friend_request: true,
            relationship_status: Some("followers".to_string()),
            action_available: Some("follow".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_consistent_payload_is_accepted() {
        let gatekeeper = Gatekeeper::default();
        let result = gatekeeper.validate(&create_followers_payload()).unwrap();

        assert_eq!(result.status, ValidationStatus::Accepted);
        assert!(result.findings.is_empty());
        assert_eq!(result.relationship.status, RelationshipStatus::Followers);
        assert_eq!(result.relationship.action, RelationshipAction::Follow);
    }

    #[test]
    fn test_mutual_follow_mismatch_is_normalized() {
        let gatekeeper = Gatekeeper::default();
        let mut payload = create_followers_payload();
        payload.is_mutual_follow = Some(true);

        let result = gatekeeper.validate(&payload).unwrap();

        assert_eq!(result.status, ValidationStatus::Normalized);
        assert_eq!(
            result.findings,
            vec![Finding::MutualFollowMismatch {
                reported: true,
                derived: false
            }]
        );
        assert!(!result.relationship.signals.is_mutual_follow());
        assert!(!result.relationship.can_message());
    }

    #[test]
    fn test_status_mismatch_rejected_when_strict() {
        let gatekeeper = Gatekeeper::new(ValidationConfig::strict());
        let mut payload = create_followers_payload();
        payload.relationship_status = Some("following".to_string());

        let result = gatekeeper.validate(&payload).unwrap();
        assert_eq!(result.status, ValidationStatus::Rejected);

        match result.into_relationship() {
            Err(GatekeeperError::Rejected(findings)) => {
                assert!(matches!(
                    findings[0],
                    Finding::StatusMismatch {
                        reported: RelationshipStatus::Following,
                        derived: RelationshipStatus::Followers,
                    }
                ));
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_status_is_contract_violation() {
        let gatekeeper = Gatekeeper::new(ValidationConfig::permissive());
        let mut payload = create_followers_payload();
        payload.relationship_status = Some("frenemies".to_string());

        match gatekeeper.validate(&payload) {
            Err(GatekeeperError::ContractViolation(ParseError::UnknownStatus(value))) => {
                assert_eq!(value, "frenemies");
            }
            other => panic!("Expected ContractViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_action_is_contract_violation() {
        let gatekeeper = Gatekeeper::default();
        let mut payload = create_followers_payload();
        payload.action_available = Some("poke".to_string());

        assert!(matches!(
            gatekeeper.validate(&payload),
            Err(GatekeeperError::ContractViolation(ParseError::UnknownAction(_)))
        ));
    }

    #[test]
    fn test_unknown_friendship_status() {
        let mut payload = create_followers_payload();
        payload.friendship_status = Some("maybe".to_string());

        let strict = Gatekeeper::default().validate(&payload).unwrap();
        assert_eq!(strict.status, ValidationStatus::Rejected);

        let lenient = Gatekeeper::new(ValidationConfig::permissive())
            .validate(&payload)
            .unwrap();
        assert_eq!(lenient.status, ValidationStatus::Normalized);
        assert_eq!(lenient.relationship.signals.friendship_status, None);
        assert_eq!(lenient.relationship.status, RelationshipStatus::Followers);
    }

    #[test]
    fn test_pending_direction_from_legacy_flag() {
        let gatekeeper = Gatekeeper::default();

        let inbound = gatekeeper
            .validate_json(r#"{"friendshipStatus": "pending", "canSendFriendRequest": true}"#)
            .unwrap();
        assert_eq!(inbound.relationship.status, RelationshipStatus::PendingRequest);

        let outbound = gatekeeper
            .validate_json(r#"{"friendshipStatus": "pending", "canSendFriendRequest": false}"#)
            .unwrap();
        assert_eq!(outbound.relationship.status, RelationshipStatus::RequestSent);
        assert_eq!(outbound.relationship.action, RelationshipAction::CancelFriendRequest);
    }

    #[test]
    fn test_malformed_json() {
        let gatekeeper = Gatekeeper::default();
        assert!(matches!(
            gatekeeper.validate_json(r#"{"isFriend": "yes"}"#),
            Err(GatekeeperError::Json(_))
        ));
    }

    #[test]
    fn test_multiple_findings() {
        let gatekeeper = Gatekeeper::new(ValidationConfig::permissive());
        let payload = WireRelationship {
            is_friend: true,
            is_mutual_follow: Some(true),
            relationship_status: Some("mutual_follow".to_string()),
            action_available: Some("unfollow".to_string()),
            ..Default::default()
        };

        let result = gatekeeper.validate(&payload).unwrap();
        assert_eq!(result.status, ValidationStatus::Normalized);
        assert_eq!(result.findings.len(), 3);
        assert_eq!(result.relationship.status, RelationshipStatus::Friends);
    }
}
