//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for boundary validation rules
///
/// Each rule decides whether an inconsistency in a payload rejects it or is
/// normalised away (the derived value wins and a warning is logged).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Reject when `isMutualFollow` disagrees with the two follow edges
    #[serde(default)]
    pub reject_mutual_follow_mismatch: bool,

    /// Reject when the server's `relationshipStatus` disagrees with the resolver
    #[serde(default)]
    pub reject_status_mismatch: bool,

    /// Reject when the server's `actionAvailable` disagrees with the resolver
    #[serde(default)]
    pub reject_action_mismatch: bool,

    /// Reject an unrecognised `friendshipStatus` instead of treating it as absent
    #[serde(default = "default_true")]
    pub reject_unknown_friendship_status: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            reject_mutual_follow_mismatch: false,
            reject_status_mismatch: false,
            reject_action_mismatch: false,
            reject_unknown_friendship_status: true,
        }
    }
}

impl ValidationConfig {
    /// Normalise everything, reject nothing recoverable
    pub fn permissive() -> Self {
        Self {
            reject_mutual_follow_mismatch: false,
            reject_status_mismatch: false,
            reject_action_mismatch: false,
            reject_unknown_friendship_status: false,
        }
    }

    /// Reject every inconsistency
    pub fn strict() -> Self {
        Self {
            reject_mutual_follow_mismatch: true,
            reject_status_mismatch: true,
            reject_action_mismatch: true,
            reject_unknown_friendship_status: true,
        }
    }

    /// Look up a preset by name (`default`, `permissive`, `strict`)
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::default()),
            "permissive" => Some(Self::permissive()),
            "strict" => Some(Self::strict()),
            _ => None,
        }
    }
}
