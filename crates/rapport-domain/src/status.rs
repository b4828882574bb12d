//! Status module - the canonical relationship categories

use crate::ParseError;
use std::fmt;

/// Canonical relationship status between viewer and target
///
/// Exactly one status holds for any signal snapshot. Listed in resolution
/// precedence order: blocking dominates everything, friendship dominates
/// pending requests, which dominate follow edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipStatus {
    /// Either side blocked the other
    Blocked,

    /// Confirmed friends
    Friends,

    /// Target sent the viewer a friend request
    PendingRequest,

    /// Viewer sent the target a friend request
    RequestSent,

    /// Both follow each other
    MutualFollow,

    /// Viewer follows target only
    Following,

    /// Target follows viewer only
    Followers,

    /// No edge at all
    None,
}

impl RelationshipStatus {
    /// Every status, in precedence order
    pub const ALL: [RelationshipStatus; 8] = [
        RelationshipStatus::Blocked,
        RelationshipStatus::Friends,
        RelationshipStatus::PendingRequest,
        RelationshipStatus::RequestSent,
        RelationshipStatus::MutualFollow,
        RelationshipStatus::Following,
        RelationshipStatus::Followers,
        RelationshipStatus::None,
    ];

    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipStatus::Blocked => "blocked",
            RelationshipStatus::Friends => "friends",
            RelationshipStatus::PendingRequest => "pending_request",
            RelationshipStatus::RequestSent => "request_sent",
            RelationshipStatus::MutualFollow => "mutual_follow",
            RelationshipStatus::Following => "following",
            RelationshipStatus::Followers => "followers",
            RelationshipStatus::None => "none",
        }
    }

    /// Parse from the wire name
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl std::str::FromStr for RelationshipStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::UnknownStatus(s.to_string()))
    }
}

impl fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse status driving the friend-request control
///
/// Follow-only relationships carry no friendship affordance of their own, so
/// they collapse to `None` (the control offers a new request).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FriendshipButtonStatus {
    /// No friendship, a request may be offered
    None,

    /// Confirmed friends
    Friends,

    /// Inbound request awaiting accept/decline
    PendingRequest,

    /// Outbound request awaiting the target
    RequestSent,

    /// Blocked in either direction
    Blocked,
}

impl FriendshipButtonStatus {
    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipButtonStatus::None => "none",
            FriendshipButtonStatus::Friends => "friends",
            FriendshipButtonStatus::PendingRequest => "pending_request",
            FriendshipButtonStatus::RequestSent => "request_sent",
            FriendshipButtonStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for FriendshipButtonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
