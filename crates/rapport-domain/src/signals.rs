//! Signal snapshot module - the raw relationship flags between two users

use crate::ParseError;
use std::fmt;

/// Identifier of a user on the social graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw user identifier
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State of a friendship request between the two users
///
/// Only `Pending` takes part in status resolution. `Accepted` and `Declined`
/// are carried because the backend reports them alongside `is_friend`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FriendshipStatus {
    /// A request is awaiting an answer (direction is a separate signal)
    Pending,

    /// The request was accepted
    Accepted,

    /// The request was declined
    Declined,
}

impl FriendshipStatus {
    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            FriendshipStatus::Pending => "pending",
            FriendshipStatus::Accepted => "accepted",
            FriendshipStatus::Declined => "declined",
        }
    }

    /// Parse from the wire name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(FriendshipStatus::Pending),
            "accepted" => Some(FriendshipStatus::Accepted),
            "declined" => Some(FriendshipStatus::Declined),
            _ => None,
        }
    }
}

impl std::str::FromStr for FriendshipStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseError::UnknownFriendshipStatus(s.to_string()))
    }
}

/// A snapshot of relationship signals between the viewer and a target user
///
/// Immutable for the duration of one resolution call. Mutual follow is not
/// stored: [`RelationshipSignals::is_mutual_follow`] derives it, so it can
/// never disagree with the two directed edges.
///
/// The source system overloads a single `canSendFriendRequest` flag for two
/// unrelated decisions. Here they are separate fields:
/// `allow_friend_requests` picks between follow and friend request when there
/// is no relationship, and `pending_outbound` tells who sent a pending request.
/// Use [`RelationshipSignals::from_legacy_flag`] when only the overloaded flag
/// is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RelationshipSignals {
    /// Viewer follows target
    pub is_following: bool,

    /// Target follows viewer
    pub is_followed_by: bool,

    /// Viewer and target are friends
    pub is_friend: bool,

    /// Friendship request state, if any
    pub friendship_status: Option<FriendshipStatus>,

    /// Viewer blocked target
    pub is_blocked: bool,

    /// Target blocked viewer
    pub is_blocked_by: bool,

    /// Target accepts friend requests from the viewer
    pub allow_friend_requests: bool,

    /// A pending request was sent by the viewer (false: sent by the target)
    pub pending_outbound: bool,
}

impl RelationshipSignals {
    /// Split the overloaded `canSendFriendRequest` flag the way the source
    /// system interprets it: `true` allows new requests and marks a pending
    /// request as inbound, `false` forbids new requests and marks it outbound.
    pub fn from_legacy_flag(mut self, can_send_friend_request: bool) -> Self {
        self.allow_friend_requests = can_send_friend_request;
        self.pending_outbound = !can_send_friend_request;
        self
    }

    /// Both directed follow edges are present
    pub fn is_mutual_follow(&self) -> bool {
        self.is_following && self.is_followed_by
    }

    /// A friendship request is awaiting an answer
    pub fn has_pending_request(&self) -> bool {
        self.friendship_status == Some(FriendshipStatus::Pending)
    }

    /// Either side has blocked the other
    pub fn is_block_involved(&self) -> bool {
        self.is_blocked || self.is_blocked_by
    }
}
