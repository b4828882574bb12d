//! Injected mutation callbacks and an in-memory implementation.

use crate::MutationError;
use async_trait::async_trait;
use rapport_domain::UserId;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Semaphore;

/// Server-side relationship mutations a control may invoke
///
/// Implemented by the transport layer. Each call either resolves (the server
/// accepted the change) or rejects with a [`MutationError`]. Controls hold an
/// `Arc<dyn SocialMutations>`; there is no global service object.
#[async_trait]
pub trait SocialMutations: Send + Sync {
    /// Start following the target
    async fn follow(&self, target: UserId) -> Result<(), MutationError>;

    /// Stop following the target
    async fn unfollow(&self, target: UserId) -> Result<(), MutationError>;

    /// Send a friend request, optionally with a note
    async fn send_friend_request(
        &self,
        target: UserId,
        message: Option<&str>,
    ) -> Result<(), MutationError>;

    /// Accept the target's pending request
    async fn accept_friend_request(&self, target: UserId) -> Result<(), MutationError>;

    /// Decline the target's pending request
    async fn decline_friend_request(&self, target: UserId) -> Result<(), MutationError>;

    /// Withdraw the viewer's pending request
    ///
    /// Not every backend exposes this; the default reports it as unsupported,
    /// which the control handles like any other rejection.
    async fn cancel_friend_request(&self, _target: UserId) -> Result<(), MutationError> {
        Err(MutationError::Unsupported("cancel_friend_request"))
    }

    /// End the friendship
    async fn remove_friend(&self, target: UserId) -> Result<(), MutationError>;

    /// Block the target
    async fn block(&self, target: UserId) -> Result<(), MutationError>;

    /// Lift the viewer's block on the target
    async fn unblock(&self, target: UserId) -> Result<(), MutationError>;
}

/// One server-side mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    /// [`SocialMutations::follow`]
    Follow,
    /// [`SocialMutations::unfollow`]
    Unfollow,
    /// [`SocialMutations::send_friend_request`]
    SendFriendRequest,
    /// [`SocialMutations::accept_friend_request`]
    AcceptFriendRequest,
    /// [`SocialMutations::decline_friend_request`]
    DeclineFriendRequest,
    /// [`SocialMutations::cancel_friend_request`]
    CancelFriendRequest,
    /// [`SocialMutations::remove_friend`]
    RemoveFriend,
    /// [`SocialMutations::block`]
    Block,
    /// [`SocialMutations::unblock`]
    Unblock,
}

impl Mutation {
    /// Get the mutation name
    pub fn as_str(&self) -> &'static str {
        match self {
            Mutation::Follow => "follow",
            Mutation::Unfollow => "unfollow",
            Mutation::SendFriendRequest => "send_friend_request",
            Mutation::AcceptFriendRequest => "accept_friend_request",
            Mutation::DeclineFriendRequest => "decline_friend_request",
            Mutation::CancelFriendRequest => "cancel_friend_request",
            Mutation::RemoveFriend => "remove_friend",
            Mutation::Block => "block",
            Mutation::Unblock => "unblock",
        }
    }

    /// Invoke the matching callback on a service
    ///
    /// `message` is only used by `SendFriendRequest`.
    pub async fn apply(
        self,
        service: &dyn SocialMutations,
        target: UserId,
        message: Option<&str>,
    ) -> Result<(), MutationError> {
        match self {
            Mutation::Follow => service.follow(target).await,
            Mutation::Unfollow => service.unfollow(target).await,
            Mutation::SendFriendRequest => service.send_friend_request(target, message).await,
            Mutation::AcceptFriendRequest => service.accept_friend_request(target).await,
            Mutation::DeclineFriendRequest => service.decline_friend_request(target).await,
            Mutation::CancelFriendRequest => service.cancel_friend_request(target).await,
            Mutation::RemoveFriend => service.remove_friend(target).await,
            Mutation::Block => service.block(target).await,
            Mutation::Unblock => service.unblock(target).await,
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A call received by [`ScriptedMutations`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Which mutation was invoked
    pub mutation: Mutation,
    /// Target user
    pub target: UserId,
    /// Friend request note, if any
    pub message: Option<String>,
}

#[derive(Debug, Default)]
struct Script {
    calls: Vec<RecordedCall>,
    failures: Vec<MutationError>,
}

/// In-memory mutation service with scripted outcomes
///
/// Records every call, fails the next calls queued with
/// [`ScriptedMutations::fail_next`], and optionally parks each call until
/// [`ScriptedMutations::release`] lets it through, which makes in-flight
/// windows observable.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMutations {
    script: Arc<Mutex<Script>>,
    gate: Option<Arc<Semaphore>>,
}

impl ScriptedMutations {
    /// A service where every call succeeds immediately
    pub fn new() -> Self {
        Self::default()
    }

    /// A service where every call waits for [`ScriptedMutations::release`]
    pub fn gated() -> Self {
        Self {
            script: Arc::default(),
            gate: Some(Arc::new(Semaphore::new(0))),
        }
    }

    /// Queue a failure for the next unanswered call
    pub fn fail_next(&self, error: MutationError) {
        self.lock().failures.push(error);
    }

    /// Let `count` parked calls complete (no-op for ungated services)
    pub fn release(&self, count: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(count);
        }
    }

    /// Every call received so far, in arrival order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn record(
        &self,
        mutation: Mutation,
        target: UserId,
        message: Option<&str>,
    ) -> Result<(), MutationError> {
        self.lock().calls.push(RecordedCall {
            mutation,
            target,
            message: message.map(str::to_string),
        });

        if let Some(gate) = &self.gate {
            // A closed semaphore means the script is being torn down
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        let mut script = self.lock();
        if script.failures.is_empty() {
            Ok(())
        } else {
            Err(script.failures.remove(0))
        }
    }
}

#[async_trait]
impl SocialMutations for ScriptedMutations {
    async fn follow(&self, target: UserId) -> Result<(), MutationError> {
        self.record(Mutation::Follow, target, None).await
    }

    async fn unfollow(&self, target: UserId) -> Result<(), MutationError> {
        self.record(Mutation::Unfollow, target, None).await
    }

    async fn send_friend_request(
        &self,
        target: UserId,
        message: Option<&str>,
    ) -> Result<(), MutationError> {
        self.record(Mutation::SendFriendRequest, target, message).await
    }

    async fn accept_friend_request(&self, target: UserId) -> Result<(), MutationError> {
        self.record(Mutation::AcceptFriendRequest, target, None).await
    }

    async fn decline_friend_request(&self, target: UserId) -> Result<(), MutationError> {
        self.record(Mutation::DeclineFriendRequest, target, None).await
    }

    async fn cancel_friend_request(&self, target: UserId) -> Result<(), MutationError> {
        self.record(Mutation::CancelFriendRequest, target, None).await
    }

    async fn remove_friend(&self, target: UserId) -> Result<(), MutationError> {
        self.record(Mutation::RemoveFriend, target, None).await
    }

    async fn block(&self, target: UserId) -> Result<(), MutationError> {
        self.record(Mutation::Block, target, None).await
    }

    async fn unblock(&self, target: UserId) -> Result<(), MutationError> {
        self.record(Mutation::Unblock, target, None).await
    }
}
