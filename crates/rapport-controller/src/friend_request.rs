//! Friend request control
//!
//! Five visual states, taken from [`FriendshipButtonStatus`]:
//!
//! | state             | affordances                                  |
//! |-------------------|----------------------------------------------|
//! | `none`            | open the composer, then confirm or cancel it |
//! | `friends`         | remove friend                                |
//! | `request_sent`    | cancel request                               |
//! | `pending_request` | accept, decline                              |
//! | `blocked`         | none                                         |
//!
//! Accept and decline have their own loading flags but share the control's
//! in-flight slot, so activating one while the other runs is ignored.

use crate::optimistic::OptimisticCore;
use crate::{Activation, Affordance, ControlError, Mutation, SocialMutations};
use rapport_domain::{
    calculate_relationship_status, to_friendship_button_status, FriendshipButtonStatus,
    FriendshipStatus, RelationshipAction, RelationshipSignals, RelationshipStatus, UserId,
    UserRelationship,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Default)]
struct Composer {
    open: bool,
    message: String,
}

/// Friend request control for one target user
pub struct FriendRequestControl {
    core: OptimisticCore,
    composer: Mutex<Composer>,
}

impl FriendRequestControl {
    /// Create a control seeded with the server's snapshot
    pub fn new(
        target: UserId,
        signals: RelationshipSignals,
        service: Arc<dyn SocialMutations>,
    ) -> Self {
        Self {
            core: OptimisticCore::new(target, signals, service),
            composer: Mutex::new(Composer::default()),
        }
    }

    fn composer(&self) -> MutexGuard<'_, Composer> {
        self.composer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current visual state
    pub fn button_status(&self) -> FriendshipButtonStatus {
        self.core.relationship().friendship_button_status()
    }

    /// Activate the main affordance of the current state
    ///
    /// `none` opens the composer, `friends` removes the friend and
    /// `request_sent` cancels the request. `pending_request` has two
    /// affordances and `blocked` none, so both are ignored here.
    pub async fn primary(&self) -> Result<Activation, ControlError> {
        match self.button_status() {
            FriendshipButtonStatus::None => Ok(self.open_composer()),
            FriendshipButtonStatus::Friends => self.remove_friend().await,
            FriendshipButtonStatus::RequestSent => self.cancel_request().await,
            status @ (FriendshipButtonStatus::PendingRequest | FriendshipButtonStatus::Blocked) => {
                debug!(target_user = %self.core.target(), %status, "Primary affordance ignored");
                Ok(Activation::Ignored)
            }
        }
    }

    /// Reveal the request composer
    ///
    /// Only in the `none` state, when the target accepts requests and nothing
    /// is in flight. No mutation is made.
    pub fn open_composer(&self) -> Activation {
        let signals = self.core.signals();
        let allowed = !self.core.is_busy()
            && signals.allow_friend_requests
            && self.button_status() == FriendshipButtonStatus::None;

        if !allowed {
            debug!(target_user = %self.core.target(), "Composer not available");
            return Activation::Ignored;
        }

        self.composer().open = true;
        Activation::ComposerOpened
    }

    /// Whether the composer is showing
    pub fn is_composer_open(&self) -> bool {
        self.composer().open
    }

    /// Draft note for the request
    pub fn message(&self) -> String {
        self.composer().message.clone()
    }

    /// Replace the draft note
    pub fn set_message(&self, message: impl Into<String>) {
        self.composer().message = message.into();
    }

    /// Close the composer and discard the draft
    pub fn cancel_composer(&self) {
        let mut composer = self.composer();
        composer.open = false;
        composer.message.clear();
    }

    /// Send the request with the drafted note
    ///
    /// A blank note is sent as no note. On success the composer closes and
    /// the draft is cleared; on failure both are kept so the user can retry.
    pub async fn confirm_composer(&self) -> Result<Activation, ControlError> {
        let message = {
            let composer = self.composer();
            if !composer.open {
                return Ok(Activation::Ignored);
            }
            let trimmed = composer.message.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        let outcome = self
            .core
            .activate(Affordance::Primary, message.as_deref(), |signals| {
                let button = to_friendship_button_status(calculate_relationship_status(signals));
                if button != FriendshipButtonStatus::None || !signals.allow_friend_requests {
                    return None;
                }
                let mut next = *signals;
                next.friendship_status = Some(FriendshipStatus::Pending);
                next.pending_outbound = true;
                Some((Mutation::SendFriendRequest, next))
            })
            .await?;

        if outcome == Activation::Committed {
            self.cancel_composer();
        }
        Ok(outcome)
    }

    /// End the friendship
    pub async fn remove_friend(&self) -> Result<Activation, ControlError> {
        self.core
            .activate(Affordance::Primary, None, |signals| {
                if calculate_relationship_status(signals) != RelationshipStatus::Friends {
                    return None;
                }
                let mut next = *signals;
                next.is_friend = false;
                next.friendship_status = None;
                Some((Mutation::RemoveFriend, next))
            })
            .await
    }

    /// Withdraw the viewer's pending request
    pub async fn cancel_request(&self) -> Result<Activation, ControlError> {
        self.core
            .activate(Affordance::Primary, None, |signals| {
                if calculate_relationship_status(signals) != RelationshipStatus::RequestSent {
                    return None;
                }
                let mut next = *signals;
                next.friendship_status = None;
                next.pending_outbound = false;
                next.allow_friend_requests = true;
                Some((Mutation::CancelFriendRequest, next))
            })
            .await
    }

    /// Accept the target's pending request
    pub async fn accept(&self) -> Result<Activation, ControlError> {
        self.core
            .activate(Affordance::Accept, None, |signals| {
                if calculate_relationship_status(signals) != RelationshipStatus::PendingRequest {
                    return None;
                }
                let mut next = *signals;
                next.is_friend = true;
                next.friendship_status = Some(FriendshipStatus::Accepted);
                Some((Mutation::AcceptFriendRequest, next))
            })
            .await
    }

    /// Decline the target's pending request
    pub async fn decline(&self) -> Result<Activation, ControlError> {
        self.core
            .activate(Affordance::Decline, None, |signals| {
                if calculate_relationship_status(signals) != RelationshipStatus::PendingRequest {
                    return None;
                }
                let mut next = *signals;
                next.friendship_status = Some(FriendshipStatus::Declined);
                Some((Mutation::DeclineFriendRequest, next))
            })
            .await
    }

    /// Target user
    pub fn target(&self) -> UserId {
        self.core.target()
    }

    /// Current (possibly optimistic) status
    pub fn status(&self) -> RelationshipStatus {
        self.core.relationship().status
    }

    /// Action offered for the current status
    pub fn action(&self) -> RelationshipAction {
        self.core.relationship().action
    }

    /// Current resolved view
    pub fn relationship(&self) -> UserRelationship {
        self.core.relationship()
    }

    /// Current signals
    pub fn signals(&self) -> RelationshipSignals {
        self.core.signals()
    }

    /// Whether the given affordance is awaiting the server
    pub fn is_loading(&self, affordance: Affordance) -> bool {
        self.core.is_loading(affordance)
    }

    /// Replace local state with a fresh server snapshot
    ///
    /// The composer closes and its draft is dropped once the snapshot leaves
    /// the `none` state.
    pub fn sync(&self, signals: RelationshipSignals) {
        self.core.sync(signals);
        if self.button_status() != FriendshipButtonStatus::None {
            self.cancel_composer();
        }
    }
}
