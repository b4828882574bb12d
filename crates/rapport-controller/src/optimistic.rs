//! Optimistic state shared by every control
//!
//! One [`OptimisticCore`] per control instance. It owns the local signal
//! snapshot, the in-flight marker and the rollback bookkeeping. The state lock
//! is a plain `std::sync::Mutex` and is never held across the awaited
//! mutation, so a second activation on the same event loop sees the first one
//! in flight and is ignored.

use crate::{ControlError, Mutation, SocialMutations};
use rapport_domain::{RelationshipSignals, UserId, UserRelationship};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Interactive element of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Affordance {
    /// Follow/unfollow or block/unblock toggle
    Toggle,
    /// The friend-request control's main button
    Primary,
    /// Accept an inbound friend request
    Accept,
    /// Decline an inbound friend request
    Decline,
}

/// Outcome of activating an affordance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The mutation succeeded and the optimistic state was kept
    Committed,
    /// Nothing happened: the control was busy or the affordance does not
    /// apply to the current status
    Ignored,
    /// The friend request composer was revealed; no mutation was made
    ComposerOpened,
}

#[derive(Debug)]
struct CellState {
    signals: RelationshipSignals,
    in_flight: Option<Affordance>,
    /// Bumped by every `sync`; a rollback only applies to the generation it
    /// was captured in
    generation: u64,
}

pub(crate) struct OptimisticCore {
    target: UserId,
    service: Arc<dyn SocialMutations>,
    state: Mutex<CellState>,
}

impl OptimisticCore {
    pub(crate) fn new(
        target: UserId,
        signals: RelationshipSignals,
        service: Arc<dyn SocialMutations>,
    ) -> Self {
        Self {
            target,
            service,
            state: Mutex::new(CellState {
                signals,
                in_flight: None,
                generation: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CellState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn target(&self) -> UserId {
        self.target
    }

    pub(crate) fn signals(&self) -> RelationshipSignals {
        self.lock().signals
    }

    pub(crate) fn relationship(&self) -> UserRelationship {
        UserRelationship::resolve(self.signals())
    }

    pub(crate) fn is_loading(&self, affordance: Affordance) -> bool {
        self.lock().in_flight == Some(affordance)
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.lock().in_flight.is_some()
    }

    /// Replace local state with fresh server truth
    pub(crate) fn sync(&self, signals: RelationshipSignals) {
        let mut state = self.lock();
        state.signals = signals;
        state.generation = state.generation.wrapping_add(1);
        debug!(target_user = %self.target, in_flight = ?state.in_flight, "Synced relationship signals");
    }

    /// Run one optimistic mutation
    ///
    /// `plan` sees the current signals and returns the mutation to perform
    /// with the state to show while it runs, or `None` when the affordance
    /// does not apply. On failure the captured state is restored unless a
    /// `sync` replaced it in the meantime.
    pub(crate) async fn activate<F>(
        &self,
        affordance: Affordance,
        message: Option<&str>,
        plan: F,
    ) -> Result<Activation, ControlError>
    where
        F: FnOnce(&RelationshipSignals) -> Option<(Mutation, RelationshipSignals)>,
    {
        let (mutation, rollback, generation) = {
            let mut state = self.lock();

            if let Some(busy) = state.in_flight {
                debug!(
                    target_user = %self.target,
                    ?affordance,
                    ?busy,
                    "Activation ignored: control is busy"
                );
                return Ok(Activation::Ignored);
            }

            let Some((mutation, next)) = plan(&state.signals) else {
                debug!(
                    target_user = %self.target,
                    ?affordance,
                    signals = ?state.signals,
                    "Activation ignored: affordance does not apply"
                );
                return Ok(Activation::Ignored);
            };

            let rollback = std::mem::replace(&mut state.signals, next);
            state.in_flight = Some(affordance);
            (mutation, rollback, state.generation)
        };

        debug!(target_user = %self.target, %mutation, "Mutation started");

        let mut pending = InFlight {
            core: self,
            rollback,
            generation,
            settled: false,
        };

        match mutation
            .apply(self.service.as_ref(), self.target, message)
            .await
        {
            Ok(()) => {
                pending.commit();
                info!(target_user = %self.target, %mutation, "Mutation committed");
                Ok(Activation::Committed)
            }
            Err(source) => {
                let restored = pending.roll_back();
                warn!(
                    target_user = %self.target,
                    %mutation,
                    restored,
                    "Mutation failed: {}",
                    source
                );
                Err(ControlError::MutationFailed {
                    mutation,
                    target: self.target,
                    source,
                })
            }
        }
    }
}

/// Bookkeeping for one in-flight mutation
///
/// Dropping it unsettled (the activation future was dropped) rolls back.
struct InFlight<'a> {
    core: &'a OptimisticCore,
    rollback: RelationshipSignals,
    generation: u64,
    settled: bool,
}

impl InFlight<'_> {
    fn commit(&mut self) {
        self.settled = true;
        self.core.lock().in_flight = None;
    }

    /// Returns whether the rollback point was restored
    fn roll_back(&mut self) -> bool {
        self.settled = true;
        let mut state = self.core.lock();
        state.in_flight = None;
        if state.generation == self.generation {
            state.signals = self.rollback;
            true
        } else {
            false
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.roll_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MutationError, ScriptedMutations};

    fn create_core(service: &ScriptedMutations) -> OptimisticCore {
        OptimisticCore::new(
            UserId::new(7),
            RelationshipSignals::default(),
            Arc::new(service.clone()),
        )
    }

    fn follow_plan(signals: &RelationshipSignals) -> Option<(Mutation, RelationshipSignals)> {
        let mut next = *signals;
        next.is_following = true;
        Some((Mutation::Follow, next))
    }

    #[tokio::test]
    async fn test_commit_keeps_optimistic_state() {
        let service = ScriptedMutations::new();
        let core = create_core(&service);

        let outcome = core.activate(Affordance::Toggle, None, follow_plan).await;

        assert_eq!(outcome.unwrap(), Activation::Committed);
        assert!(core.signals().is_following);
        assert!(!core.is_busy());
    }

    #[tokio::test]
    async fn test_failure_restores_rollback_point() {
        let service = ScriptedMutations::new();
        service.fail_next(MutationError::Rejected("nope".to_string()));
        let core = create_core(&service);

        let err = core
            .activate(Affordance::Toggle, None, follow_plan)
            .await
            .unwrap_err();

        assert_eq!(err.mutation_error(), &MutationError::Rejected("nope".to_string()));
        assert_eq!(core.signals(), RelationshipSignals::default());
        assert!(!core.is_loading(Affordance::Toggle));
    }

    #[tokio::test]
    async fn test_plan_returning_none_is_ignored() {
        let service = ScriptedMutations::new();
        let core = create_core(&service);

        let outcome = core.activate(Affordance::Accept, None, |_| None).await;

        assert_eq!(outcome.unwrap(), Activation::Ignored);
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn test_sync_during_flight_wins_over_rollback() {
        let service = ScriptedMutations::gated();
        service.fail_next(MutationError::Network("timeout".to_string()));
        let core = create_core(&service);

        let server_truth = RelationshipSignals {
            is_followed_by: true,
            ..Default::default()
        };

        let (outcome, ()) = tokio::join!(
            core.activate(Affordance::Toggle, None, follow_plan),
            async {
                tokio::task::yield_now().await;
                assert!(core.is_loading(Affordance::Toggle));
                core.sync(server_truth);
                service.release(1);
            }
        );

        assert!(outcome.is_err());
        assert_eq!(core.signals(), server_truth);
        assert!(!core.is_busy());
    }

    #[tokio::test]
    async fn test_dropped_activation_rolls_back() {
        let service = ScriptedMutations::gated();
        let core = create_core(&service);

        {
            let activation = core.activate(Affordance::Toggle, None, follow_plan);
            tokio::pin!(activation);
            // Poll once so the optimistic state is applied, then abandon it
            let polled = poll_once(activation.as_mut()).await;
            assert!(polled.is_none());
            assert!(core.signals().is_following);
        }

        assert!(!core.signals().is_following);
        assert!(!core.is_busy());
    }

    async fn poll_once<F: std::future::Future + Unpin>(fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            out = fut => Some(out),
            _ = std::future::ready(()) => None,
        }
    }
}
