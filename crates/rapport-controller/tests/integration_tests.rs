//! Integration tests for the relationship controls
//!
//! Several controls for the same profile run against one shared scripted
//! service, the way a profile page wires them.

use rapport_controller::{
    Activation, BlockControl, ControlError, FollowControl, FriendRequestControl, Mutation,
    MutationError, ScriptedMutations,
};
use rapport_domain::{
    FriendshipButtonStatus, RelationshipAction, RelationshipSignals, RelationshipStatus, UserId,
};
use std::sync::Arc;

fn followers_snapshot() -> RelationshipSignals {
    RelationshipSignals {
        is_followed_by: true,
        allow_friend_requests: true,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_follow_back_then_befriend() {
    let service = ScriptedMutations::new();
    let target = UserId::new(100);
    let follow = FollowControl::new(target, followers_snapshot(), Arc::new(service.clone()));

    assert_eq!(follow.status(), RelationshipStatus::Followers);
    assert_eq!(follow.action(), RelationshipAction::Follow);

    follow.toggle().await.unwrap();
    assert_eq!(follow.status(), RelationshipStatus::MutualFollow);
    assert!(follow.relationship().can_message());

    // The page re-renders the friend control from the follow control's state
    let friend = FriendRequestControl::new(target, follow.signals(), Arc::new(service.clone()));
    assert_eq!(friend.button_status(), FriendshipButtonStatus::None);
    assert_eq!(friend.primary().await.unwrap(), Activation::ComposerOpened);
    friend.confirm_composer().await.unwrap();

    assert_eq!(friend.status(), RelationshipStatus::RequestSent);
    let mutations: Vec<Mutation> = service.calls().iter().map(|c| c.mutation).collect();
    assert_eq!(mutations, vec![Mutation::Follow, Mutation::SendFriendRequest]);
}

#[tokio::test]
async fn test_failure_is_isolated_to_one_control() {
    let service = ScriptedMutations::new();
    let target = UserId::new(101);
    let follow = FollowControl::new(target, followers_snapshot(), Arc::new(service.clone()));
    let block = BlockControl::new(target, followers_snapshot(), Arc::new(service.clone()));

    service.fail_next(MutationError::Rejected("forbidden".to_string()));
    let err = block.block().await.unwrap_err();
    assert!(matches!(
        err,
        ControlError::MutationFailed {
            mutation: Mutation::Block,
            ..
        }
    ));
    assert_eq!(block.status(), RelationshipStatus::Followers);

    assert_eq!(follow.toggle().await.unwrap(), Activation::Committed);
    assert_eq!(follow.status(), RelationshipStatus::MutualFollow);
    assert_eq!(block.status(), RelationshipStatus::Followers);
}

#[tokio::test]
async fn test_error_message_names_mutation_and_target() {
    let service = ScriptedMutations::new();
    service.fail_next(MutationError::Network("timed out".to_string()));
    let follow = FollowControl::new(
        UserId::new(102),
        RelationshipSignals::default(),
        Arc::new(service),
    );

    let err = follow.toggle().await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "follow for user 102 failed: Network error: timed out"
    );
}

#[tokio::test]
async fn test_sync_replaces_optimistic_state() {
    let service = ScriptedMutations::gated();
    let follow = FollowControl::new(
        UserId::new(103),
        RelationshipSignals::default(),
        Arc::new(service.clone()),
    );
    let server_truth = RelationshipSignals {
        is_following: true,
        is_friend: true,
        ..Default::default()
    };

    let (outcome, ()) = tokio::join!(follow.toggle(), async {
        tokio::task::yield_now().await;
        assert!(follow.is_loading());
        follow.sync(server_truth);
        assert_eq!(follow.status(), RelationshipStatus::Friends);
        service.release(1);
    });

    assert_eq!(outcome.unwrap(), Activation::Committed);
    assert_eq!(follow.signals(), server_truth);
    assert!(!follow.is_loading());
}

#[tokio::test]
async fn test_controls_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FollowControl>();
    assert_send_sync::<FriendRequestControl>();
    assert_send_sync::<BlockControl>();

    let service = ScriptedMutations::new();
    let follow = Arc::new(FollowControl::new(
        UserId::new(104),
        RelationshipSignals::default(),
        Arc::new(service.clone()),
    ));

    let handle = tokio::spawn({
        let follow = Arc::clone(&follow);
        async move { follow.toggle().await }
    });

    assert_eq!(handle.await.unwrap().unwrap(), Activation::Committed);
    assert_eq!(follow.status(), RelationshipStatus::Following);
}
