//! Simulate command implementation.
//!
//! Drives one control through a list of steps against a scripted mutation
//! service and reports the state after each step.

use crate::cli::{ControlArg, SimulateArgs, StepArg};
use crate::commands::resolve::load_snapshot;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rapport_controller::{
    Activation, BlockControl, ControlError, FollowControl, FriendRequestControl, MutationError,
    RecordedCall, ScriptedMutations, SocialMutations,
};
use rapport_domain::{RelationshipSignals, UserId, UserRelationship};
use rapport_gatekeeper::Gatekeeper;
use std::sync::Arc;

/// What a single step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The control reported an activation
    Activated(Activation),
    /// The composer was closed without sending
    Discarded,
    /// The mutation failed and the control rolled back
    Failed(String),
}

impl StepOutcome {
    /// Short label for tables and JSON
    pub fn label(&self) -> String {
        match self {
            StepOutcome::Activated(Activation::Committed) => "committed".to_string(),
            StepOutcome::Activated(Activation::Ignored) => "ignored".to_string(),
            StepOutcome::Activated(Activation::ComposerOpened) => "composer_opened".to_string(),
            StepOutcome::Discarded => "discarded".to_string(),
            StepOutcome::Failed(reason) => format!("failed: {}", reason),
        }
    }
}

/// State after one step.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// 1-based step number
    pub index: usize,
    /// Step that ran
    pub step: StepArg,
    /// What the step did
    pub outcome: StepOutcome,
    /// Resolved relationship after the step
    pub relationship: UserRelationship,
}

/// Result of a full simulation run.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// One report per step
    pub steps: Vec<StepReport>,
    /// Mutation calls the scripted service received
    pub calls: Vec<RecordedCall>,
}

enum Harness {
    Follow(FollowControl),
    FriendRequest(FriendRequestControl),
    Block(BlockControl),
}

impl Harness {
    fn new(
        control: ControlArg,
        target: UserId,
        signals: RelationshipSignals,
        service: Arc<dyn SocialMutations>,
    ) -> Self {
        match control {
            ControlArg::Follow => Harness::Follow(FollowControl::new(target, signals, service)),
            ControlArg::FriendRequest => {
                Harness::FriendRequest(FriendRequestControl::new(target, signals, service))
            }
            ControlArg::Block => Harness::Block(BlockControl::new(target, signals, service)),
        }
    }

    fn supports(control: ControlArg, step: StepArg) -> bool {
        match control {
            ControlArg::Follow => matches!(step, StepArg::Toggle),
            ControlArg::FriendRequest => matches!(
                step,
                StepArg::Primary
                    | StepArg::Open
                    | StepArg::Confirm
                    | StepArg::Discard
                    | StepArg::Accept
                    | StepArg::Decline
                    | StepArg::Remove
                    | StepArg::Cancel
            ),
            ControlArg::Block => {
                matches!(step, StepArg::Toggle | StepArg::Block | StepArg::Unblock)
            }
        }
    }

    fn relationship(&self) -> UserRelationship {
        match self {
            Harness::Follow(control) => control.relationship(),
            Harness::FriendRequest(control) => control.relationship(),
            Harness::Block(control) => control.relationship(),
        }
    }

    async fn run(
        &self,
        step: StepArg,
        message: Option<&str>,
    ) -> std::result::Result<StepOutcome, ControlError> {
        let activation = match (self, step) {
            (Harness::Follow(control), StepArg::Toggle) => control.toggle().await?,

            (Harness::FriendRequest(control), StepArg::Primary | StepArg::Open) => {
                let activation = if step == StepArg::Open {
                    control.open_composer()
                } else {
                    control.primary().await?
                };
                if let (Activation::ComposerOpened, Some(message)) = (activation, message) {
                    control.set_message(message);
                }
                activation
            }
            (Harness::FriendRequest(control), StepArg::Confirm) => {
                control.confirm_composer().await?
            }
            (Harness::FriendRequest(control), StepArg::Discard) => {
                control.cancel_composer();
                return Ok(StepOutcome::Discarded);
            }
            (Harness::FriendRequest(control), StepArg::Accept) => control.accept().await?,
            (Harness::FriendRequest(control), StepArg::Decline) => control.decline().await?,
            (Harness::FriendRequest(control), StepArg::Remove) => control.remove_friend().await?,
            (Harness::FriendRequest(control), StepArg::Cancel) => {
                control.cancel_request().await?
            }

            (Harness::Block(control), StepArg::Toggle) => control.toggle().await?,
            (Harness::Block(control), StepArg::Block) => control.block().await?,
            (Harness::Block(control), StepArg::Unblock) => control.unblock().await?,

            // Filtered out by `supports` before the run starts
            _ => Activation::Ignored,
        };

        Ok(StepOutcome::Activated(activation))
    }
}

/// Run the steps and collect a report.
///
/// With `fail_fast`, the first failed step aborts the run with its error.
pub async fn run_simulation(args: &SimulateArgs, gatekeeper: &Gatekeeper) -> Result<Simulation> {
    if let Some(step) = args
        .steps
        .iter()
        .find(|step| !Harness::supports(args.control, **step))
    {
        return Err(CliError::InvalidInput(format!(
            "step '{}' does not apply to the {:?} control",
            step.as_str(),
            args.control
        )));
    }

    let relationship = load_snapshot(&args.snapshot, gatekeeper)?.into_relationship()?;

    let service = ScriptedMutations::new();
    for _ in 0..args.fail {
        service.fail_next(MutationError::Network("simulated failure".to_string()));
    }

    let harness = Harness::new(
        args.control,
        UserId::new(args.target),
        relationship.signals,
        Arc::new(service.clone()),
    );

    let mut steps = Vec::with_capacity(args.steps.len());
    for (i, step) in args.steps.iter().copied().enumerate() {
        let outcome = match harness.run(step, args.message.as_deref()).await {
            Ok(outcome) => outcome,
            Err(err) if args.fail_fast => return Err(err.into()),
            Err(err) => StepOutcome::Failed(err.mutation_error().to_string()),
        };

        tracing::debug!(step = step.as_str(), outcome = %outcome.label(), "Simulation step");

        steps.push(StepReport {
            index: i + 1,
            step,
            outcome,
            relationship: harness.relationship(),
        });
    }

    Ok(Simulation {
        steps,
        calls: service.calls(),
    })
}

/// Execute the simulate command.
pub async fn execute_simulate(
    args: SimulateArgs,
    gatekeeper: &Gatekeeper,
    formatter: &Formatter,
) -> Result<()> {
    let simulation = run_simulation(&args, gatekeeper).await?;
    println!("{}", formatter.format_simulation(&simulation)?);
    Ok(())
}
