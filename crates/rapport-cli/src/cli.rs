//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use rapport_gatekeeper::WireRelationship;

/// Rapport CLI - Resolve and exercise relationships between two users.
#[derive(Debug, Parser)]
#[command(name = "rapport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RAPPORT_CONFIG")]
    pub config: Option<String>,

    /// Validation preset, overriding the config file
    #[arg(long, value_enum, global = true)]
    pub validation: Option<PresetArg>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (status only)
    Quiet,
}

/// Validation preset options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Reject only unknown friendship statuses
    Default,
    /// Normalize every recoverable inconsistency
    Permissive,
    /// Reject every inconsistency
    Strict,
}

impl PresetArg {
    /// Preset name understood by the gatekeeper
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetArg::Default => "default",
            PresetArg::Permissive => "permissive",
            PresetArg::Strict => "strict",
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a relationship snapshot to its status and action
    Resolve(ResolveArgs),

    /// Print the status/action table
    Actions,

    /// Drive a control through a sequence of steps
    Simulate(SimulateArgs),
}

/// Where a relationship snapshot comes from.
///
/// Either a JSON payload (file or stdin) in the API's wire shape, or the
/// individual flags below.
#[derive(Debug, Clone, Default, Args)]
pub struct SnapshotArgs {
    /// JSON file containing a relationship payload
    #[arg(long, conflicts_with = "stdin")]
    pub file: Option<String>,

    /// Read the JSON payload from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Viewer follows target
    #[arg(long)]
    pub following: bool,

    /// Target follows viewer
    #[arg(long)]
    pub followed_by: bool,

    /// Viewer and target are friends
    #[arg(long)]
    pub friend: bool,

    /// Friendship request state (pending, accepted, declined)
    #[arg(long)]
    pub friendship_status: Option<String>,

    /// Viewer blocked target
    #[arg(long)]
    pub blocked: bool,

    /// Target blocked viewer
    #[arg(long)]
    pub blocked_by: bool,

    /// The API's `canSendFriendRequest` flag
    #[arg(long)]
    pub can_send_friend_request: bool,
}

impl SnapshotArgs {
    /// Whether the snapshot is read as JSON rather than built from flags
    pub fn reads_payload(&self) -> bool {
        self.file.is_some() || self.stdin
    }

    /// Build a wire payload from the individual flags
    pub fn to_wire(&self) -> WireRelationship {
        WireRelationship {
            is_following: self.following,
            is_followed_by: self.followed_by,
            is_friend: self.friend,
            can_send_friend_request: self.can_send_friend_request,
            friendship_status: self.friendship_status.clone(),
            is_blocked: self.blocked,
            is_blocked_by: self.blocked_by,
            ..Default::default()
        }
    }
}

/// Arguments for the resolve command.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,
}

/// Arguments for the simulate command.
#[derive(Debug, Parser)]
pub struct SimulateArgs {
    /// Control to drive
    #[arg(value_enum)]
    pub control: ControlArg,

    /// Steps to run in order
    #[arg(value_enum, required = true)]
    pub steps: Vec<StepArg>,

    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Target user id
    #[arg(short, long, default_value = "1")]
    pub target: u64,

    /// Note to type into the friend request composer
    #[arg(short, long)]
    pub message: Option<String>,

    /// Fail the first N mutation calls
    #[arg(long, default_value = "0")]
    pub fail: usize,

    /// Stop at the first failed step
    #[arg(long)]
    pub fail_fast: bool,
}

/// Control argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ControlArg {
    /// Follow/unfollow toggle
    Follow,
    /// Friend request button
    FriendRequest,
    /// Block/unblock
    Block,
}

/// Simulation step argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StepArg {
    /// Toggle follow or block
    Toggle,
    /// Friend request main button
    Primary,
    /// Open the composer
    Open,
    /// Send the composed request
    Confirm,
    /// Discard the composer
    Discard,
    /// Accept an inbound request
    Accept,
    /// Decline an inbound request
    Decline,
    /// Remove a friend
    Remove,
    /// Cancel an outbound request
    Cancel,
    /// Block the target
    Block,
    /// Unblock the target
    Unblock,
}

impl StepArg {
    /// Step name as typed on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            StepArg::Toggle => "toggle",
            StepArg::Primary => "primary",
            StepArg::Open => "open",
            StepArg::Confirm => "confirm",
            StepArg::Discard => "discard",
            StepArg::Accept => "accept",
            StepArg::Decline => "decline",
            StepArg::Remove => "remove",
            StepArg::Cancel => "cancel",
            StepArg::Block => "block",
            StepArg::Unblock => "unblock",
        }
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
