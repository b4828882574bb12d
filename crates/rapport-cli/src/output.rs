//! Output formatting for the CLI.

use crate::commands::simulate::{Simulation, StepOutcome};
use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use rapport_domain::{
    get_available_action, to_friendship_button_status, RelationshipSignals, RelationshipStatus,
    UserRelationship,
};
use rapport_gatekeeper::{ValidationResult, ValidationStatus};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a validated relationship.
    pub fn format_resolution(&self, result: &ValidationResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_resolution_json(result),
            OutputFormat::Table => Ok(self.format_resolution_table(result)),
            OutputFormat::Quiet => Ok(result.relationship.status.to_string()),
        }
    }

    fn format_resolution_json(&self, result: &ValidationResult) -> Result<String> {
        let findings: Vec<String> = result.findings.iter().map(ToString::to_string).collect();
        let json = serde_json::json!({
            "validation": result.status.as_str(),
            "findings": findings,
            "relationship": relationship_json(&result.relationship),
        });
        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn format_resolution_table(&self, result: &ValidationResult) -> String {
        let relationship = &result.relationship;

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Status", relationship.status.as_str()]);
        builder.push_record(["Action", relationship.action.as_str()]);
        builder.push_record([
            "Friend button",
            relationship.friendship_button_status().as_str(),
        ]);
        builder.push_record(["Can interact", yes_no(relationship.can_interact())]);
        builder.push_record(["Can message", yes_no(relationship.can_message())]);
        builder.push_record(["Validation", result.status.as_str()]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut output = table.to_string();
        for finding in &result.findings {
            output.push('\n');
            output.push_str(&match result.status {
                ValidationStatus::Rejected => self.error(&finding.to_string()),
                ValidationStatus::Accepted | ValidationStatus::Normalized => {
                    self.warning(&finding.to_string())
                }
            });
        }
        output
    }

    /// Format the status to action table.
    ///
    /// `none` is the only status whose action depends on the signals, so it
    /// gets one column per friend request policy.
    pub fn format_action_table(&self) -> Result<String> {
        let open = RelationshipSignals {
            allow_friend_requests: true,
            ..Default::default()
        };
        let closed = RelationshipSignals::default();

        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = RelationshipStatus::ALL
                    .iter()
                    .map(|status| {
                        serde_json::json!({
                            "status": status.as_str(),
                            "action_requests_open": get_available_action(*status, &open).as_str(),
                            "action_requests_closed": get_available_action(*status, &closed).as_str(),
                            "friend_button": to_friendship_button_status(*status).as_str(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record([
                    "Status",
                    "Action (requests open)",
                    "Action (requests closed)",
                    "Friend button",
                ]);
                for status in RelationshipStatus::ALL {
                    builder.push_record([
                        status.as_str(),
                        get_available_action(status, &open).as_str(),
                        get_available_action(status, &closed).as_str(),
                        to_friendship_button_status(status).as_str(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(RelationshipStatus::ALL
                .iter()
                .map(|status| status.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a simulation run.
    pub fn format_simulation(&self, simulation: &Simulation) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let steps: Vec<serde_json::Value> = simulation
                    .steps
                    .iter()
                    .map(|report| {
                        serde_json::json!({
                            "step": report.index,
                            "name": report.step.as_str(),
                            "outcome": report.outcome.label(),
                            "relationship": relationship_json(&report.relationship),
                        })
                    })
                    .collect();
                let calls: Vec<serde_json::Value> = simulation
                    .calls
                    .iter()
                    .map(|call| {
                        serde_json::json!({
                            "mutation": call.mutation.as_str(),
                            "target": call.target.value(),
                            "message": call.message,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(
                    &serde_json::json!({ "steps": steps, "calls": calls }),
                )?)
            }
            OutputFormat::Table => {
                if simulation.steps.is_empty() {
                    return Ok(self.colorize("No steps run.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["#", "Step", "Outcome", "Status", "Action"]);
                for report in &simulation.steps {
                    let outcome = match &report.outcome {
                        StepOutcome::Failed(_) => self.colorize(&report.outcome.label(), "red"),
                        StepOutcome::Activated(_) | StepOutcome::Discarded => {
                            report.outcome.label()
                        }
                    };
                    builder.push_record([
                        report.index.to_string(),
                        report.step.as_str().to_string(),
                        outcome,
                        report.relationship.status.to_string(),
                        report.relationship.action.to_string(),
                    ]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                let summary =
                    self.info(&format!("{} mutation call(s)", simulation.calls.len()));
                Ok(format!("{}\n{}", table, summary))
            }
            OutputFormat::Quiet => Ok(simulation
                .steps
                .last()
                .map(|report| report.relationship.status.to_string())
                .unwrap_or_default()),
        }
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn relationship_json(relationship: &UserRelationship) -> serde_json::Value {
    let signals = &relationship.signals;
    serde_json::json!({
        "status": relationship.status.as_str(),
        "action": relationship.action.as_str(),
        "friend_button": relationship.friendship_button_status().as_str(),
        "can_interact": relationship.can_interact(),
        "can_message": relationship.can_message(),
        "signals": {
            "is_following": signals.is_following,
            "is_followed_by": signals.is_followed_by,
            "is_mutual_follow": signals.is_mutual_follow(),
            "is_friend": signals.is_friend,
            "friendship_status": signals.friendship_status.map(|s| s.as_str()),
            "is_blocked": signals.is_blocked,
            "is_blocked_by": signals.is_blocked_by,
            "allow_friend_requests": signals.allow_friend_requests,
            "pending_outbound": signals.pending_outbound,
        },
    })
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
