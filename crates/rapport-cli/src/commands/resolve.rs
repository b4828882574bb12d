//! Resolve command implementation.

use crate::cli::{ResolveArgs, SnapshotArgs};
use crate::error::Result;
use crate::output::Formatter;
use rapport_gatekeeper::{Gatekeeper, ValidationResult};
use std::fs;
use std::io::Read;

/// Read a snapshot from a JSON payload or the individual flags and validate it.
pub fn load_snapshot(args: &SnapshotArgs, gatekeeper: &Gatekeeper) -> Result<ValidationResult> {
    if let Some(path) = &args.file {
        let json = fs::read_to_string(path)?;
        return Ok(gatekeeper.validate_json(&json)?);
    }

    if args.stdin {
        let mut json = String::new();
        std::io::stdin().read_to_string(&mut json)?;
        return Ok(gatekeeper.validate_json(&json)?);
    }

    Ok(gatekeeper.validate(&args.to_wire())?)
}

/// Execute the resolve command.
///
/// The resolution is printed even when the payload is rejected, so the
/// findings are visible; the command then fails.
pub async fn execute_resolve(
    args: ResolveArgs,
    gatekeeper: &Gatekeeper,
    formatter: &Formatter,
) -> Result<()> {
    let result = load_snapshot(&args.snapshot, gatekeeper)?;
    println!("{}", formatter.format_resolution(&result)?);

    result.into_relationship()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapport_domain::{RelationshipAction, RelationshipStatus};
    use rapport_gatekeeper::{GatekeeperError, ValidationConfig, ValidationStatus};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_snapshot_from_flags() {
        let args = SnapshotArgs {
            followed_by: true,
            can_send_friend_request: true,
            ..Default::default()
        };

        let result = load_snapshot(&args, &Gatekeeper::default()).unwrap();
        assert_eq!(result.relationship.status, RelationshipStatus::Followers);
        assert_eq!(result.relationship.action, RelationshipAction::Follow);
    }

    #[test]
    fn test_snapshot_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"isFollowing": true, "isFollowedBy": true, "isMutualFollow": false}}"#
        )
        .unwrap();

        let args = SnapshotArgs {
            file: Some(file.path().to_string_lossy().into_owned()),
            ..Default::default()
        };

        let result = load_snapshot(&args, &Gatekeeper::default()).unwrap();
        assert_eq!(result.status, ValidationStatus::Normalized);
        assert_eq!(result.relationship.status, RelationshipStatus::MutualFollow);

        let strict = Gatekeeper::new(ValidationConfig::strict());
        let rejected = load_snapshot(&args, &strict).unwrap();
        assert!(matches!(
            rejected.into_relationship(),
            Err(GatekeeperError::Rejected(_))
        ));
    }

    #[test]
    fn test_unknown_friendship_flag_is_rejected_by_default() {
        let args = SnapshotArgs {
            friendship_status: Some("blocked".to_string()),
            ..Default::default()
        };

        let result = load_snapshot(&args, &Gatekeeper::default()).unwrap();
        assert_eq!(result.status, ValidationStatus::Rejected);
    }

    #[test]
    fn test_missing_file() {
        let args = SnapshotArgs {
            file: Some("/nonexistent/relationship.json".to_string()),
            ..Default::default()
        };
        assert!(load_snapshot(&args, &Gatekeeper::default()).is_err());
    }
}
