//! Actions command implementation.

use crate::error::Result;
use crate::output::Formatter;

/// Execute the actions command.
pub async fn execute_actions(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_action_table()?);
    Ok(())
}
