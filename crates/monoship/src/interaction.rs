use dialoguer::Confirm;
use monoship_operations::traits::ConfirmationGate;
use monoship_operations::{OperationError, PublishSummary, Result};

use crate::output;

/// Asks on the terminal before anything is published.
pub(crate) struct TerminalGate;

impl ConfirmationGate for TerminalGate {
    fn confirm(&self, summary: &PublishSummary) -> Result<bool> {
        eprint!("{}", output::format_publish_summary(summary));

        let prompt = format!(
            "Publish {} package(s) under '{}'?",
            summary.len(),
            summary.release_tag()
        );

        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| match e {
                dialoguer::Error::IO(source) => OperationError::Prompt(source),
            })
    }
}
