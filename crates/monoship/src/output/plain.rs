use monoship_operations::PublishSummary;
use monoship_operations::operations::{BootstrapOutput, PublishOutcome, TestOutput};

pub(crate) fn format_batches(batches: &[Vec<String>]) -> String {
    let mut output = String::new();
    for (i, batch) in batches.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, batch.join(", ")));
    }
    output
}

pub(crate) fn format_publish_summary(summary: &PublishSummary) -> String {
    let mut output = String::new();

    if let Some(version) = &summary.release_version {
        output.push_str(&format!("Release version: {version}\n"));
    }
    output.push_str(&format!("Release tag: {}\n", summary.release_tag()));

    for (i, batch) in summary.batches.iter().enumerate() {
        output.push_str(&format!("Batch {}:\n", i + 1));
        for package in batch {
            output.push_str(&format!(
                "  {} {} -> {} ({})\n",
                package.name, package.current_version, package.new_version, package.tag
            ));
        }
    }

    if !summary.skipped_private.is_empty() {
        output.push_str("Private, not published:\n");
        for name in &summary.skipped_private {
            output.push_str(&format!("  {name}\n"));
        }
    }

    output
}

pub(crate) fn format_publish_outcome(outcome: &PublishOutcome) -> String {
    match outcome {
        PublishOutcome::DryRun(summary) => {
            format!(
                "Dry run - nothing will be published.\n\n{}",
                format_publish_summary(summary)
            )
        }
        PublishOutcome::Published(summary) if summary.is_empty() => {
            "Nothing to publish.\n".to_string()
        }
        PublishOutcome::Published(summary) => format!(
            "{}\nPublished {} package(s).\n",
            format_publish_summary(summary),
            summary.len()
        ),
    }
}

pub(crate) fn format_test_output(output: &TestOutput) -> String {
    let mut text = String::new();

    if output.tested.is_empty() && output.skipped.is_empty() {
        return "Nothing to test.\n".to_string();
    }

    text.push_str(&format!("Tested {} package(s):\n", output.tested.len()));
    for name in &output.tested {
        text.push_str(&format!("  {name}\n"));
    }

    if !output.skipped.is_empty() {
        text.push_str("\nNo test script:\n");
        for name in &output.skipped {
            text.push_str(&format!("  {name}\n"));
        }
    }

    text
}

pub(crate) fn format_bootstrap(output: &BootstrapOutput) -> String {
    let mut text = format!("Workspace: {}\n", output.root.display());

    if output.cloned.is_empty() && output.already_present.is_empty() {
        text.push_str("No repositories configured.\n");
    }

    for (title, names) in [
        ("Cloned", &output.cloned),
        ("Already present", &output.already_present),
        ("Installed", &output.installed),
        ("Built", &output.built),
    ] {
        if !names.is_empty() {
            text.push_str(&format!("{title}: {}\n", names.join(", ")));
        }
    }

    text
}
