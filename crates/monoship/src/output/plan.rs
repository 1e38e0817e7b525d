use monoship_operations::operations::PlanOutput;

use super::json::PlanReport;
use super::plain::format_batches;
use super::short_sha;
use crate::error::Result;

pub(crate) trait PlanFormatter {
    fn format_plan(&self, plan: &PlanOutput) -> Result<String>;
}

pub(crate) struct PlainTextPlanFormatter;

impl PlainTextPlanFormatter {
    fn format_commits(output: &mut String, plan: &PlanOutput) {
        output.push_str("Latest commits:\n");
        for repo in &plan.changes.repos {
            let merge = if repo.commit.is_merge() { " [merge]" } else { "" };
            output.push_str(&format!(
                "  {} {} {} ({} files){}\n",
                repo.name,
                short_sha(&repo.commit.sha),
                repo.commit.summary,
                repo.files.len(),
                merge
            ));
        }
    }

    fn format_packages(output: &mut String, title: &str, names: &[&String]) {
        output.push('\n');
        output.push_str(&format!("{title}: {}\n", names.len()));
        for name in names {
            output.push_str(&format!("  {name}\n"));
        }
    }
}

impl PlanFormatter for PlainTextPlanFormatter {
    fn format_plan(&self, plan: &PlanOutput) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!(
            "Workspace: {} ({} packages)\n\n",
            plan.workspace.root.display(),
            plan.graph.len()
        ));
        Self::format_commits(&mut output, plan);

        let direct: Vec<_> = plan.directly_changed.iter().collect();
        Self::format_packages(&mut output, "Changed packages", &direct);
        let affected: Vec<_> = plan.affected.iter().collect();
        Self::format_packages(&mut output, "Affected packages", &affected);

        output.push('\n');
        if plan.order.is_empty() {
            output.push_str("Nothing to release.\n");
        } else {
            output.push_str("Batches:\n");
            output.push_str(&format_batches(&plan.order.batches));
        }

        if !plan.order.skipped.is_empty() {
            output.push_str("\nSkipped batches:\n");
            output.push_str(&format_batches(&plan.order.skipped));
        }

        Ok(output)
    }
}

pub(crate) struct JsonPlanFormatter;

impl PlanFormatter for JsonPlanFormatter {
    fn format_plan(&self, plan: &PlanOutput) -> Result<String> {
        let mut output = serde_json::to_string_pretty(&PlanReport::from(plan))?;
        output.push('\n');
        Ok(output)
    }
}
