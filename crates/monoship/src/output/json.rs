use std::path::{Path, PathBuf};

use monoship_graph::PackageGraph;
use monoship_operations::operations::{PlanOutput, RepoChanges};
use serde::Serialize;

#[derive(Serialize)]
pub(super) struct PlanReport<'a> {
    root: &'a Path,
    repos: Vec<RepoReport<'a>>,
    changed_files: &'a [PathBuf],
    directly_changed: &'a [String],
    affected: Vec<&'a str>,
    batches: &'a [Vec<String>],
    skipped_batches: &'a [Vec<String>],
    graph: &'a PackageGraph,
}

#[derive(Serialize)]
struct RepoReport<'a> {
    name: &'a str,
    dir: &'a Path,
    sha: &'a str,
    summary: &'a str,
    author_time: String,
    merge: bool,
    files: usize,
}

impl<'a> From<&'a RepoChanges> for RepoReport<'a> {
    fn from(repo: &'a RepoChanges) -> Self {
        Self {
            name: &repo.name,
            dir: &repo.dir,
            sha: &repo.commit.sha,
            summary: &repo.commit.summary,
            author_time: repo.commit.author_time.to_rfc3339(),
            merge: repo.commit.is_merge(),
            files: repo.files.len(),
        }
    }
}

impl<'a> From<&'a PlanOutput> for PlanReport<'a> {
    fn from(plan: &'a PlanOutput) -> Self {
        Self {
            root: &plan.workspace.root,
            repos: plan.changes.repos.iter().map(RepoReport::from).collect(),
            changed_files: &plan.changes.files,
            directly_changed: &plan.directly_changed,
            affected: plan.affected.iter().map(String::as_str).collect(),
            batches: &plan.order.batches,
            skipped_batches: &plan.order.skipped,
            graph: &plan.graph,
        }
    }
}
