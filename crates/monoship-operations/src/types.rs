use std::path::PathBuf;

use monoship_core::ReleaseTag;
use semver::Version;
use serde::Serialize;

/// One package as it is about to be published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPublish {
    pub name: String,
    pub dir: PathBuf,
    pub current_version: Version,
    pub new_version: Version,
    pub tag: ReleaseTag,
    pub core: bool,
}

/// Everything a publish run will do, batch by batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublishSummary {
    /// Version shared by the core packages, when any of them is affected.
    pub release_version: Option<Version>,
    pub batches: Vec<Vec<PlannedPublish>>,
    /// Affected packages marked `"private": true`.
    pub skipped_private: Vec<String>,
}

impl PublishSummary {
    /// `alpha` as soon as one package goes out under the alpha tag.
    #[must_use]
    pub fn release_tag(&self) -> ReleaseTag {
        if self.packages().any(|p| p.tag == ReleaseTag::Alpha) {
            ReleaseTag::Alpha
        } else {
            ReleaseTag::Latest
        }
    }

    pub fn packages(&self) -> impl Iterator<Item = &PlannedPublish> {
        self.batches.iter().flatten()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.batches.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
