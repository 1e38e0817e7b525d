use monoship_core::ReleaseTag;
use semver::Version;

use crate::Result;

pub trait RegistryProvider: Send + Sync {
    /// Version currently published under `tag`, `None` if the package was
    /// never published with that tag or not published at all.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry cannot be queried or answers with
    /// something that is not a version.
    fn latest_tag_version(&self, package: &str, tag: ReleaseTag) -> Result<Option<Version>>;
}

impl<T: RegistryProvider + ?Sized> RegistryProvider for &T {
    fn latest_tag_version(&self, package: &str, tag: ReleaseTag) -> Result<Option<Version>> {
        (**self).latest_tag_version(package, tag)
    }
}
