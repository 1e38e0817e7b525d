mod error;

use monoship_core::ReleaseTag;
use semver::{BuildMetadata, Prerelease, Version};

pub use error::VersionError;

pub type Result<T> = std::result::Result<T, VersionError>;

const ALPHA: &str = "alpha";

/// The `N` of an `X.Y.Z-alpha.N` version.
#[must_use]
pub fn alpha_increment(version: &Version) -> Option<u64> {
    let (label, number) = version.pre.as_str().split_once('.')?;
    if label != ALPHA {
        return None;
    }
    number.parse().ok()
}

/// The version after the highest alpha among `candidates`.
///
/// Candidates are local core package versions plus the registry's current
/// `alpha` versions. The highest increment wins, ties broken by base version.
///
/// # Errors
///
/// Returns [`VersionError::NoAlphaVersion`] if no candidate is an alpha.
pub fn next_alpha_version(candidates: &[Version]) -> Result<Version> {
    let highest = candidates
        .iter()
        .filter_map(|v| alpha_increment(v).map(|n| (n, v)))
        .max_by(|(a_n, a_v), (b_n, b_v)| a_n.cmp(b_n).then_with(|| a_v.cmp(b_v)));

    let Some((increment, version)) = highest else {
        return Err(VersionError::NoAlphaVersion {
            checked: candidates.len(),
        });
    };

    let mut next = Version::new(version.major, version.minor, version.patch);
    next.pre = alpha_prerelease(increment + 1);
    Ok(next)
}

fn alpha_prerelease(increment: u64) -> Prerelease {
    // "alpha.<digits>" is always a valid pre-release identifier.
    Prerelease::new(&format!("{ALPHA}.{increment}")).unwrap_or(Prerelease::EMPTY)
}

/// Release version for core packages: `override_value` when set and non-empty,
/// otherwise [`next_alpha_version`].
///
/// # Errors
///
/// Returns [`VersionError::InvalidOverride`] for an override that is not
/// semver, or the error of [`next_alpha_version`].
pub fn resolve_release_version(
    override_value: Option<&str>,
    candidates: &[Version],
) -> Result<Version> {
    match override_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => {
            let value = value.strip_prefix('v').unwrap_or(value);
            Version::parse(value).map_err(|source| VersionError::InvalidOverride {
                value: value.to_string(),
                source,
            })
        }
        None => next_alpha_version(candidates),
    }
}

/// Patch bump with npm semantics: a pre-release is promoted to its own
/// release, anything else gets `patch + 1`. Build metadata is dropped.
#[must_use]
pub fn bump_patch(version: &Version) -> Version {
    let mut new_version = version.clone();

    if new_version.pre.is_empty() {
        new_version.patch += 1;
    } else {
        new_version.pre = Prerelease::EMPTY;
    }
    new_version.build = BuildMetadata::EMPTY;

    new_version
}

/// `alpha` for core packages released under an alpha version, else `latest`.
#[must_use]
pub fn select_tag(release_version: &Version, is_core: bool) -> ReleaseTag {
    if is_core && release_version.to_string().contains(ALPHA) {
        ReleaseTag::Alpha
    } else {
        ReleaseTag::Latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).expect("valid version")
    }

    #[test]
    fn alpha_increment_is_parsed() {
        assert_eq!(alpha_increment(&v("2.0.0-alpha.17")), Some(17));
        assert_eq!(alpha_increment(&v("2.0.0-beta.3")), None);
        assert_eq!(alpha_increment(&v("2.0.0-alpha")), None);
        assert_eq!(alpha_increment(&v("2.0.0")), None);
    }

    #[test]
    fn next_alpha_takes_highest_increment_across_sources() {
        let local = [v("2.0.0-alpha.4"), v("2.0.0-alpha.6")];
        let remote = [v("2.0.0-alpha.9")];
        let candidates: Vec<Version> = local.into_iter().chain(remote).collect();

        let next = next_alpha_version(&candidates).expect("has alphas");

        assert_eq!(next, v("2.0.0-alpha.10"));
    }

    #[test]
    fn next_alpha_ignores_non_alpha_candidates() {
        let candidates = [v("3.1.0"), v("2.0.0-alpha.2"), v("4.0.0-beta.99")];

        let next = next_alpha_version(&candidates).expect("has alphas");

        assert_eq!(next, v("2.0.0-alpha.3"));
    }

    #[test]
    fn next_alpha_breaks_ties_by_base_version() {
        let candidates = [v("2.0.0-alpha.3"), v("2.1.0-alpha.3")];

        let next = next_alpha_version(&candidates).expect("has alphas");

        assert_eq!(next, v("2.1.0-alpha.4"));
    }

    #[test]
    fn next_alpha_without_alphas_fails() {
        let result = next_alpha_version(&[v("1.0.0")]);

        assert!(matches!(
            result,
            Err(VersionError::NoAlphaVersion { checked: 1 })
        ));
    }

    #[test]
    fn override_takes_precedence() {
        let version = resolve_release_version(Some("v3.0.0"), &[v("2.0.0-alpha.1")])
            .expect("override is valid");

        assert_eq!(version, v("3.0.0"));
    }

    #[test]
    fn blank_override_falls_back_to_computed() {
        let version =
            resolve_release_version(Some("  "), &[v("2.0.0-alpha.1")]).expect("computed");

        assert_eq!(version, v("2.0.0-alpha.2"));
    }

    #[test]
    fn invalid_override_is_reported() {
        let result = resolve_release_version(Some("next"), &[]);

        assert!(
            matches!(result, Err(VersionError::InvalidOverride { value, .. }) if value == "next")
        );
    }

    #[test]
    fn bump_patch_increments_release() {
        assert_eq!(bump_patch(&v("1.2.3")), v("1.2.4"));
        assert_eq!(bump_patch(&v("1.2.3+build.5")), v("1.2.4"));
    }

    #[test]
    fn bump_patch_promotes_prerelease() {
        assert_eq!(bump_patch(&v("1.2.3-rc.1")), v("1.2.3"));
    }

    #[test]
    fn tag_is_alpha_only_for_core_alpha_releases() {
        let alpha = v("2.0.0-alpha.3");
        let stable = v("2.0.0");

        assert_eq!(select_tag(&alpha, true), ReleaseTag::Alpha);
        assert_eq!(select_tag(&alpha, false), ReleaseTag::Latest);
        assert_eq!(select_tag(&stable, true), ReleaseTag::Latest);
    }
}
