use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("no alpha version found among {checked} candidate versions")]
    NoAlphaVersion { checked: usize },

    #[error("release version override '{value}' is not valid semver")]
    InvalidOverride {
        value: String,
        #[source]
        source: semver::Error,
    },
}
