use std::time::Duration;

use monoship_core::ReleaseTag;
use monoship_project::DelayConfig;
use tracing::{info, warn};

use crate::Result;
use crate::traits::{ConfirmationGate, Sleeper};
use crate::types::PublishSummary;

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Announces the plan and waits a short while before proceeding, leaving a
/// window to abort with Ctrl-C.
pub struct DelayGate<S> {
    delays: DelayConfig,
    sleeper: S,
}

impl<S> DelayGate<S>
where
    S: Sleeper,
{
    pub fn new(delays: DelayConfig, sleeper: S) -> Self {
        Self { delays, sleeper }
    }

    fn delay_for(&self, tag: ReleaseTag) -> Duration {
        let secs = match tag {
            ReleaseTag::Latest => self.delays.latest_secs(),
            ReleaseTag::Alpha => self.delays.alpha_secs(),
        };
        Duration::from_secs(secs)
    }
}

impl<S> ConfirmationGate for DelayGate<S>
where
    S: Sleeper,
{
    fn confirm(&self, summary: &PublishSummary) -> Result<bool> {
        let tag = summary.release_tag();
        let delay = self.delay_for(tag);

        for package in summary.packages() {
            info!(
                package = %package.name,
                version = %package.new_version,
                tag = %package.tag,
                "will publish"
            );
        }
        warn!(
            packages = summary.len(),
            %tag,
            delay_secs = delay.as_secs(),
            "publishing after delay, interrupt to abort"
        );

        self.sleeper.sleep(delay);
        Ok(true)
    }
}
