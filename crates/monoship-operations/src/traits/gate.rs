use std::time::Duration;

use crate::Result;
use crate::types::PublishSummary;

/// Last stop before anything is published.
pub trait ConfirmationGate {
    /// # Errors
    ///
    /// Returns an error if the confirmation cannot be obtained.
    fn confirm(&self, summary: &PublishSummary) -> Result<bool>;
}

pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

impl<T: ConfirmationGate + ?Sized> ConfirmationGate for &T {
    fn confirm(&self, summary: &PublishSummary) -> Result<bool> {
        (**self).confirm(summary)
    }
}

impl<T: ConfirmationGate + ?Sized> ConfirmationGate for Box<T> {
    fn confirm(&self, summary: &PublishSummary) -> Result<bool> {
        (**self).confirm(summary)
    }
}

impl<T: Sleeper + ?Sized> Sleeper for &T {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}
