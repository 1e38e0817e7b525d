mod json;
mod plain;
mod plan;

use clap::ValueEnum;

pub(crate) use plain::{
    format_bootstrap, format_publish_outcome, format_publish_summary, format_test_output,
};
pub(crate) use plan::PlanFormatter;

use plan::{JsonPlanFormatter, PlainTextPlanFormatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Plain,
    Json,
}

impl OutputFormat {
    pub(crate) fn plan_formatter(self) -> Box<dyn PlanFormatter> {
        match self {
            Self::Plain => Box::new(PlainTextPlanFormatter),
            Self::Json => Box::new(JsonPlanFormatter),
        }
    }
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
