use std::fmt;
use std::io::IsTerminal;

use monoship_operations::providers::ProcessEnvironment;
use monoship_operations::traits::EnvironmentProvider;
use tracing::debug;

const NO_TTY_VAR: &str = "MONOSHIP_NO_TTY";
const FORCE_TTY_VAR: &str = "MONOSHIP_FORCE_TTY";

const CI_ENV_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
    "BUILDKITE",
    "TF_BUILD",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NonInteractiveReason {
    ExplicitDisable,
    CiDetected { env_var: String },
    NoTerminal,
}

impl fmt::Display for NonInteractiveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitDisable => write!(f, "{NO_TTY_VAR} is set"),
            Self::CiDetected { env_var } => write!(f, "CI environment detected ({env_var})"),
            Self::NoTerminal => f.write_str("stdin is not a terminal"),
        }
    }
}

/// Why this process cannot prompt, or `None` when it can.
pub(crate) fn current_non_interactive_reason() -> Option<NonInteractiveReason> {
    let reason = non_interactive_reason(&ProcessEnvironment, std::io::stdin().is_terminal());
    if let Some(reason) = &reason {
        debug!(%reason, "running non-interactively");
    }
    reason
}

pub(crate) fn non_interactive_reason(
    env: &impl EnvironmentProvider,
    stdin_is_terminal: bool,
) -> Option<NonInteractiveReason> {
    if env.var(NO_TTY_VAR).is_some() {
        return Some(NonInteractiveReason::ExplicitDisable);
    }

    if env.var(FORCE_TTY_VAR).is_some() {
        return None;
    }

    if let Some(env_var) = detect_ci_env_var(env) {
        return Some(NonInteractiveReason::CiDetected { env_var });
    }

    if !stdin_is_terminal {
        return Some(NonInteractiveReason::NoTerminal);
    }

    None
}

fn detect_ci_env_var(env: &impl EnvironmentProvider) -> Option<String> {
    CI_ENV_VARS
        .iter()
        .find(|var| env.var(var).is_some())
        .map(|var| (*var).to_string())
}
