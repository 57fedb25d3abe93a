use std::process::ExitCode;

use super::commands::CommandResult;

/// Exit status for CLI commands, following common conventions for linter tools.
///
/// - `Success` (0): Command completed successfully
/// - `Failure` (1): Command completed but found errors (e.g. missing keys in strict mode)
/// - `Error` (2): Command failed due to internal error (locale parse error, config error, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed successfully.
    Success,
    /// Command completed but found errors.
    Failure,
    /// Command failed due to internal error.
    Error,
}

impl ExitStatus {
    pub fn from_result(result: &CommandResult) -> Self {
        if result.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::{CommandSummary, InitSummary};

    #[test]
    fn exit_code_values() {
        assert_eq!(ExitCode::from(ExitStatus::Success), ExitCode::from(0));
        assert_eq!(ExitCode::from(ExitStatus::Failure), ExitCode::from(1));
        assert_eq!(ExitCode::from(ExitStatus::Error), ExitCode::from(2));
    }

    #[test]
    fn status_from_result() {
        let failed = CommandResult::new(CommandSummary::Init(InitSummary {
            path: ".i18nrc.json".into(),
            error: Some("exists".to_string()),
        }));
        assert_eq!(ExitStatus::from_result(&failed), ExitStatus::Failure);

        let created = CommandResult::new(CommandSummary::Init(InitSummary {
            path: ".i18nrc.json".into(),
            error: None,
        }));
        assert_eq!(ExitStatus::from_result(&created), ExitStatus::Success);
    }
}
