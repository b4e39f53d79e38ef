use std::process::ExitCode;

/// Process exit status of a `qi18n` command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Translation printed, or config created.
    Success,
    /// The command refused to act, e.g. `init` over an existing config file.
    Failure,
    /// Bad config, unreadable translation files, or a formatting error.
    Error,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
