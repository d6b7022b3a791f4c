//! Process exit statuses, following the BSD `sysexits.h` values.

use std::process;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    /// The command was used incorrectly: bad flags or arguments.
    Usage = 64,
    /// The input script was malformed; at least one scan diagnostic.
    DataError = 65,
    /// An input file did not exist or was not readable.
    NoInput = 66,
    /// Reading stdin or writing output failed.
    IoError = 74,
}

impl ExitCode {
    /// Combine the outcome of two runs. The numerically larger status wins,
    /// which ranks I/O failures above bad input above success.
    pub fn combine(self, other: ExitCode) -> ExitCode {
        self.max(other)
    }
}

impl From<ExitCode> for process::ExitCode {
    fn from(code: ExitCode) -> Self {
        process::ExitCode::from(code as u8)
    }
}
