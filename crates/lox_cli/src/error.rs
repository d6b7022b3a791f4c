//! Errors raised by the command-line driver itself, as opposed to the
//! lexical diagnostics reported for a script.

use crate::exit_code::ExitCode;
use miette::Diagnostic;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("could not read '{}'", path.display())]
    #[diagnostic(code(lox::read), help("check that the script exists and is readable"))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{}' is not valid UTF-8", path.display())]
    #[diagnostic(code(lox::encoding), help("Lox scripts must be UTF-8 encoded"))]
    InvalidUtf8 { path: PathBuf },

    #[error("could not read from standard input")]
    #[diagnostic(code(lox::stdin))]
    Stdin(#[source] io::Error),

    #[error("could not write output")]
    #[diagnostic(code(lox::output))]
    Output(#[source] io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Read { .. } => ExitCode::NoInput,
            CliError::InvalidUtf8 { .. } => ExitCode::DataError,
            CliError::Stdin(_) | CliError::Output(_) => ExitCode::IoError,
        }
    }
}
