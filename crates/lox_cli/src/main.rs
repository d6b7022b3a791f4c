//! lox: scan Lox scripts and print their tokens.
//!
//! Usage:
//!   lox [options] [script...]
//!
//! With no script an interactive prompt scans one line at a time.

mod error;
mod exit_code;
mod report;

use clap::Parser as ClapParser;
use error::CliError;
use exit_code::ExitCode;
use lox_scanner::ScanResult;
use rayon::prelude::*;
use report::{DiagnosticStyle, OutputFormat};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

#[derive(ClapParser, Debug)]
#[command(name = "lox", about = "Scan Lox scripts and print their tokens", version)]
struct Cli {
    /// Lox scripts to scan. Starts an interactive prompt when omitted.
    #[arg(value_name = "SCRIPT")]
    scripts: Vec<PathBuf>,

    /// Token output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Render diagnostics with source snippets.
    #[arg(long)]
    pretty: bool,

    /// Log scanner activity to stderr (same as `RUST_LOG=debug`).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn diagnostic_style(&self) -> DiagnosticStyle {
        if self.pretty {
            DiagnosticStyle::Pretty
        } else {
            DiagnosticStyle::Plain
        }
    }
}

fn main() -> process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version also arrive here, on stdout.
            let code = if e.use_stderr() { ExitCode::Usage } else { ExitCode::Success };
            return code.into();
        }
    };

    init_tracing(cli.verbose);

    let code = if cli.scripts.is_empty() {
        run_prompt(&cli)
    } else {
        run_files(&cli)
    };
    code.into()
}

/// Install the tracing subscriber. Only active when `RUST_LOG` is set or
/// `--verbose` is given, and always writes to stderr.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        return;
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true).with_level(true))
        .with(filter)
        .init();
}

/// A script that was read and scanned.
struct ScannedFile {
    name: String,
    source: String,
    result: ScanResult,
}

fn read_and_scan(path: &Path) -> Result<ScannedFile, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let source = simdutf8::basic::from_utf8(&bytes)
        .map_err(|_| CliError::InvalidUtf8 { path: path.to_path_buf() })?
        .to_owned();

    tracing::info!(path = %path.display(), bytes = source.len(), "scanning script");
    let result = lox_scanner::scan(&source);
    Ok(ScannedFile {
        name: path.display().to_string(),
        source,
        result,
    })
}

fn run_files(cli: &Cli) -> ExitCode {
    let stdout = io::stdout();
    let stderr = io::stderr();
    scan_files(&mut stdout.lock(), &mut stderr.lock(), cli)
}

/// Scan every script in parallel, then report them in argument order. The
/// result is the largest per-file status.
fn scan_files<W: Write, E: Write>(out: &mut W, err: &mut E, cli: &Cli) -> ExitCode {
    let outcomes: Vec<Result<ScannedFile, CliError>> =
        cli.scripts.par_iter().map(|path| read_and_scan(path)).collect();

    outcomes.into_iter().fold(ExitCode::Success, |code, outcome| {
        let file_code = match outcome {
            Ok(file) => match report_file(out, err, cli, &file) {
                Ok(()) if file.result.has_errors() => ExitCode::DataError,
                Ok(()) => ExitCode::Success,
                Err(e) => report_error(err, CliError::Output(e)),
            },
            Err(e) => report_error(err, e),
        };
        code.combine(file_code)
    })
}

fn report_file<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    cli: &Cli,
    file: &ScannedFile,
) -> io::Result<()> {
    report::write_tokens(out, cli.format, &file.name, &file.source, &file.result)?;
    out.flush()?;
    let style = cli.diagnostic_style();
    report::write_diagnostics(err, style, &file.name, &file.source, &file.result)
}

fn report_error<E: Write>(err: &mut E, error: CliError) -> ExitCode {
    let code = error.exit_code();
    tracing::debug!(?code, "driver error");
    // A failing stderr leaves only the exit status.
    let _ = writeln!(err, "{:?}", miette::Report::new(error));
    code
}

/// Read-scan-print loop. Each line is scanned on its own, without its line
/// terminator; diagnostics are printed but never end the session.
fn run_prompt(cli: &Cli) -> ExitCode {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut err = io::stderr();
    match prompt_loop(&mut input, &mut io::stdout(), &mut err, cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => report_error(&mut err, e),
    }
}

fn prompt_loop<R, W, E>(input: &mut R, out: &mut W, err: &mut E, cli: &Cli) -> Result<(), CliError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut line = String::new();
    loop {
        write!(out, "> ").and_then(|()| out.flush()).map_err(CliError::Output)?;

        line.clear();
        if input.read_line(&mut line).map_err(CliError::Stdin)? == 0 {
            writeln!(out).map_err(CliError::Output)?;
            return Ok(());
        }
        // The line ends with the newline that submitted it.
        let content_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(content_len);

        let file = ScannedFile {
            name: "<stdin>".to_string(),
            result: lox_scanner::scan(&line),
            source: std::mem::take(&mut line),
        };
        report_file(out, err, cli, &file).map_err(CliError::Output)?;
        line = file.source;
    }
}
