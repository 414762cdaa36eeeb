//! GoogleTest installer CLI entrypoint.
//!
//! This binary fetches, builds, and installs GoogleTest from source. It is
//! thin plumbing over the library: parse arguments, configure logging,
//! validate the request, run the pipeline, and map the outcome onto an exit
//! code.

use clap::Parser;
use clap::error::ErrorKind;
use std::io::Write;

use gtest_installer::cli::Cli;
use gtest_installer::error::{InstallerError, Result};
use gtest_installer::pipeline::Installer;
use gtest_installer::platform::Platform;
use gtest_installer::request::InstallRequest;

fn main() {
    let cli = parse_cli_or_exit();
    init_logging(&cli);

    log::info!("gtest-installer starts");
    log::debug!("platform is {}", std::env::consts::OS);

    let mut stderr = std::io::stderr();
    let run_result = run(&cli);
    log::info!("gtest-installer ends");

    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Parses arguments, exiting 0 for help/version display and 1 for a parse
/// failure.
fn parse_cli_or_exit() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap renders --help and --version through this same path.
            if err.print().is_err() {
                // Best-effort output; the exit code still reflects the outcome.
            }
            let code = if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
            {
                0
            } else {
                1
            };
            std::process::exit(code);
        }
    }
}

/// Installs the logging backend with the filter taken from `--loglevel`.
fn init_logging(cli: &Cli) {
    env_logger::Builder::new()
        .filter_level(cli.loglevel.filter())
        .format_timestamp_secs()
        .init();
}

/// Validates the request and runs the pipeline once.
fn run(cli: &Cli) -> Result<()> {
    let platform = Platform::current()?;
    let request = InstallRequest::new(
        platform,
        &cli.branch,
        &cli.build_type,
        cli.prefix.clone(),
        cli.loglevel.shows_subprocess_output(),
    )?;
    Installer::new(request, platform).install()
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_error_trace(stderr, &err);
            1
        }
    }
}

/// Writes the error and its cause chain to the error stream.
fn write_error_trace(stderr: &mut dyn Write, err: &InstallerError) {
    write_stderr_line(stderr, format!("error: {err}"));

    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        write_stderr_line(stderr, format!("caused by: {cause}"));
        source = cause.source();
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
