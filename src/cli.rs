//! CLI argument definitions for the GoogleTest installer.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::fmt;

/// Install GoogleTest from source.
#[derive(Parser, Debug)]
#[command(name = "gtest-installer")]
#[command(version, about)]
#[command(long_about = concat!(
    "Install GoogleTest from source.\n\n",
    "The installer shallow-clones the upstream GoogleTest repository at the ",
    "requested branch or tag, generates a build system with CMake, builds, ",
    "and installs the headers and static libraries under the installation ",
    "prefix. The clone and build happen in a temporary directory that is ",
    "removed afterwards.\n\n",
    "By default the prefix is /usr/local on Linux and macOS and the ",
    "directory named by USERPROFILE on Windows. An installation is detected ",
    "through the include/gtest/gtest.h header; installing twice into the ",
    "same prefix is rejected.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Install the latest trunk in Release configuration:\n",
    "    $ gtest-installer\n\n",
    "  Install a tagged release:\n",
    "    $ gtest-installer --branch v1.13.0\n\n",
    "  Install a debug build into a custom prefix:\n",
    "    $ gtest-installer --branch v1.13.0 --build-type Debug --prefix ~/sdk\n\n",
    "  Show the external commands as they run:\n",
    "    $ gtest-installer --loglevel DEBUG\n\n",
    "Requires git, cmake, and a C++ toolchain on PATH.",
))]
pub struct Cli {
    /// Branch or tag name to install.
    #[arg(long, value_name = "NAME", default_value = "main")]
    pub branch: String,

    /// CMake build type, one of {Debug, Release, RelWithDebInfo, MinSizeRel}.
    #[arg(
        long = "build-type",
        alias = "build_type",
        value_name = "TYPE",
        default_value = "Release"
    )]
    pub build_type: String,

    /// Installation prefix [default: platform-specific].
    #[arg(long, value_name = "DIR")]
    pub prefix: Option<Utf8PathBuf>,

    /// Logging verbosity.
    #[arg(
        long,
        value_name = "LEVEL",
        value_enum,
        ignore_case = true,
        default_value_t = LogLevel::Warning
    )]
    pub loglevel: LogLevel,
}

/// Logging levels accepted by `--loglevel`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Disable logging entirely.
    Off,
    /// Only unrecoverable failures.
    Critical,
    /// Errors.
    Error,
    /// Warnings and errors.
    Warning,
    /// Progress information.
    Info,
    /// Command-level detail; also shows subprocess output.
    Debug,
}

impl LogLevel {
    /// Maps the CLI level onto a `log` filter.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::Off,
            Self::Critical | Self::Error => LevelFilter::Error,
            Self::Warning => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
        }
    }

    /// True when spawned-process output should reach the terminal.
    #[must_use]
    pub const fn shows_subprocess_output(self) -> bool {
        matches!(self, Self::Debug)
    }

    /// The lower-case level name as accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Critical => "critical",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Cli {
    /// Creates a `Cli` with the same values the flag defaults produce.
    ///
    /// Useful for testing or programmatic construction where only specific
    /// fields need to be set.
    fn default() -> Self {
        Self {
            branch: "main".to_owned(),
            build_type: "Release".to_owned(),
            prefix: None,
            loglevel: LogLevel::Warning,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
