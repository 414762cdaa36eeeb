//! Platform dispatch for the installer.
//!
//! The supported platforms differ in three ways: the default installation
//! prefix, the CMake generator used to drive the build, and how the cloned
//! working tree is removed afterwards. Each is resolved from a small closed
//! enumeration decided once at startup.

use crate::error::{InstallerError, Result};
use camino::Utf8PathBuf;

/// Environment variable naming the Windows user-profile directory.
pub const USER_PROFILE_VAR: &str = "USERPROFILE";

/// Supported host platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux hosts.
    Linux,
    /// macOS hosts.
    MacOs,
    /// Windows hosts.
    Windows,
}

impl Platform {
    /// Detects the platform the installer is running on.
    ///
    /// # Errors
    ///
    /// Returns `InstallerError::UnsupportedPlatform` on any operating system
    /// other than Linux, macOS, or Windows.
    pub fn current() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Resolves a platform from an operating system name as reported by
    /// `std::env::consts::OS`.
    ///
    /// # Errors
    ///
    /// Returns `InstallerError::UnsupportedPlatform` for unrecognised names.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::MacOs),
            "windows" => Ok(Self::Windows),
            other => Err(InstallerError::UnsupportedPlatform {
                os: other.to_owned(),
            }),
        }
    }

    /// Returns the default installation prefix for this platform.
    ///
    /// Linux and macOS install under `/usr/local`; Windows installs under
    /// the directory named by the `USERPROFILE` environment variable.
    ///
    /// # Errors
    ///
    /// Returns `InstallerError::MissingEnvironment` when `USERPROFILE` is
    /// unset on Windows.
    pub fn default_prefix(self) -> Result<Utf8PathBuf> {
        match self {
            Self::Linux | Self::MacOs => Ok(Utf8PathBuf::from("/usr/local")),
            Self::Windows => std::env::var(USER_PROFILE_VAR)
                .map(Utf8PathBuf::from)
                .map_err(|_| InstallerError::MissingEnvironment {
                    variable: USER_PROFILE_VAR,
                }),
        }
    }

    /// Returns the CMake generator name used on this platform.
    #[must_use]
    pub const fn generator(self) -> &'static str {
        match self {
            Self::Linux | Self::MacOs => "Unix Makefiles",
            Self::Windows => "NMake Makefiles",
        }
    }

    /// Returns the operating system name for diagnostics.
    #[must_use]
    pub const fn os_name(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.os_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::linux("linux", Platform::Linux)]
    #[case::macos("macos", Platform::MacOs)]
    #[case::windows("windows", Platform::Windows)]
    fn from_os_maps_known_names(#[case] os: &str, #[case] expected: Platform) {
        let platform = Platform::from_os(os).expect("platform should be supported");
        assert_eq!(platform, expected);
    }

    #[rstest]
    #[case::freebsd("freebsd")]
    #[case::wasm("wasi")]
    #[case::empty("")]
    fn from_os_rejects_unknown_names(#[case] os: &str) {
        let err = Platform::from_os(os).expect_err("platform should be unsupported");
        assert!(matches!(err, InstallerError::UnsupportedPlatform { .. }));
        assert!(err.to_string().contains("not supported"));
    }

    #[rstest]
    #[case::linux(Platform::Linux)]
    #[case::macos(Platform::MacOs)]
    fn default_prefix_is_usr_local_on_posix(#[case] platform: Platform) {
        let prefix = platform.default_prefix().expect("prefix should resolve");
        assert_eq!(prefix, Utf8PathBuf::from("/usr/local"));
    }

    #[test]
    fn default_prefix_on_windows_reads_user_profile() {
        temp_env::with_var(USER_PROFILE_VAR, Some("/home/someone"), || {
            let prefix = Platform::Windows
                .default_prefix()
                .expect("prefix should resolve");
            assert_eq!(prefix, Utf8PathBuf::from("/home/someone"));
        });
    }

    #[test]
    fn default_prefix_on_windows_fails_without_user_profile() {
        temp_env::with_var_unset(USER_PROFILE_VAR, || {
            let err = Platform::Windows
                .default_prefix()
                .expect_err("prefix resolution should fail");
            assert!(matches!(
                err,
                InstallerError::MissingEnvironment {
                    variable: USER_PROFILE_VAR
                }
            ));
        });
    }

    #[rstest]
    #[case::linux(Platform::Linux, "Unix Makefiles")]
    #[case::macos(Platform::MacOs, "Unix Makefiles")]
    #[case::windows(Platform::Windows, "NMake Makefiles")]
    fn generator_matches_platform(#[case] platform: Platform, #[case] expected: &str) {
        assert_eq!(platform.generator(), expected);
    }
}
