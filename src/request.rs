//! Validated installation requests.
//!
//! An [`InstallRequest`] captures everything one `install()` run needs and
//! enforces the construction-time contract: non-empty ref and build type, an
//! existing installation prefix, and no prior installation (detected through
//! the marker header).

use crate::error::{InstallerError, Result};
use crate::platform::Platform;
use camino::{Utf8Path, Utf8PathBuf};
use log::{info, warn};
use std::fmt;

/// Build configurations CMake recognises out of the box.
pub const RECOGNISED_BUILD_TYPES: &[&str] = &["Debug", "Release", "RelWithDebInfo", "MinSizeRel"];

/// A CMake build configuration name such as `Release`.
///
/// Any non-empty name is accepted; names outside
/// [`RECOGNISED_BUILD_TYPES`] are passed through to CMake unchanged after a
/// warning, preserving the lenient policy of the tool this replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildType(String);

impl BuildType {
    /// Get the build type as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this is one of the predefined CMake configurations.
    #[must_use]
    pub fn is_recognised(&self) -> bool {
        RECOGNISED_BUILD_TYPES.contains(&self.0.as_str())
    }
}

impl From<&str> for BuildType {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for BuildType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for BuildType {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the path of the header whose presence marks a completed
/// installation under `prefix`.
#[must_use]
pub fn marker_path(prefix: &Utf8Path) -> Utf8PathBuf {
    prefix.join("include").join("gtest").join("gtest.h")
}

/// A validated installation request.
///
/// Construction performs every precondition check; a value of this type is
/// always safe to hand to the pipeline.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    git_ref: String,
    build_type: BuildType,
    prefix: Utf8PathBuf,
    verbose_subprocess: bool,
}

impl InstallRequest {
    /// Validates a request.
    ///
    /// When `prefix` is `None` the platform default is used (`/usr/local` on
    /// Linux and macOS, `%USERPROFILE%` on Windows). Default resolution runs
    /// before the argument checks, so a missing `USERPROFILE` surfaces ahead
    /// of an empty ref.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` when `git_ref` or `build_type` is empty.
    /// - `MissingEnvironment` when the Windows default prefix cannot be
    ///   resolved.
    /// - `PrefixNotFound` when the prefix is not an existing directory.
    /// - `AlreadyInstalled` when the marker header exists under the prefix.
    pub fn new(
        platform: Platform,
        git_ref: &str,
        build_type: &str,
        prefix: Option<Utf8PathBuf>,
        verbose_subprocess: bool,
    ) -> Result<Self> {
        let resolved_prefix = match prefix {
            Some(dir) => dir,
            None => platform.default_prefix()?,
        };

        if git_ref.is_empty() {
            return Err(InstallerError::InvalidArgument {
                field: "branch or tag name",
            });
        }

        if build_type.is_empty() {
            return Err(InstallerError::InvalidArgument {
                field: "build type",
            });
        }

        let build = BuildType::from(build_type);
        if !build.is_recognised() {
            warn!("build type \"{build}\" is not a predefined CMake configuration; typo?");
        }

        if !resolved_prefix.is_dir() {
            return Err(InstallerError::PrefixNotFound {
                path: resolved_prefix,
            });
        }

        if marker_path(&resolved_prefix).is_file() {
            return Err(InstallerError::AlreadyInstalled {
                path: resolved_prefix,
            });
        }

        info!("branch or tag name is \"{git_ref}\"");
        info!("build type is \"{build}\"");
        info!("installation prefix is \"{resolved_prefix}\"");

        Ok(Self {
            git_ref: git_ref.to_owned(),
            build_type: build,
            prefix: resolved_prefix,
            verbose_subprocess,
        })
    }

    /// The branch or tag name to check out.
    #[must_use]
    pub fn git_ref(&self) -> &str {
        &self.git_ref
    }

    /// The CMake build configuration.
    #[must_use]
    pub const fn build_type(&self) -> &BuildType {
        &self.build_type
    }

    /// The installation prefix.
    #[must_use]
    pub const fn prefix(&self) -> &Utf8PathBuf {
        &self.prefix
    }

    /// Whether spawned-process output is inherited by the caller.
    #[must_use]
    pub const fn verbose_subprocess(&self) -> bool {
        self.verbose_subprocess
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    /// A temporary directory converted to a UTF-8 path for prefix tests.
    struct TempPrefix {
        _temp: TempDir,
        path: Utf8PathBuf,
    }

    #[fixture]
    fn temp_prefix() -> TempPrefix {
        let temp = TempDir::new().expect("failed to create temp dir");
        let path = Utf8PathBuf::try_from(temp.path().to_owned()).expect("non-UTF8 temp path");
        TempPrefix { _temp: temp, path }
    }

    fn write_marker(prefix: &Utf8Path) {
        let header_dir = prefix.join("include").join("gtest");
        std::fs::create_dir_all(&header_dir).expect("failed to create header dir");
        std::fs::write(header_dir.join("gtest.h"), "").expect("failed to write marker");
    }

    #[rstest]
    fn new_accepts_a_valid_request(temp_prefix: TempPrefix) {
        let request = InstallRequest::new(
            Platform::Linux,
            "v1.13.0",
            "Release",
            Some(temp_prefix.path.clone()),
            false,
        )
        .expect("request should validate");

        assert_eq!(request.git_ref(), "v1.13.0");
        assert_eq!(request.build_type().as_str(), "Release");
        assert_eq!(request.prefix(), &temp_prefix.path);
        assert!(!request.verbose_subprocess());
    }

    #[rstest]
    fn new_rejects_an_empty_ref(temp_prefix: TempPrefix) {
        let err = InstallRequest::new(
            Platform::Linux,
            "",
            "Release",
            Some(temp_prefix.path.clone()),
            false,
        )
        .expect_err("empty ref should fail");

        assert!(matches!(
            err,
            InstallerError::InvalidArgument {
                field: "branch or tag name"
            }
        ));
    }

    #[rstest]
    fn new_rejects_an_empty_build_type(temp_prefix: TempPrefix) {
        let err = InstallRequest::new(
            Platform::Linux,
            "release-1.11.0",
            "",
            Some(temp_prefix.path.clone()),
            false,
        )
        .expect_err("empty build type should fail");

        assert!(matches!(
            err,
            InstallerError::InvalidArgument {
                field: "build type"
            }
        ));
    }

    #[rstest]
    fn new_accepts_an_unrecognised_build_type(temp_prefix: TempPrefix) {
        let request = InstallRequest::new(
            Platform::Linux,
            "main",
            "Profiling",
            Some(temp_prefix.path.clone()),
            false,
        )
        .expect("unrecognised but non-empty build type should be accepted");

        assert!(!request.build_type().is_recognised());
    }

    #[rstest]
    fn new_rejects_a_missing_prefix(temp_prefix: TempPrefix) {
        let missing = temp_prefix.path.join("does-not-exist");
        let err = InstallRequest::new(Platform::Linux, "main", "Release", Some(missing), false)
            .expect_err("missing prefix should fail");

        assert!(matches!(err, InstallerError::PrefixNotFound { .. }));
    }

    #[rstest]
    fn new_rejects_an_already_installed_prefix(temp_prefix: TempPrefix) {
        write_marker(&temp_prefix.path);

        let err = InstallRequest::new(
            Platform::Linux,
            "release-1.11.0",
            "Release",
            Some(temp_prefix.path.clone()),
            false,
        )
        .expect_err("marker header should fail validation");

        assert!(matches!(err, InstallerError::AlreadyInstalled { .. }));
    }

    #[rstest]
    fn new_resolves_the_platform_default_prefix(temp_prefix: TempPrefix) {
        temp_env::with_var(
            crate::platform::USER_PROFILE_VAR,
            Some(temp_prefix.path.as_str()),
            || {
                let request =
                    InstallRequest::new(Platform::Windows, "main", "Release", None, false)
                        .expect("request should validate");
                assert_eq!(request.prefix(), &temp_prefix.path);
            },
        );
    }

    #[rstest]
    #[case::debug("Debug", true)]
    #[case::release("Release", true)]
    #[case::rel_with_deb_info("RelWithDebInfo", true)]
    #[case::min_size_rel("MinSizeRel", true)]
    #[case::lowercase("release", false)]
    #[case::custom("Profiling", false)]
    fn build_type_recognition(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(BuildType::from(name).is_recognised(), expected);
    }

    #[test]
    fn marker_path_points_at_the_gtest_header() {
        let marker = marker_path(Utf8Path::new("/usr/local"));
        assert_eq!(marker, Utf8PathBuf::from("/usr/local/include/gtest/gtest.h"));
    }
}
