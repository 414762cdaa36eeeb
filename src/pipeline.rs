//! The fetch/build/install pipeline.
//!
//! This module orchestrates the four external-tool steps that do the real
//! work: a shallow git checkout, CMake build-system generation, the CMake
//! build, and the CMake install, followed by removal of the working tree.
//! Steps run strictly in order inside a scoped temporary directory; the
//! first failure aborts the run and the temporary directory is removed on
//! every exit path.

use crate::error::{InstallerError, Result};
use crate::platform::Platform;
use crate::request::InstallRequest;
use crate::runner::{CommandRunner, SystemCommandRunner};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use std::fmt;
use tempfile::TempDir;

/// Upstream repository the sources are cloned from.
pub const GOOGLETEST_REPO_URL: &str = "https://github.com/google/googletest";

/// Ref name treated as the upstream trunk. Cloning it passes no explicit
/// `--branch` flag.
pub const TRUNK_REF: &str = "main";

/// Directory name of the clone inside the temporary working directory.
const SOURCE_DIR_NAME: &str = "googletest";

/// Directory name of the CMake build tree inside the clone.
const BUILD_DIR_NAME: &str = "build";

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    /// Shallow clone of the upstream repository.
    Checkout,
    /// CMake build-system generation.
    Generate,
    /// CMake build of the generated tree.
    Build,
    /// CMake install into the prefix.
    Install,
    /// Removal of the cloned working tree.
    Clean,
}

impl PipelineStep {
    /// Human-readable step name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Checkout => "checkout",
            Self::Generate => "generate",
            Self::Build => "build",
            Self::Install => "install",
            Self::Clean => "clean",
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Orchestrates the external-tool pipeline for one installation.
pub struct Installer {
    request: InstallRequest,
    platform: Platform,
}

impl Installer {
    /// Creates an installer for a validated request.
    #[must_use]
    pub const fn new(request: InstallRequest, platform: Platform) -> Self {
        Self { request, platform }
    }

    /// Runs the pipeline once against the host system.
    ///
    /// Checkout, generation, build, and install each spawn an external
    /// process and take as long as those tools take; callers should invoke
    /// this sparingly.
    ///
    /// # Errors
    ///
    /// Returns `PipelineFailed` for the first step whose command exits
    /// unsuccessfully, or an I/O error from temporary-directory handling.
    pub fn install(&self) -> Result<()> {
        let runner = SystemCommandRunner::new(self.request.verbose_subprocess());
        self.install_with(&runner)
    }

    /// Runs the pipeline with the given command runner.
    ///
    /// # Errors
    ///
    /// As [`Installer::install`].
    pub fn install_with(&self, runner: &dyn CommandRunner) -> Result<()> {
        let workdir = TempDir::new()?;
        let workdir_root =
            Utf8PathBuf::from_path_buf(workdir.path().to_owned()).map_err(|path| {
                InstallerError::Io(std::io::Error::other(format!(
                    "temporary directory {} is not valid UTF-8",
                    path.display()
                )))
            })?;
        let source_dir = workdir_root.join(SOURCE_DIR_NAME);
        let build_dir = source_dir.join(BUILD_DIR_NAME);

        info!("starting installation");

        self.checkout(runner, &source_dir)?;
        self.generate(runner, &source_dir, &build_dir)?;
        self.build(runner, &build_dir)?;
        self.install_artefacts(runner, &build_dir)?;
        self.clean(runner, &source_dir)?;

        info!("installation done");
        Ok(())
    }

    fn checkout(&self, runner: &dyn CommandRunner, source_dir: &Utf8Path) -> Result<()> {
        info!("checking out GoogleTest");
        run_step(
            runner,
            PipelineStep::Checkout,
            "git",
            &clone_args(self.request.git_ref(), source_dir),
        )
    }

    fn generate(
        &self,
        runner: &dyn CommandRunner,
        source_dir: &Utf8Path,
        build_dir: &Utf8Path,
    ) -> Result<()> {
        info!("generating the build system with CMake");
        std::fs::create_dir_all(build_dir.as_std_path())?;
        run_step(
            runner,
            PipelineStep::Generate,
            "cmake",
            &generate_args(&self.request, self.platform.generator(), source_dir, build_dir),
        )
    }

    fn build(&self, runner: &dyn CommandRunner, build_dir: &Utf8Path) -> Result<()> {
        info!("building");
        run_step(runner, PipelineStep::Build, "cmake", &build_args(build_dir))
    }

    fn install_artefacts(&self, runner: &dyn CommandRunner, build_dir: &Utf8Path) -> Result<()> {
        info!("installing");
        run_step(
            runner,
            PipelineStep::Install,
            "cmake",
            &install_args(build_dir),
        )
    }

    fn clean(&self, runner: &dyn CommandRunner, source_dir: &Utf8Path) -> Result<()> {
        info!("cleaning the working tree");
        match self.platform {
            // Git metadata on Windows holds entries ordinary file APIs
            // cannot remove; delegate to a forced recursive delete.
            Platform::Windows => run_step(
                runner,
                PipelineStep::Clean,
                "cmd",
                &forced_delete_args(source_dir),
            ),
            Platform::Linux | Platform::MacOs => {
                std::fs::remove_dir_all(source_dir.as_std_path()).map_err(|source| {
                    InstallerError::PipelineFailed {
                        step: PipelineStep::Clean,
                        message: source.to_string(),
                    }
                })
            }
        }
    }
}

fn run_step(
    runner: &dyn CommandRunner,
    step: PipelineStep,
    program: &str,
    args: &[String],
) -> Result<()> {
    debug!("running command \"{} {}\"", program, args.join(" "));
    let status = runner.run(program, args)?;

    if status.success() {
        Ok(())
    } else {
        Err(InstallerError::PipelineFailed {
            step,
            message: status.to_string(),
        })
    }
}

fn clone_args(git_ref: &str, source_dir: &Utf8Path) -> Vec<String> {
    let mut args = vec!["clone".to_owned()];

    if git_ref != TRUNK_REF {
        args.push("--branch".to_owned());
        args.push(git_ref.to_owned());
    }

    args.extend([
        "--depth".to_owned(),
        "1".to_owned(),
        GOOGLETEST_REPO_URL.to_owned(),
        source_dir.as_str().to_owned(),
    ]);
    args
}

fn generate_args(
    request: &InstallRequest,
    generator: &str,
    source_dir: &Utf8Path,
    build_dir: &Utf8Path,
) -> Vec<String> {
    vec![
        format!("-DCMAKE_BUILD_TYPE={}", request.build_type()),
        "-G".to_owned(),
        generator.to_owned(),
        "--install-prefix".to_owned(),
        request.prefix().as_str().to_owned(),
        "-B".to_owned(),
        build_dir.as_str().to_owned(),
        "-S".to_owned(),
        source_dir.as_str().to_owned(),
    ]
}

fn build_args(build_dir: &Utf8Path) -> Vec<String> {
    vec!["--build".to_owned(), build_dir.as_str().to_owned()]
}

fn install_args(build_dir: &Utf8Path) -> Vec<String> {
    vec!["--install".to_owned(), build_dir.as_str().to_owned()]
}

fn forced_delete_args(source_dir: &Utf8Path) -> Vec<String> {
    vec![
        "/C".to_owned(),
        "del".to_owned(),
        "/F".to_owned(),
        "/S".to_owned(),
        "/Q".to_owned(),
        source_dir.as_str().to_owned(),
    ]
}
