//! GoogleTest installer library.
//!
//! This crate provides the core functionality for fetching, building, and
//! installing GoogleTest (gtest and gmock) from source into a conventional
//! installation prefix. It is used by the `gtest-installer` CLI binary and
//! can be consumed programmatically for testing or custom install workflows.
//!
//! All meaningful work is delegated to external tools: git performs the
//! shallow checkout and CMake generates, builds, and installs the artefacts.
//! The crate's own logic is request validation, path construction, and
//! platform dispatch.
//!
//! # Modules
//!
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Semantic error types for validation and pipeline failures
//! - [`pipeline`] - The checkout/generate/build/install/clean pipeline
//! - [`platform`] - Platform dispatch for prefixes, generators, and cleanup
//! - [`request`] - Validated installation requests
//! - [`runner`] - Subprocess execution seam

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod platform;
pub mod request;
pub mod runner;
