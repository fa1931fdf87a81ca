//! Release packaging library for the Meters Below the Ground games.
//!
//! This crate drives the release pipeline for the project's applications:
//! building the selected frontends in release mode, assembling versioned
//! artefact directories, archiving them for upload under version-tagged and
//! branch-tagged names, wrapping the macOS build in an application bundle
//! and disk image, and staging web builds. It is used by the
//! `meters-release` CLI binary and can be consumed programmatically for
//! testing or custom release workflows.
//!
//! # Modules
//!
//! - [`artefact`] - Naming, assembly, and archiving of release artefacts
//! - [`branch`] - Branch tag resolution from CI and git
//! - [`builder`] - Cargo build orchestration for the native frontends
//! - [`bundle`] - macOS application bundle and disk image construction
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Resolved run configuration and path normalisation
//! - [`error`] - Semantic error types with exit-code mapping
//! - [`exec`] - Captured-output command execution
//! - [`frontend`] - Closed enumeration of build frontends
//! - [`git`] - Repository metadata queries
//! - [`manifest`] - Crate manifest version extraction
//! - [`output`] - Dry-run plan and summary formatting
//! - [`profile`] - Application profiles and per-frontend name tables
//! - [`version`] - Validated release version numbers
//! - [`web`] - Web build and static-asset staging

pub mod artefact;
pub mod branch;
pub mod builder;
pub mod bundle;
pub mod cli;
pub mod config;
pub mod error;
pub mod exec;
pub mod frontend;
pub mod git;
pub mod manifest;
pub mod output;
pub mod profile;
pub mod version;
pub mod web;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
