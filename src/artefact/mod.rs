//! Artefact naming, assembly, and archiving for native release builds.
//!
//! # Sub-modules
//!
//! - [`naming`] — deterministic artefact name policy (`ArtefactName`).
//! - [`assembler`] — output directory assembly and upload staging.
//! - [`archive`] — zip creation for assembled trees.

pub mod archive;
pub mod assembler;
pub mod naming;
