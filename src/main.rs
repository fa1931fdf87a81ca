//! Release packaging CLI entrypoint.
//!
//! This binary builds the selected frontends of a game in release mode,
//! assembles the versioned artefact directory, archives it for upload
//! under version-tagged and branch-tagged names, and produces the macOS
//! application bundle and web staging trees when the run calls for them.

use clap::Parser;
use meters_release::artefact::assembler::Assembler;
use meters_release::artefact::naming::ArtefactName;
use meters_release::branch::{Branch, resolve_branch};
use meters_release::builder::ReleaseBuilder;
use meters_release::bundle::{BundleBuilder, should_bundle};
use meters_release::cli::Cli;
use meters_release::config::ReleaseConfig;
use meters_release::error::{ReleaseError, Result};
use meters_release::exec::{CommandExecutor, SystemCommandExecutor};
use meters_release::manifest;
use meters_release::output::{ReleasePlan, planned_artefacts, success_message};
use meters_release::version::ReleaseVersion;
use meters_release::web::WebBuilder;
use std::io::Write;

struct RunContext<'a> {
    cli: &'a Cli,
    config: &'a ReleaseConfig,
    executor: &'a dyn CommandExecutor,
    name: &'a ArtefactName,
}

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    if cli.dry_run {
        return run_dry(cli, stderr);
    }

    let config = ReleaseConfig::from_cli(cli)?;
    let executor = SystemCommandExecutor;
    let (version, branch) = resolve_identity(&config, &executor)?;
    let name = ArtefactName::new(&config.profile, config.target_os, &version, &branch);
    log::debug!(
        "resolved {} {version} on branch {branch} for {}",
        config.profile.app_name(),
        config.target_os
    );

    let context = RunContext {
        cli,
        config: &config,
        executor: &executor,
        name: &name,
    };

    if cli.verbosity > 0 && !cli.quiet {
        write_stderr_line(
            stderr,
            format!(
                "Releasing {} {version} from branch {branch}",
                config.profile.app_name()
            ),
        );
        for path in planned_artefacts(&config, &name) {
            write_stderr_line(stderr, format!("  - {path}"));
        }
        write_stderr_line(stderr, "");
    }

    let mut staged = 0;
    if config.wants_native() {
        staged += perform_native_release(&context, stderr)?;
    }
    if config.wants_web() {
        staged += perform_web_release(&context, stderr)?;
    }

    if !cli.quiet {
        write_stderr_line(stderr, "");
        write_stderr_line(stderr, success_message(staged, &config.upload_path));
    }

    Ok(())
}

/// Runs in dry-run mode, resolving the full plan without executing it.
fn run_dry(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let config = ReleaseConfig::from_cli(cli)?;
    let executor = SystemCommandExecutor;
    let (version, branch) = resolve_identity(&config, &executor)?;
    let name = ArtefactName::new(&config.profile, config.target_os, &version, &branch);

    let plan = ReleasePlan {
        config: &config,
        version: &version,
        branch: &branch,
        name: &name,
    };
    write_stderr_line(stderr, plan.display_text());
    Ok(())
}

/// Reads the release version from the first crate manifest and resolves
/// the branch tag.
fn resolve_identity(
    config: &ReleaseConfig,
    executor: &dyn CommandExecutor,
) -> Result<(ReleaseVersion, Branch)> {
    let manifest_paths = config.manifest_paths();
    let manifest_path = manifest_paths
        .first()
        .ok_or_else(|| ReleaseError::ProfileConstraint {
            app: config.profile.app_name(),
            reason: "at least one crate path is required".to_owned(),
        })?;
    let version = manifest::release_version(manifest_path)?;
    let branch = resolve_branch(executor, &config.root_path)?;
    Ok((version, branch))
}

/// Builds the native frontends, assembles the release directory, and adds
/// the macOS bundle when the run calls for it. Returns the number of
/// artefacts staged into the upload directory.
fn perform_native_release(context: &RunContext<'_>, stderr: &mut dyn Write) -> Result<usize> {
    let manifest_paths = context.config.manifest_paths();
    if !context.cli.quiet {
        write_stderr_line(
            stderr,
            format!("Building {} crate(s) in release mode...", manifest_paths.len()),
        );
    }
    ReleaseBuilder::new(context.executor).build_all(&manifest_paths)?;

    if !context.cli.quiet {
        write_stderr_line(
            stderr,
            format!("Assembling {}...", context.name.versioned_stem()),
        );
    }
    let assembled = Assembler::new(context.config, context.executor, context.name).assemble()?;
    let mut staged = 2;

    if should_bundle(context.config) {
        if !context.cli.quiet {
            write_stderr_line(
                stderr,
                format!("Creating the {} disk images...", context.name.bundle_name()),
            );
        }
        BundleBuilder::new(context.config, context.executor, context.name).build(&assembled)?;
        staged += 2;
    }

    Ok(staged)
}

/// Builds and stages the web frontend. Returns the number of destinations
/// staged into the upload directory.
fn perform_web_release(context: &RunContext<'_>, stderr: &mut dyn Write) -> Result<usize> {
    if !context.cli.quiet {
        write_stderr_line(
            stderr,
            format!("Staging the web build for {}...", context.name.app_name()),
        );
    }
    WebBuilder::new(context.config, context.executor, context.name).build()?;
    Ok(2)
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            let exit_code = err.exit_code();
            write_stderr_line(stderr, err);
            exit_code
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; ignore write failures.
    }
}
