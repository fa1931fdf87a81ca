//! Behaviour-driven tests for release assembly and staging.
//!
//! These scenarios drive the assembly and web staging pipelines end to end
//! with a scripted command executor, so no real tool runs. Tests use the
//! rstest-bdd v0.5 mutable world pattern.

use camino::Utf8PathBuf;
use meters_release::artefact::assembler::{AssembledArtefact, Assembler};
use meters_release::artefact::naming::ArtefactName;
use meters_release::branch::Branch;
use meters_release::builder::ReleaseBuilder;
use meters_release::config::{ReleaseConfig, TargetOs};
use meters_release::error::ReleaseError;
use meters_release::frontend::Frontend;
use meters_release::profile::AppId;
use meters_release::test_utils::{
    ExpectedCall, StubExecutor, failure_output_with_code, output_with_stdout, string_args,
    success_output,
};
use meters_release::version::ReleaseVersion;
use meters_release::web::{WebArtefact, WebBuilder};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::fs;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

#[derive(Default)]
struct ReleaseWorld {
    _scratch: Option<TempDir>,
    root: Option<Utf8PathBuf>,
    build: Option<Utf8PathBuf>,
    upload: Option<Utf8PathBuf>,
    crate_dir: Option<Utf8PathBuf>,
    frontends: Vec<Frontend>,
    commit: Option<String>,
    calls: Vec<ExpectedCall>,
    assembled: Option<AssembledArtefact>,
    web: Option<WebArtefact>,
    error: Option<ReleaseError>,
}

#[fixture]
fn world() -> ReleaseWorld {
    let scratch = TempDir::new().expect("temp dir");
    let base = Utf8PathBuf::from_path_buf(scratch.path().to_path_buf()).expect("utf-8 temp path");
    ReleaseWorld {
        root: Some(base.join("checkout")),
        build: Some(base.join("builds")),
        upload: Some(base.join("uploads")),
        _scratch: Some(scratch),
        ..ReleaseWorld::default()
    }
}

fn root(world: &ReleaseWorld) -> Utf8PathBuf {
    world.root.clone().expect("root set")
}

fn build_dir(world: &ReleaseWorld) -> Utf8PathBuf {
    world.build.clone().expect("build dir set")
}

fn upload_dir(world: &ReleaseWorld) -> Utf8PathBuf {
    world.upload.clone().expect("upload dir set")
}

fn config_for(world: &ReleaseWorld) -> ReleaseConfig {
    ReleaseConfig {
        profile: AppId::Meters.profile(),
        frontends: world.frontends.clone(),
        build_path: build_dir(world),
        upload_path: upload_dir(world),
        crate_paths: vec![world.crate_dir.clone().expect("crate dir set")],
        root_path: root(world),
        target_os: TargetOs::Linux,
        dry_run: false,
    }
}

fn artefact_name(config: &ReleaseConfig) -> ArtefactName {
    ArtefactName::new(
        &config.profile,
        config.target_os,
        &ReleaseVersion::try_from("1.2.3").expect("valid version"),
        &Branch::try_from("master").expect("valid branch"),
    )
}

// ---------------------------------------------------------------------------
// Step definitions
// ---------------------------------------------------------------------------

#[given("a checkout with built release binaries")]
fn given_checkout(world: &mut ReleaseWorld) {
    let root = root(world);
    let binary_dir = root.join("target").join("release");
    fs::create_dir_all(&binary_dir).expect("create release dir");
    fs::write(root.join("README.md"), "# Meters Below the Ground\n").expect("write readme");
    fs::write(root.join("LICENSE"), "MIT\n").expect("write licence");
    fs::write(binary_dir.join("meters_unix"), b"unix binary").expect("write binary");
    fs::write(binary_dir.join("meters_glutin"), b"glutin binary").expect("write binary");
    world.crate_dir = Some(root.join("unix"));
}

#[given("the terminal frontend is selected")]
fn given_terminal_frontend(world: &mut ReleaseWorld) {
    world.frontends = vec![Frontend::Unix];
}

#[given("git reports commit \"{hash}\"")]
fn given_commit(world: &mut ReleaseWorld, hash: String) {
    world.calls.push(ExpectedCall {
        program: "git",
        args: string_args(&["rev-parse", "HEAD"]),
        working_dir: Some(root(world)),
        result: Ok(output_with_stdout(&format!("{hash}\n"))),
    });
    world.commit = Some(hash);
}

#[given("the versioned output directory already exists")]
fn given_existing_output_dir(world: &mut ReleaseWorld) {
    fs::create_dir_all(build_dir(world).join("meters-linux-x86_64-v1.2.3"))
        .expect("pre-create output dir");
}

#[given("a web crate with a built dist tree")]
fn given_web_crate(world: &mut ReleaseWorld) {
    let crate_dir = root(world).join("wasm");
    let dist = crate_dir.join("dist");
    fs::create_dir_all(dist.join("assets")).expect("create dist tree");
    fs::write(dist.join("index.html"), "<html>").expect("write page");
    fs::write(dist.join("assets").join("app.wasm"), b"wasm").expect("write module");
    world.crate_dir = Some(crate_dir);
    world.frontends = vec![Frontend::Wasm];
}

#[when("the release directory is assembled")]
fn when_assembled(world: &mut ReleaseWorld) {
    let config = config_for(world);
    let name = artefact_name(&config);
    let executor = StubExecutor::new(std::mem::take(&mut world.calls));
    match Assembler::new(&config, &executor, &name).assemble() {
        Ok(artefact) => world.assembled = Some(artefact),
        Err(err) => world.error = Some(err),
    }
    executor.assert_finished();
}

#[when("the release build fails with status {code}")]
fn when_build_fails(world: &mut ReleaseWorld, code: i32) {
    let config = config_for(world);
    let manifest_paths = config.manifest_paths();
    let executor = StubExecutor::new(vec![ExpectedCall {
        program: "cargo",
        args: string_args(&[
            "build",
            "--manifest-path",
            manifest_paths[0].as_str(),
            "--release",
        ]),
        working_dir: None,
        result: Ok(failure_output_with_code(
            code,
            "error[E0308]: mismatched types",
        )),
    }]);
    world.error = ReleaseBuilder::new(&executor)
        .build_all(&manifest_paths)
        .err();
    executor.assert_finished();
}

#[when("the web build is staged")]
fn when_web_staged(world: &mut ReleaseWorld) {
    let config = config_for(world);
    let name = artefact_name(&config);
    let crate_dir = world.crate_dir.clone().expect("crate dir set");
    let executor = StubExecutor::new(vec![
        ExpectedCall {
            program: "npm",
            args: string_args(&["install", "--prefix", crate_dir.as_str()]),
            working_dir: None,
            result: Ok(success_output()),
        },
        ExpectedCall {
            program: "bash",
            args: string_args(&[crate_dir.join("build_dist.sh").as_str()]),
            working_dir: None,
            result: Ok(success_output()),
        },
    ]);
    match WebBuilder::new(&config, &executor, &name).build() {
        Ok(artefact) => world.web = Some(artefact),
        Err(err) => world.error = Some(err),
    }
    executor.assert_finished();
}

#[then("the staged directory contains the renamed terminal binary")]
fn then_binary_staged(world: &mut ReleaseWorld) {
    let assembled = world.assembled.as_ref().expect("assembly succeeded");
    assert_eq!(
        fs::read(assembled.output_dir.join("meters-terminal")).expect("staged binary"),
        b"unix binary"
    );
}

#[then("the staged directory carries the metadata files")]
fn then_metadata_staged(world: &mut ReleaseWorld) {
    let assembled = world.assembled.as_ref().expect("assembly succeeded");
    let commit = world.commit.as_ref().expect("commit set");
    assert_eq!(
        fs::read_to_string(assembled.output_dir.join("README.txt")).expect("readme"),
        "# Meters Below the Ground\n"
    );
    assert_eq!(
        fs::read_to_string(assembled.output_dir.join("LICENSE.txt")).expect("licence"),
        "MIT\n"
    );
    assert_eq!(
        fs::read_to_string(assembled.output_dir.join("REVISION.txt")).expect("revision"),
        format!("{commit}\n")
    );
}

#[then("the upload directory holds identical version and branch archives")]
fn then_archives_match(world: &mut ReleaseWorld) {
    let assembled = world.assembled.as_ref().expect("assembly succeeded");
    assert_eq!(
        assembled.versioned_zip,
        upload_dir(world).join("meters-linux-x86_64-v1.2.3.zip")
    );
    assert_eq!(
        assembled.branch_zip,
        upload_dir(world).join("meters-linux-x86_64-master.zip")
    );
    let versioned = fs::read(&assembled.versioned_zip).expect("versioned zip");
    let branch = fs::read(&assembled.branch_zip).expect("branch zip");
    assert_eq!(versioned, branch);
}

#[then("assembly fails because the output directory exists")]
fn then_output_dir_error(world: &mut ReleaseWorld) {
    assert!(matches!(
        world.error.as_ref().expect("assembly failed"),
        ReleaseError::OutputDirExists { .. }
    ));
}

#[then("no archive is written")]
fn then_no_archive(world: &mut ReleaseWorld) {
    assert!(!upload_dir(world).exists());
}

#[then("the release error carries exit status {code}")]
fn then_error_status(world: &mut ReleaseWorld, code: i32) {
    let err = world.error.as_ref().expect("build failed");
    assert!(matches!(err, ReleaseError::BuildFailed { .. }));
    assert_eq!(err.exit_code(), code);
}

#[then("both tagged destinations hold the site")]
fn then_web_staged(world: &mut ReleaseWorld) {
    let web = world.web.as_ref().expect("web staging succeeded");
    assert_eq!(
        web.versioned_dir,
        upload_dir(world).join("meters").join("v1.2.3")
    );
    assert_eq!(web.branch_dir, upload_dir(world).join("meters").join("master"));
    for staged in [&web.versioned_dir, &web.branch_dir] {
        assert_eq!(
            fs::read_to_string(staged.join("index.html")).expect("page"),
            "<html>"
        );
        assert!(staged.join("assets").join("app.wasm").is_file());
    }
}

// ---------------------------------------------------------------------------
// Scenario bindings
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/assembly.feature",
    name = "Assemble the terminal release for linux"
)]
fn scenario_assemble_terminal(world: ReleaseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/assembly.feature",
    name = "A pre-existing output directory aborts assembly"
)]
fn scenario_existing_output_dir(world: ReleaseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/assembly.feature",
    name = "A failing release build surfaces the compiler status"
)]
fn scenario_failing_build(world: ReleaseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/assembly.feature",
    name = "Stage the web build under both tags"
)]
fn scenario_web_staging(world: ReleaseWorld) {
    let _ = world;
}
