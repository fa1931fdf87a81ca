//! Tests for release-packager CLI parsing and default behaviours.

use super::*;
use rstest::rstest;

const REQUIRED: [&str; 13] = [
    "meters-release",
    "--frontend",
    "unix",
    "--build-path",
    "builds",
    "--upload-path",
    "uploads",
    "--crate-path",
    "unix",
    "--root-path",
    ".",
    "--os",
    "linux",
];

#[test]
fn cli_parses_a_minimal_invocation() {
    let cli = Cli::parse_from(REQUIRED);
    assert_eq!(cli.app, AppId::Meters);
    assert_eq!(cli.frontend, vec![Frontend::Unix]);
    assert_eq!(cli.build_path, Utf8PathBuf::from("builds"));
    assert_eq!(cli.upload_path, Utf8PathBuf::from("uploads"));
    assert_eq!(cli.crate_path, vec![Utf8PathBuf::from("unix")]);
    assert_eq!(cli.root_path, Utf8PathBuf::from("."));
    assert_eq!(cli.target_os, TargetOs::Linux);
    assert!(!cli.dry_run);
    assert_eq!(cli.verbosity, 0);
    assert!(!cli.quiet);
}

#[test]
fn cli_accumulates_repeated_frontends_in_order() {
    let mut args = REQUIRED.to_vec();
    args.extend(["--frontend", "glutin", "--frontend", "wasm"]);
    let cli = Cli::parse_from(args);
    assert_eq!(
        cli.frontend,
        vec![Frontend::Unix, Frontend::Glutin, Frontend::Wasm]
    );
}

#[test]
fn cli_accumulates_repeated_crate_paths_in_order() {
    let mut args = REQUIRED.to_vec();
    args.extend(["--crate-path", "glutin"]);
    let cli = Cli::parse_from(args);
    assert_eq!(
        cli.crate_path,
        vec![Utf8PathBuf::from("unix"), Utf8PathBuf::from("glutin")]
    );
}

#[test]
fn cli_parses_the_punchcards_profile() {
    let mut args = REQUIRED.to_vec();
    args.extend(["--app", "punchcards"]);
    let cli = Cli::parse_from(args);
    assert_eq!(cli.app, AppId::Punchcards);
}

#[rstest]
#[case::linux("linux", TargetOs::Linux)]
#[case::macos("macos", TargetOs::Macos)]
fn cli_parses_os_labels(#[case] label: &str, #[case] expected: TargetOs) {
    let mut args = REQUIRED[..11].to_vec();
    args.extend(["--os", label]);
    let cli = Cli::parse_from(args);
    assert_eq!(cli.target_os, expected);
}

#[rstest]
#[case::dry_run(&["--dry-run"], |cli: &Cli| cli.dry_run)]
#[case::verbose(&["-v"], |cli: &Cli| cli.verbosity == 1)]
#[case::double_verbose(&["-vv"], |cli: &Cli| cli.verbosity == 2)]
#[case::quiet(&["-q"], |cli: &Cli| cli.quiet)]
fn cli_parses_flags(#[case] extra: &[&str], #[case] check: fn(&Cli) -> bool) {
    let mut args = REQUIRED.to_vec();
    args.extend(extra);
    let cli = Cli::parse_from(args);
    assert!(check(&cli));
}

#[rstest]
#[case::frontend("--frontend")]
#[case::build_path("--build-path")]
#[case::upload_path("--upload-path")]
#[case::crate_path("--crate-path")]
#[case::root_path("--root-path")]
#[case::os("--os")]
fn cli_rejects_a_missing_required_flag(#[case] flag: &str) {
    // Drop the flag and the value that follows it.
    let mut args = Vec::new();
    let mut skip_value = false;
    for arg in REQUIRED {
        if skip_value {
            skip_value = false;
        } else if arg == flag {
            skip_value = true;
        } else {
            args.push(arg);
        }
    }
    Cli::try_parse_from(args).expect_err("expected clap to reject the missing flag");
}

#[test]
fn cli_rejects_verbose_with_quiet() {
    let mut args = REQUIRED.to_vec();
    args.extend(["-v", "-q"]);
    Cli::try_parse_from(args).expect_err("expected clap to reject conflicting flags");
}

#[test]
fn cli_rejects_an_unknown_frontend() {
    let mut args = REQUIRED.to_vec();
    args.extend(["--frontend", "sdl"]);
    Cli::try_parse_from(args).expect_err("expected clap to reject the unknown frontend");
}

#[test]
fn cli_rejects_an_unknown_os() {
    let mut args = REQUIRED[..11].to_vec();
    args.extend(["--os", "windows"]);
    Cli::try_parse_from(args).expect_err("expected clap to reject the unknown os");
}
