//! Output formatting for the release CLI.
//!
//! Renders the dry-run plan and the run's closing summary. The plan lists
//! the resolved configuration together with every artefact a live run
//! would produce, computed by the same code the live run uses.

use crate::artefact::assembler::AssembledArtefact;
use crate::artefact::naming::ArtefactName;
use crate::branch::Branch;
use crate::bundle::{self, BundleArtefact};
use crate::config::ReleaseConfig;
use crate::version::ReleaseVersion;
use crate::web::WebArtefact;
use camino::{Utf8Path, Utf8PathBuf};

/// Resolved inputs for one release run, ready for display.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use meters_release::artefact::naming::ArtefactName;
/// use meters_release::branch::Branch;
/// use meters_release::config::{ReleaseConfig, TargetOs};
/// use meters_release::frontend::Frontend;
/// use meters_release::output::ReleasePlan;
/// use meters_release::profile::AppId;
/// use meters_release::version::ReleaseVersion;
///
/// let config = ReleaseConfig {
///     profile: AppId::Meters.profile(),
///     frontends: vec![Frontend::Unix],
///     build_path: Utf8PathBuf::from("builds"),
///     upload_path: Utf8PathBuf::from("uploads"),
///     crate_paths: vec![Utf8PathBuf::from("unix")],
///     root_path: Utf8PathBuf::from("."),
///     target_os: TargetOs::Linux,
///     dry_run: true,
/// };
/// let version: ReleaseVersion = "1.2.3".try_into().expect("valid version");
/// let branch: Branch = "master".try_into().expect("valid branch");
/// let name = ArtefactName::new(&config.profile, config.target_os, &version, &branch);
///
/// let plan = ReleasePlan {
///     config: &config,
///     version: &version,
///     branch: &branch,
///     name: &name,
/// };
///
/// let text = plan.display_text();
/// assert!(text.contains("Dry run"));
/// assert!(text.contains("uploads/meters-linux-x86_64-v1.2.3.zip"));
/// ```
#[derive(Debug)]
pub struct ReleasePlan<'a> {
    /// Resolved run configuration.
    pub config: &'a ReleaseConfig,
    /// Version read from the first crate manifest.
    pub version: &'a ReleaseVersion,
    /// Branch resolved from the environment or the repository.
    pub branch: &'a Branch,
    /// Artefact names derived from the fields above.
    pub name: &'a ArtefactName,
}

impl ReleasePlan<'_> {
    /// Format the plan for display.
    #[must_use]
    pub fn display_text(&self) -> String {
        let mut lines = vec![
            "Dry run - nothing will be built or staged".to_owned(),
            String::new(),
            format!("Application: {}", self.config.profile.app_name()),
            format!("Version: {}", self.version),
            format!("Branch: {}", self.branch),
            format!("Target OS: {}", self.config.target_os),
            format!("Build directory: {}", self.config.build_path),
            format!("Upload directory: {}", self.config.upload_path),
        ];

        lines.push(String::new());
        lines.push("Frontends:".to_owned());
        for frontend in &self.config.frontends {
            lines.push(format!("  - {frontend}"));
        }

        lines.push(String::new());
        lines.push("Crates:".to_owned());
        for crate_path in &self.config.crate_paths {
            lines.push(format!("  - {crate_path}"));
        }

        lines.push(String::new());
        lines.push("Artefacts:".to_owned());
        for artefact in planned_artefacts(self.config, self.name) {
            lines.push(format!("  - {artefact}"));
        }

        lines.join("\n")
    }
}

/// List every path a live run with this configuration would produce.
#[must_use]
pub fn planned_artefacts(config: &ReleaseConfig, name: &ArtefactName) -> Vec<Utf8PathBuf> {
    let mut paths = Vec::new();
    if config.wants_native() {
        let assembled = AssembledArtefact::planned(config, name);
        paths.push(assembled.output_dir);
        paths.push(assembled.versioned_zip);
        paths.push(assembled.branch_zip);
    }
    if bundle::should_bundle(config) {
        let bundled = BundleArtefact::planned(config, name);
        paths.push(bundled.bundle_dir);
        paths.push(bundled.versioned_dmg);
        paths.push(bundled.branch_dmg);
    }
    if config.wants_web() {
        let web = WebArtefact::planned(config, name);
        paths.push(web.versioned_dir);
        paths.push(web.branch_dir);
    }
    paths
}

/// Format the closing summary after a successful run.
#[must_use]
pub fn success_message(count: usize, upload_dir: &Utf8Path) -> String {
    let plural = if count == 1 { "artefact" } else { "artefacts" };
    format!("Successfully staged {count} release {plural} to {upload_dir}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TargetOs;
    use crate::frontend::Frontend;
    use crate::profile::AppId;
    use rstest::rstest;

    struct PlanParts {
        config: ReleaseConfig,
        version: ReleaseVersion,
        branch: Branch,
        name: ArtefactName,
    }

    impl PlanParts {
        fn plan(&self) -> ReleasePlan<'_> {
            ReleasePlan {
                config: &self.config,
                version: &self.version,
                branch: &self.branch,
                name: &self.name,
            }
        }
    }

    fn parts_for(target_os: TargetOs, frontends: Vec<Frontend>) -> PlanParts {
        let config = ReleaseConfig {
            profile: AppId::Meters.profile(),
            frontends,
            build_path: Utf8PathBuf::from("builds"),
            upload_path: Utf8PathBuf::from("uploads"),
            crate_paths: vec![Utf8PathBuf::from("unix"), Utf8PathBuf::from("wasm")],
            root_path: Utf8PathBuf::from("."),
            target_os,
            dry_run: true,
        };
        let version = ReleaseVersion::try_from("1.2.3").expect("valid version");
        let branch = Branch::try_from("master").expect("valid branch");
        let name = ArtefactName::new(&config.profile, config.target_os, &version, &branch);
        PlanParts {
            config,
            version,
            branch,
            name,
        }
    }

    #[rstest]
    fn plan_lists_the_resolved_configuration() {
        let parts = parts_for(TargetOs::Linux, vec![Frontend::Unix, Frontend::Wasm]);
        let text = parts.plan().display_text();

        assert!(text.starts_with("Dry run"));
        assert!(text.contains("Application: meters"));
        assert!(text.contains("Version: 1.2.3"));
        assert!(text.contains("Branch: master"));
        assert!(text.contains("Target OS: linux"));
        assert!(text.contains("Build directory: builds"));
        assert!(text.contains("Upload directory: uploads"));
        assert!(text.contains("  - unix"));
        assert!(text.contains("  - wasm"));
    }

    #[rstest]
    fn native_plan_lists_the_directory_and_both_zips() {
        let parts = parts_for(TargetOs::Linux, vec![Frontend::Unix]);
        let artefacts = planned_artefacts(&parts.config, &parts.name);

        assert_eq!(
            artefacts,
            vec![
                Utf8PathBuf::from("builds/meters-linux-x86_64-v1.2.3"),
                Utf8PathBuf::from("uploads/meters-linux-x86_64-v1.2.3.zip"),
                Utf8PathBuf::from("uploads/meters-linux-x86_64-master.zip"),
            ]
        );
    }

    #[rstest]
    fn macos_opengl_plan_adds_the_disk_images() {
        let parts = parts_for(TargetOs::Macos, vec![Frontend::Glutin]);
        let artefacts = planned_artefacts(&parts.config, &parts.name);

        assert_eq!(artefacts.len(), 6);
        assert!(artefacts.contains(&Utf8PathBuf::from("builds/MetersBelowTheGround")));
        assert!(artefacts.contains(&Utf8PathBuf::from("uploads/MetersBelowTheGround-v1.2.3.dmg")));
        assert!(artefacts.contains(&Utf8PathBuf::from("uploads/MetersBelowTheGround-master.dmg")));
    }

    #[rstest]
    fn web_plan_lists_the_tagged_destinations() {
        let parts = parts_for(TargetOs::Linux, vec![Frontend::Wasm]);
        let artefacts = planned_artefacts(&parts.config, &parts.name);

        assert_eq!(
            artefacts,
            vec![
                Utf8PathBuf::from("uploads/meters/v1.2.3"),
                Utf8PathBuf::from("uploads/meters/master"),
            ]
        );
        assert!(!parts.plan().display_text().contains(".zip"));
    }

    #[rstest]
    #[case::singular(1, "1 release artefact")]
    #[case::plural(6, "6 release artefacts")]
    fn success_message_pluralises_correctly(#[case] count: usize, #[case] expected: &str) {
        let msg = success_message(count, Utf8Path::new("uploads"));
        assert!(msg.contains(expected));
        assert!(msg.contains("uploads"));
    }
}
