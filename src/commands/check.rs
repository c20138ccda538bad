use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use crate::cli::OutputFormat;
use license_gate::config::{load_policy, manifest_path};
use license_gate::lock::LockParser;
use license_gate::output::format_table_output;

/// Exit code used when the policy rejects at least one package.
pub const VIOLATION_EXIT_CODE: i32 = 2;

#[allow(clippy::too_many_arguments)]
pub fn handle_check(
    manifest: Option<PathBuf>,
    lock: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
    no_dev: bool,
    quiet: bool,
    verbose: bool,
    exit_zero: bool,
) -> Result<()> {
    let manifest_path = manifest_path(manifest.as_deref());
    let policy = load_policy(&manifest_path)?;

    if !policy.has_constraints() && !quiet {
        eprintln!("No license policy configured in {}; every package is allowed", manifest_path.display());
    }

    let lock_path = LockParser::locate(&manifest_path, lock)?;
    let lock_file = LockParser::parse_lock(&lock_path)?;
    let packages = lock_file.all_packages(!no_dev);

    let report = policy.check_packages(&packages);

    let output_content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Table => format_table_output(&report, verbose),
    };

    match output {
        Some(path) => fs::write(path, output_content)?,
        None => {
            if !quiet {
                println!("{}", output_content);
            }
        }
    }

    if report.has_rejections() {
        if !quiet {
            for package in report.rejected() {
                eprintln!(
                    "Licenses \"{}\" of package \"{}\" are not allowed to be used in the project",
                    package.licenses.join(", "),
                    package.name
                );
            }
        }
        if !exit_zero {
            eprintln!("Exiting with error due to disallowed licenses");
            std::process::exit(VIOLATION_EXIT_CODE);
        }
    }

    Ok(())
}
