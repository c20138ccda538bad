use anyhow::Result;
use std::path::PathBuf;
use license_gate::config::{add_exempt_packages_to_manifest, load_policy, manifest_path};
use license_gate::lock::LockParser;

pub fn handle_fix(
    manifest: Option<PathBuf>,
    lock: Option<PathBuf>,
    dry_run: bool,
    no_dev: bool,
    quiet: bool,
) -> Result<()> {
    let manifest_path = manifest_path(manifest.as_deref());
    let policy = load_policy(&manifest_path)?;

    if !policy.has_constraints() {
        if !quiet {
            eprintln!("No policy configured. Run 'license-gate init <policy>' first.");
        }
        std::process::exit(1);
    }

    let lock_path = LockParser::locate(&manifest_path, lock)?;
    let lock_file = LockParser::parse_lock(&lock_path)?;
    let report = policy.check_packages(&lock_file.all_packages(!no_dev));

    let rejected: Vec<_> = report.rejected().collect();
    if rejected.is_empty() {
        if !quiet {
            println!("No rejected packages, nothing to fix");
        }
        return Ok(());
    }

    if dry_run {
        if !quiet {
            println!("Would whitelist {} packages in {}:", rejected.len(), manifest_path.display());
            for package in &rejected {
                println!("  - {} ({})", package.name, package.licenses.join(", "));
            }
        }
        return Ok(());
    }

    let names: Vec<String> = rejected.iter().map(|package| package.name.clone()).collect();
    let added = add_exempt_packages_to_manifest(&manifest_path, &names)?;

    if !quiet {
        println!("Whitelisted {} packages in {}:", added, manifest_path.display());
        for package in &rejected {
            println!("  ✅ {} ({})", package.name, package.licenses.join(", "));
        }
    }

    Ok(())
}
