use anyhow::Result;
use std::path::PathBuf;
use license_gate::config::{load_policy_value, manifest_path};
use license_gate::PolicyConfig;

pub fn handle_config(manifest: Option<PathBuf>, show: bool, validate: bool, quiet: bool) -> Result<()> {
    if !show && !validate {
        if !quiet {
            eprintln!("Use --show or --validate");
        }
        std::process::exit(1);
    }

    let manifest_path = manifest_path(manifest.as_deref());
    let value = match load_policy_value(&manifest_path) {
        Ok(value) => value,
        Err(e) => {
            if !quiet {
                eprintln!("Error loading configuration: {:#}", e);
            }
            std::process::exit(1);
        }
    };

    if show && !quiet {
        println!("{}", serde_json::to_string_pretty(&PolicyConfig::from_value(&value))?);
    }

    if validate {
        let issues = PolicyConfig::lint(&value);
        if issues.is_empty() {
            if !quiet {
                println!("✅ Configuration is valid");
            }
        } else {
            if !quiet {
                eprintln!("❌ Configuration validation failed:");
                for issue in &issues {
                    eprintln!("  - {}", issue);
                }
            }
            std::process::exit(1);
        }
    }

    Ok(())
}
