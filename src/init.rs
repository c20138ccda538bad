use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use crate::config::{policy_section_mut, read_manifest, write_manifest};
use crate::policy::config::WHITELISTED_PACKAGES_KEY;

#[derive(Debug, Clone, Copy)]
pub enum InitPreset {
    /// Permissive licenses only; copyleft and proprietary are denied.
    Green,
    /// Strong copyleft denied, everything else allowed.
    Yellow,
    /// Only network copyleft denied.
    Red,
}

fn get_preset_config(preset: InitPreset) -> &'static str {
    match preset {
        InitPreset::Green => include_str!("../presets/green.json"),
        InitPreset::Yellow => include_str!("../presets/yellow.json"),
        InitPreset::Red => include_str!("../presets/red.json"),
    }
}

pub fn preset_policy(preset: InitPreset) -> Result<Value> {
    serde_json::from_str(get_preset_config(preset)).context("Invalid preset config format")
}

/// Write a preset policy into the manifest's `extra` section.
///
/// Packages already exempted in the manifest stay exempted.
pub fn generate_config_at_path<P: AsRef<Path>>(path: P, preset: InitPreset) -> Result<()> {
    let manifest_path = path.as_ref();

    if !manifest_path.exists() {
        return Err(anyhow::anyhow!(
            "{} not found. Please create the project manifest first.",
            manifest_path.display()
        ));
    }

    let mut manifest = read_manifest(manifest_path)?;
    let mut policy = preset_policy(preset)?;

    let section = policy_section_mut(&mut manifest)?;
    if let Some(existing) = section.get(WHITELISTED_PACKAGES_KEY) {
        policy[WHITELISTED_PACKAGES_KEY] = existing.clone();
    }
    if let Value::Object(entries) = policy {
        *section = entries;
    }

    write_manifest(manifest_path, &manifest)?;
    tracing::info!(path = %manifest_path.display(), preset = ?preset, "wrote preset policy");
    Ok(())
}
