use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use crate::package::PLUGIN_PACKAGE_NAME;
use crate::policy::config::WHITELISTED_PACKAGES_KEY;
use crate::policy::PolicyConfig;

pub const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Resolve the manifest location, defaulting to `manifest.json` in the
/// current directory.
pub fn manifest_path(explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(MANIFEST_FILE_NAME),
    }
}

pub fn read_manifest(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse manifest: {}", path.display()))
}

pub fn write_manifest(path: &Path, manifest: &Value) -> Result<()> {
    let mut content = serde_json::to_string_pretty(manifest)
        .context("Failed to serialize manifest")?;
    content.push('\n');

    fs::write(path, content)
        .with_context(|| format!("Failed to write manifest: {}", path.display()))
}

/// Raw policy section `extra["license-gate/license-gate"]`.
///
/// A missing manifest or section yields `Value::Null`, which decodes to a
/// policy without constraints.
pub fn load_policy_value(path: &Path) -> Result<Value> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no manifest found, using empty policy");
        return Ok(Value::Null);
    }

    let manifest = read_manifest(path)?;
    Ok(manifest
        .get("extra")
        .and_then(|extra| extra.get(PLUGIN_PACKAGE_NAME))
        .cloned()
        .unwrap_or(Value::Null))
}

pub fn load_policy(path: &Path) -> Result<PolicyConfig> {
    Ok(PolicyConfig::from_value(&load_policy_value(path)?))
}

/// Mutable access to the policy section, creating `extra` and the section
/// as needed.
pub fn policy_section_mut(manifest: &mut Value) -> Result<&mut Map<String, Value>> {
    let root = manifest
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Manifest root must be a JSON object"))?;

    let extra = root
        .entry("extra")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Manifest \"extra\" must be a JSON object"))?;

    extra
        .entry(PLUGIN_PACKAGE_NAME)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Manifest \"extra.{}\" must be a JSON object", PLUGIN_PACKAGE_NAME))
}

/// Add packages to `whitelisted-packages`, keeping its list or map shape.
/// Returns how many names were new.
pub fn add_exempt_packages(manifest: &mut Value, packages: &[String]) -> Result<usize> {
    let section = policy_section_mut(manifest)?;
    let entry = section
        .entry(WHITELISTED_PACKAGES_KEY)
        .or_insert_with(|| Value::Array(Vec::new()));

    let mut added = 0;
    match entry {
        Value::Array(names) => {
            for package in packages {
                if !names.iter().any(|name| name.as_str() == Some(package.as_str())) {
                    names.push(Value::String(package.clone()));
                    added += 1;
                }
            }
        }
        Value::Object(names) => {
            for package in packages {
                if !names.contains_key(package) {
                    names.insert(package.clone(), Value::String("*".to_string()));
                    added += 1;
                }
            }
        }
        other => {
            return Err(anyhow::anyhow!(
                "Invalid \"{}\" format: expected a list or map, found {}",
                WHITELISTED_PACKAGES_KEY,
                other
            ))
        }
    }

    Ok(added)
}

/// Add exemptions to the manifest file on disk.
pub fn add_exempt_packages_to_manifest(path: &Path, packages: &[String]) -> Result<usize> {
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "{} not found. Run 'license-gate init <policy>' first.",
            path.display()
        ));
    }

    let mut manifest = read_manifest(path)?;
    let added = add_exempt_packages(&mut manifest, packages)?;
    write_manifest(path, &manifest)?;

    Ok(added)
}
