use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use anyhow::{Result, Context};
use crate::package::PackageData;

pub const LOCK_FILE_NAME: &str = "manifest.lock";

#[derive(Debug, Clone, Deserialize)]
pub struct LockFile {
    #[serde(rename = "content-hash")]
    pub content_hash: Option<String>,
    #[serde(default)]
    pub packages: Vec<LockedPackage>,
    #[serde(rename = "packages-dev", default)]
    pub packages_dev: Vec<LockedPackage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LockedPackage {
    pub name: String,
    pub version: Option<String>,
    /// `None` when the entry carries no license metadata at all.
    #[serde(default, deserialize_with = "license_list")]
    pub license: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Older lock files write a single license as a bare string.
fn license_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OneOrMany>::deserialize(deserializer)?.map(|value| match value {
        OneOrMany::One(license) => vec![license],
        OneOrMany::Many(licenses) => licenses,
    }))
}

impl PackageData for LockedPackage {
    fn name(&self) -> &str {
        &self.name
    }

    fn licenses(&self) -> Option<&[String]> {
        self.license.as_deref()
    }
}

impl LockFile {
    /// Locked packages, runtime ones first, optionally followed by dev ones.
    pub fn all_packages(&self, include_dev: bool) -> Vec<&LockedPackage> {
        let dev: &[LockedPackage] = if include_dev { &self.packages_dev } else { &[] };
        self.packages.iter().chain(dev.iter()).collect()
    }
}

pub struct LockParser;

impl LockParser {
    /// Parse a lock file and return structured data
    pub fn parse_lock<P: AsRef<Path>>(path: P) -> Result<LockFile> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(anyhow::anyhow!("lock file not found: {}", path_ref.display()));
        }

        let content = std::fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read lock file: {}", path_ref.display()))?;

        if content.trim().is_empty() {
            return Err(anyhow::anyhow!("lock file is empty: {}", path_ref.display()));
        }

        let lock_file: LockFile = serde_json::from_str(&content)
            .with_context(|| {
                format!("Failed to parse lock file as JSON: {}\nThis might indicate a corrupted or incompatible lock file.", path_ref.display())
            })?;

        if lock_file.packages.is_empty() && lock_file.packages_dev.is_empty() {
            tracing::warn!(path = %path_ref.display(), "lock file contains no packages");
        }

        Ok(lock_file)
    }

    /// Lock file to check: an explicit path, else the lock next to the
    /// manifest, else the nearest one above the current directory.
    pub fn locate(manifest_path: &Path, explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path);
        }

        let sibling = manifest_path.with_extension("lock");
        if sibling.exists() {
            return Ok(sibling);
        }

        Self::find_lock().ok_or_else(|| {
            anyhow::anyhow!(
                "No {} found next to {} or in any parent directory.\n\
                 Install dependencies first, or pass the lock file path explicitly.",
                LOCK_FILE_NAME,
                manifest_path.display()
            )
        })
    }

    /// Find the lock file in the current directory or parent directories
    pub fn find_lock() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_lock_from(&current)
    }

    pub fn find_lock_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let lock_path = current.join(LOCK_FILE_NAME);
            if lock_path.exists() {
                match std::fs::metadata(&lock_path) {
                    Ok(metadata) if metadata.len() > 0 => return Some(lock_path),
                    Ok(_) => {
                        tracing::warn!(path = %lock_path.display(), "found empty lock file, continuing search");
                    }
                    Err(err) => {
                        tracing::warn!(path = %lock_path.display(), error = %err, "cannot read lock file metadata, continuing search");
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};
    use std::io::Write;
    use std::fs;

    const LOCK_CONTENT: &str = r#"{
    "content-hash": "3f1c0e",
    "packages": [
        {
            "name": "acme/http",
            "version": "2.31.0",
            "type": "library",
            "license": ["MIT"]
        },
        {
            "name": "acme/meta",
            "version": "1.0.0",
            "type": "metapackage"
        }
    ],
    "packages-dev": [
        {
            "name": "acme/test-kit",
            "version": "8.1.7",
            "license": ["BSD-3-Clause", "GPL-3.0"]
        }
    ]
}"#;

    #[test]
    fn test_parse_simple_lock() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(LOCK_CONTENT.as_bytes()).unwrap();

        let lock_file = LockParser::parse_lock(temp_file.path()).unwrap();

        assert_eq!(lock_file.content_hash.as_deref(), Some("3f1c0e"));
        assert_eq!(lock_file.packages.len(), 2);
        assert_eq!(lock_file.packages[0].name, "acme/http");
        assert_eq!(lock_file.packages[0].version.as_deref(), Some("2.31.0"));
        assert_eq!(lock_file.packages_dev[0].licenses().unwrap(), ["BSD-3-Clause", "GPL-3.0"]);
    }

    #[test]
    fn test_missing_license_key_means_no_capability() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(LOCK_CONTENT.as_bytes()).unwrap();

        let lock_file = LockParser::parse_lock(temp_file.path()).unwrap();
        assert!(lock_file.packages[1].licenses().is_none());
    }

    #[test]
    fn test_single_string_license() {
        let lock_file: LockFile = serde_json::from_str(
            r#"{"packages": [
                {"name": "acme/solo", "license": "MIT"},
                {"name": "acme/null", "license": null}
            ]}"#,
        )
        .unwrap();

        assert_eq!(lock_file.packages[0].licenses().unwrap(), ["MIT"]);
        assert!(lock_file.packages[1].licenses().is_none());
    }

    #[test]
    fn test_all_packages_dev_toggle() {
        let lock_file: LockFile = serde_json::from_str(LOCK_CONTENT).unwrap();

        let names: Vec<_> = lock_file.all_packages(true).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["acme/http", "acme/meta", "acme/test-kit"]);
        assert_eq!(lock_file.all_packages(false).len(), 2);
    }

    #[test]
    fn test_parse_errors() {
        let temp_dir = TempDir::new().unwrap();

        let missing = LockParser::parse_lock(temp_dir.path().join(LOCK_FILE_NAME));
        assert!(missing.unwrap_err().to_string().contains("not found"));

        let empty_path = temp_dir.path().join("empty.lock");
        fs::write(&empty_path, "  \n").unwrap();
        assert!(LockParser::parse_lock(&empty_path).unwrap_err().to_string().contains("empty"));

        let broken_path = temp_dir.path().join("broken.lock");
        fs::write(&broken_path, "{ not json").unwrap();
        assert!(LockParser::parse_lock(&broken_path).unwrap_err().to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_locate_prefers_explicit_then_sibling() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = temp_dir.path().join("manifest.json");
        let explicit = temp_dir.path().join("other.lock");

        assert_eq!(LockParser::locate(&manifest, Some(explicit.clone())).unwrap(), explicit);

        fs::write(temp_dir.path().join(LOCK_FILE_NAME), LOCK_CONTENT).unwrap();
        assert_eq!(
            LockParser::locate(&manifest, None).unwrap(),
            temp_dir.path().join(LOCK_FILE_NAME)
        );
    }

    #[test]
    fn test_find_lock_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp_dir.path().join(LOCK_FILE_NAME), LOCK_CONTENT).unwrap();

        let found = LockParser::find_lock_from(&nested).unwrap();
        assert_eq!(found, temp_dir.path().join(LOCK_FILE_NAME));
    }

    #[test]
    fn test_find_lock_skips_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("project");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join(LOCK_FILE_NAME), "").unwrap();
        fs::write(temp_dir.path().join(LOCK_FILE_NAME), LOCK_CONTENT).unwrap();

        assert_eq!(
            LockParser::find_lock_from(&nested),
            Some(temp_dir.path().join(LOCK_FILE_NAME))
        );
    }
}
