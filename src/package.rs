use serde::{Deserialize, Serialize};

/// Identifier of this tool's own distribution package.
///
/// Installing or updating this package never triggers a license decision,
/// and its install event is what escalates the lifecycle subscription.
pub const PLUGIN_PACKAGE_NAME: &str = "license-gate/license-gate";

/// Package data as handed over by the host.
///
/// Only some packages carry license metadata. `licenses` returns `None`
/// when the value has no license accessor at all, which is treated the same
/// as declaring zero licenses.
pub trait PackageData {
    /// Canonical (lowercased) package identifier.
    fn name(&self) -> &str;

    /// Display name as written by the package author.
    fn pretty_name(&self) -> &str {
        self.name()
    }

    fn licenses(&self) -> Option<&[String]> {
        None
    }
}

/// A package that only exposes its identity, e.g. a metapackage or an alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarePackage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretty_name: Option<String>,
}

impl BarePackage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pretty_name: None,
        }
    }
}

impl PackageData for BarePackage {
    fn name(&self) -> &str {
        &self.name
    }

    fn pretty_name(&self) -> &str {
        self.pretty_name.as_deref().unwrap_or(&self.name)
    }
}

/// A package with complete metadata, including its declared licenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletePackage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretty_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub license: Vec<String>,
}

impl CompletePackage {
    pub fn new<I, S>(name: impl Into<String>, licenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            pretty_name: None,
            version: None,
            license: licenses.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

impl PackageData for CompletePackage {
    fn name(&self) -> &str {
        &self.name
    }

    fn pretty_name(&self) -> &str {
        self.pretty_name.as_deref().unwrap_or(&self.name)
    }

    fn licenses(&self) -> Option<&[String]> {
        Some(&self.license)
    }
}

/// License facts derived for a single evaluation. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageLicenseFacts {
    pub name: String,
    pub pretty_name: String,
    pub declared_licenses: Vec<String>,
}

impl PackageLicenseFacts {
    pub fn new<I, S>(name: impl Into<String>, declared_licenses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        Self {
            pretty_name: name.clone(),
            name,
            declared_licenses: declared_licenses.into_iter().map(Into::into).collect(),
        }
    }

    /// Derive facts from host package data; a missing license accessor
    /// yields an empty license list.
    pub fn from_package(package: &(impl PackageData + ?Sized)) -> Self {
        Self {
            name: package.name().to_string(),
            pretty_name: package.pretty_name().to_string(),
            declared_licenses: package.licenses().map(<[String]>::to_vec).unwrap_or_default(),
        }
    }

    pub fn is_plugin_package(&self) -> bool {
        self.name == PLUGIN_PACKAGE_NAME
    }

    /// Declared licenses joined for messages, e.g. `MIT, Apache-2.0`.
    pub fn license_list(&self) -> String {
        self.declared_licenses.join(", ")
    }
}
