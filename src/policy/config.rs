use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const WHITELIST_KEY: &str = "whitelist";
pub const BLACKLIST_KEY: &str = "blacklist";
pub const WHITELISTED_PACKAGES_KEY: &str = "whitelisted-packages";

/// License policy: allow-list, deny-list and packages exempt from rejection.
///
/// Built once from the decoded configuration and never mutated afterwards.
/// Empty lists mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(rename = "whitelist", default)]
    allow_list: IndexSet<String>,
    #[serde(rename = "blacklist", default)]
    deny_list: IndexSet<String>,
    #[serde(rename = "whitelisted-packages", default)]
    exempt_packages: IndexMap<String, Value>,
}

/// Something `PolicyConfig::from_value` dropped while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigIssue {
    pub key: String,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

impl PolicyConfig {
    pub fn new<A, D, E>(allow_list: A, deny_list: D, exempt_packages: E) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            allow_list: allow_list.into_iter().map(Into::into).collect(),
            deny_list: deny_list.into_iter().map(Into::into).collect(),
            exempt_packages: exempt_packages
                .into_iter()
                .map(|name| (name.into(), Value::Null))
                .collect(),
        }
    }

    /// Normalize loosely typed configuration. Never fails: anything of the
    /// wrong shape is dropped.
    pub fn from_value(value: &Value) -> Self {
        Self {
            allow_list: string_set(value.get(WHITELIST_KEY)),
            deny_list: string_set(value.get(BLACKLIST_KEY)),
            exempt_packages: package_map(value.get(WHITELISTED_PACKAGES_KEY)),
        }
    }

    /// List what `from_value` would silently drop from `value`.
    pub fn lint(value: &Value) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let Some(table) = value.as_object() else {
            if !value.is_null() {
                issues.push(ConfigIssue {
                    key: "(root)".to_string(),
                    message: format!("expected an object, found {}", kind_of(value)),
                });
            }
            return issues;
        };

        for key in [WHITELIST_KEY, BLACKLIST_KEY] {
            match table.get(key) {
                None => {}
                Some(Value::Array(items)) => {
                    for (index, item) in items.iter().enumerate() {
                        if !item.is_string() {
                            issues.push(ConfigIssue {
                                key: format!("{}[{}]", key, index),
                                message: format!("expected a license identifier string, found {}", kind_of(item)),
                            });
                        }
                    }
                }
                Some(other) => issues.push(ConfigIssue {
                    key: key.to_string(),
                    message: format!("expected a list of license identifiers, found {}", kind_of(other)),
                }),
            }
        }

        match table.get(WHITELISTED_PACKAGES_KEY) {
            None | Some(Value::Object(_)) => {}
            Some(Value::Array(items)) => {
                for (index, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        issues.push(ConfigIssue {
                            key: format!("{}[{}]", WHITELISTED_PACKAGES_KEY, index),
                            message: format!("expected a package name string, found {}", kind_of(item)),
                        });
                    }
                }
            }
            Some(other) => issues.push(ConfigIssue {
                key: WHITELISTED_PACKAGES_KEY.to_string(),
                message: format!("expected a list or map of package names, found {}", kind_of(other)),
            }),
        }

        for key in table.keys() {
            if ![WHITELIST_KEY, BLACKLIST_KEY, WHITELISTED_PACKAGES_KEY].contains(&key.as_str()) {
                issues.push(ConfigIssue {
                    key: key.clone(),
                    message: "unknown option, ignored".to_string(),
                });
            }
        }

        issues
    }

    pub fn allow_list(&self) -> &IndexSet<String> {
        &self.allow_list
    }

    pub fn deny_list(&self) -> &IndexSet<String> {
        &self.deny_list
    }

    pub fn exempt_packages(&self) -> &IndexMap<String, Value> {
        &self.exempt_packages
    }

    /// True when at least one of the two lists is configured.
    pub fn has_constraints(&self) -> bool {
        !self.allow_list.is_empty() || !self.deny_list.is_empty()
    }
}

fn string_set(value: Option<&Value>) -> IndexSet<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => IndexSet::new(),
    }
}

fn package_map(value: Option<&Value>) -> IndexMap<String, Value> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(|name| (name.to_string(), Value::Null)))
            .collect(),
        Some(Value::Object(entries)) => entries
            .iter()
            .map(|(name, meta)| (name.clone(), meta.clone()))
            .collect(),
        _ => IndexMap::new(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
