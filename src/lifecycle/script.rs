//! Scripted lifecycle notifications, for driving the gate outside a host.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::rc::Rc;
use super::adapter::LicenseGate;
use super::bus::EventBus;
use super::event::{CommandEvent, Event, Operation, PackageEvent};
use super::io::Diagnostics;
use crate::package::{BarePackage, CompletePackage, PackageData};

#[derive(Debug, Clone, Deserialize)]
pub struct EventScript {
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default)]
    pub operations: Vec<ScriptOperation>,
}

fn default_command() -> String {
    "install".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScriptOperation {
    Install { package: ScriptPackage },
    Update { initial: ScriptPackage, target: ScriptPackage },
    Uninstall { package: ScriptPackage },
}

/// A package as written in a script. Omitting `license` models a package
/// without license metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptPackage {
    pub name: String,
    #[serde(rename = "pretty-name")]
    pub pretty_name: Option<String>,
    pub version: Option<String>,
    pub license: Option<Vec<String>>,
}

impl ScriptPackage {
    fn into_package(self) -> Box<dyn PackageData> {
        match self.license {
            Some(license) => Box::new(CompletePackage {
                name: self.name,
                pretty_name: self.pretty_name,
                version: self.version,
                license,
            }),
            None => Box::new(BarePackage {
                name: self.name,
                pretty_name: self.pretty_name,
            }),
        }
    }
}

impl From<ScriptOperation> for Operation {
    fn from(operation: ScriptOperation) -> Self {
        match operation {
            ScriptOperation::Install { package } => Operation::Install {
                package: package.into_package(),
            },
            ScriptOperation::Update { initial, target } => Operation::Update {
                initial: initial.into_package(),
                target: target.into_package(),
            },
            ScriptOperation::Uninstall { package } => Operation::Uninstall {
                package: package.into_package(),
            },
        }
    }
}

impl EventScript {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event script: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse event script: {}", path.display()))
    }

    /// Activate a gate on a fresh bus and dispatch the command event
    /// followed by every operation in order. Stops at the first violation.
    ///
    /// Returns the number of package operations dispatched.
    pub fn run(self, config: &Value, io: Rc<dyn Diagnostics>) -> crate::error::Result<usize> {
        let bus = EventBus::new();
        let _gate = LicenseGate::activate(config, io, &bus);

        bus.dispatch(&Event::Command(CommandEvent::new(self.command)))?;

        let mut dispatched = 0;
        for operation in self.operations {
            bus.dispatch(&Event::Package(PackageEvent::new(operation.into())))?;
            dispatched += 1;
        }

        Ok(dispatched)
    }
}
