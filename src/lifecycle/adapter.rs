use std::cell::Cell;
use std::rc::{Rc, Weak};
use serde_json::Value;
use super::bus::{EventBus, EventSubscriber};
use super::event::{CommandEvent, Event, EventKind, Operation, PackageEvent};
use super::io::{Diagnostics, Severity};
use crate::error::{LicenseGateError, Result};
use crate::package::{PackageLicenseFacts, PLUGIN_PACKAGE_NAME};
use crate::policy::{PolicyConfig, Verdict};

pub const ENABLED_MESSAGE: &str = "The license-gate plugin has been enabled.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    /// Registered at activation.
    Base,
    /// Re-registered after seeing its own package being installed.
    Escalated,
}

/// Bridges host lifecycle notifications to the license policy.
pub struct LicenseGate {
    config: PolicyConfig,
    io: Rc<dyn Diagnostics>,
    bus: Weak<EventBus>,
    me: Weak<LicenseGate>,
    state: Cell<SubscriptionState>,
}

impl LicenseGate {
    /// Build the policy from the decoded configuration and subscribe to
    /// command and package notifications on `bus`.
    pub fn activate(config: &Value, io: Rc<dyn Diagnostics>, bus: &Rc<EventBus>) -> Rc<Self> {
        Self::with_policy(PolicyConfig::from_value(config), io, bus)
    }

    pub fn with_policy(config: PolicyConfig, io: Rc<dyn Diagnostics>, bus: &Rc<EventBus>) -> Rc<Self> {
        let gate = Rc::new_cyclic(|me| LicenseGate {
            config,
            io,
            bus: Rc::downgrade(bus),
            me: me.clone(),
            state: Cell::new(SubscriptionState::Base),
        });
        bus.add_subscriber(gate.clone());
        tracing::debug!(
            allow = gate.config.allow_list().len(),
            deny = gate.config.deny_list().len(),
            exempt = gate.config.exempt_packages().len(),
            "license gate activated"
        );
        gate
    }

    pub fn state(&self) -> SubscriptionState {
        self.state.get()
    }

    pub fn handle_command(&self, event: &CommandEvent) {
        if !matches!(event.command_name.as_str(), "install" | "update") {
            return;
        }
        if !self.io.is_verbose() {
            return;
        }

        self.io.write_error(Severity::Info, ENABLED_MESSAGE);
    }

    pub fn handle_package_event(&self, event: &PackageEvent) -> Result<()> {
        let package = match &event.operation {
            Operation::Install { package } => {
                if package.name() == PLUGIN_PACKAGE_NAME {
                    self.escalate();
                    return Ok(());
                }
                package
            }
            Operation::Update { target, .. } => target,
            Operation::Uninstall { .. } => return Ok(()),
        };

        let decision = self.config.evaluate(PackageLicenseFacts::from_package(&**package));
        let facts = &decision.facts;

        match decision.verdict {
            Verdict::Allowed => Ok(()),
            Verdict::AllowedWithWarning => {
                self.io.write_error(
                    Severity::Warning,
                    &format!(
                        "WARNING: Licenses \"{}\" of package \"{}\" are not allowed to be used in the project but the package has been whitelisted.",
                        facts.license_list(),
                        facts.pretty_name
                    ),
                );
                Ok(())
            }
            Verdict::Rejected => Err(LicenseGateError::LicenseNotAllowed {
                licenses: facts.declared_licenses.clone(),
                package: facts.pretty_name.clone(),
            }),
        }
    }

    fn escalate(&self) {
        if let (Some(bus), Some(me)) = (self.bus.upgrade(), self.me.upgrade()) {
            let added = bus.add_subscriber(me);
            tracing::debug!(added, "license gate re-subscribed after installing itself");
        }
        self.state.set(SubscriptionState::Escalated);

        if self.io.is_verbose() {
            self.io.write_error(Severity::Info, ENABLED_MESSAGE);
        }
    }
}

impl EventSubscriber for LicenseGate {
    fn subscribed_events(&self) -> Vec<EventKind> {
        vec![
            EventKind::Command,
            EventKind::PostPackageInstall,
            EventKind::PostPackageUpdate,
        ]
    }

    fn handle(&self, event: &Event) -> Result<()> {
        match event {
            Event::Command(command) => {
                self.handle_command(command);
                Ok(())
            }
            Event::Package(package) => self.handle_package_event(package),
        }
    }
}
