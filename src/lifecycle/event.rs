use std::fmt;
use crate::package::PackageData;

/// Notification kinds a subscriber can register for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Command,
    PostPackageInstall,
    PostPackageUpdate,
    PostPackageUninstall,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Command => "command",
            EventKind::PostPackageInstall => "post-package-install",
            EventKind::PostPackageUpdate => "post-package-update",
            EventKind::PostPackageUninstall => "post-package-uninstall",
        };
        f.write_str(name)
    }
}

/// A command (e.g. `install`, `update`) was started by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEvent {
    pub command_name: String,
}

impl CommandEvent {
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
        }
    }
}

/// The package operation a host performed.
pub enum Operation {
    Install {
        package: Box<dyn PackageData>,
    },
    Update {
        initial: Box<dyn PackageData>,
        target: Box<dyn PackageData>,
    },
    Uninstall {
        package: Box<dyn PackageData>,
    },
}

impl Operation {
    pub fn operation_type(&self) -> &'static str {
        match self {
            Operation::Install { .. } => "install",
            Operation::Update { .. } => "update",
            Operation::Uninstall { .. } => "uninstall",
        }
    }

    /// The notification this operation is announced with.
    pub fn event_kind(&self) -> EventKind {
        match self {
            Operation::Install { .. } => EventKind::PostPackageInstall,
            Operation::Update { .. } => EventKind::PostPackageUpdate,
            Operation::Uninstall { .. } => EventKind::PostPackageUninstall,
        }
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Install { package } | Operation::Uninstall { package } => f
                .debug_struct(self.operation_type())
                .field("package", &package.pretty_name())
                .finish(),
            Operation::Update { initial, target } => f
                .debug_struct(self.operation_type())
                .field("initial", &initial.pretty_name())
                .field("target", &target.pretty_name())
                .finish(),
        }
    }
}

#[derive(Debug)]
pub struct PackageEvent {
    pub operation: Operation,
}

impl PackageEvent {
    pub fn new(operation: Operation) -> Self {
        Self { operation }
    }

    pub fn install(package: impl PackageData + 'static) -> Self {
        Self::new(Operation::Install {
            package: Box::new(package),
        })
    }

    pub fn update(initial: impl PackageData + 'static, target: impl PackageData + 'static) -> Self {
        Self::new(Operation::Update {
            initial: Box::new(initial),
            target: Box::new(target),
        })
    }

    pub fn uninstall(package: impl PackageData + 'static) -> Self {
        Self::new(Operation::Uninstall {
            package: Box::new(package),
        })
    }

    pub fn kind(&self) -> EventKind {
        self.operation.event_kind()
    }
}

/// Anything the bus can deliver.
#[derive(Debug)]
pub enum Event {
    Command(CommandEvent),
    Package(PackageEvent),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Command(_) => EventKind::Command,
            Event::Package(event) => event.kind(),
        }
    }
}

impl From<CommandEvent> for Event {
    fn from(event: CommandEvent) -> Self {
        Event::Command(event)
    }
}

impl From<PackageEvent> for Event {
    fn from(event: PackageEvent) -> Self {
        Event::Package(event)
    }
}
