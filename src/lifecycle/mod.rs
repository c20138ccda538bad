pub mod adapter;
pub mod bus;
pub mod event;
pub mod io;
pub mod script;

pub use adapter::{LicenseGate, SubscriptionState, ENABLED_MESSAGE};
pub use bus::{EventBus, EventSubscriber};
pub use event::{CommandEvent, Event, EventKind, Operation, PackageEvent};
pub use io::{BufferIo, ConsoleIo, Diagnostics, Severity};
pub use script::EventScript;
