pub mod error;
pub mod package;
pub mod policy;
pub mod lifecycle;
pub mod lock;
pub mod config;
pub mod init;
pub mod output;

// Re-export main types for easy access
pub use error::LicenseGateError;
pub use package::{PackageData, PackageLicenseFacts, PLUGIN_PACKAGE_NAME};
pub use policy::{Decision, LicenseReport, PolicyConfig, Verdict};
pub use lifecycle::{EventBus, LicenseGate};
