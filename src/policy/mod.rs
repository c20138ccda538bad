pub mod config;
pub mod engine;
pub mod checker;

// Re-export main types
pub use config::{ConfigIssue, PolicyConfig};
pub use engine::{Decision, Verdict};
pub use checker::{CheckSummary, LicenseReport, PackageStatus, VersionedPackage};
