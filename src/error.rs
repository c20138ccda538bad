use thiserror::Error;

/// Failures raised by the license gate itself.
///
/// Anything that goes wrong while reading manifests or lock files is an
/// `anyhow::Error` in the command layer; this type is reserved for policy
/// outcomes the host has to treat as fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LicenseGateError {
    #[error("ERROR: Licenses \"{}\" of package \"{package}\" are not allowed to be used in the project. Installation failed.", .licenses.join(", "))]
    LicenseNotAllowed {
        licenses: Vec<String>,
        package: String,
    },
}

pub type Result<T> = std::result::Result<T, LicenseGateError>;
