use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use super::config::PolicyConfig;
use super::engine::{Decision, Verdict};
use crate::package::{PackageData, PackageLicenseFacts};

/// Evaluation result for one locked package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageStatus {
    pub name: String,
    pub version: Option<String>,
    pub licenses: Vec<String>,
    pub verdict: Verdict,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct CheckSummary {
    pub total: usize,
    pub allowed: usize,
    pub warnings: usize,    // AllowedWithWarning
    pub rejected: usize,
    /// Packages per declared license, most common first.
    pub licenses: IndexMap<String, usize>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct LicenseReport {
    pub packages: Vec<PackageStatus>,
    pub summary: CheckSummary,
}

impl LicenseReport {
    pub fn has_rejections(&self) -> bool {
        self.summary.rejected > 0
    }

    pub fn rejected(&self) -> impl Iterator<Item = &PackageStatus> {
        self.packages.iter().filter(|p| p.verdict == Verdict::Rejected)
    }
}

/// Something that can be listed in a report: package data plus a version.
pub trait VersionedPackage: PackageData + Sync {
    fn version(&self) -> Option<&str>;
}

impl VersionedPackage for crate::lock::LockedPackage {
    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl VersionedPackage for crate::package::CompletePackage {
    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl PolicyConfig {
    /// Evaluate every package independently and summarize the outcome.
    ///
    /// The order of `packages` is preserved in the report.
    pub fn check_packages<P: VersionedPackage>(&self, packages: &[&P]) -> LicenseReport {
        let statuses: Vec<PackageStatus> = packages
            .par_iter()
            .map(|package| {
                let Decision { verdict, facts } = self.evaluate(PackageLicenseFacts::from_package(*package));
                PackageStatus {
                    name: facts.pretty_name,
                    version: package.version().map(str::to_string),
                    licenses: facts.declared_licenses,
                    verdict,
                }
            })
            .collect();

        summarize(statuses)
    }
}

fn summarize(packages: Vec<PackageStatus>) -> LicenseReport {
    let count = |verdict: Verdict| packages.iter().filter(|p| p.verdict == verdict).count();
    let allowed = count(Verdict::Allowed);
    let warnings = count(Verdict::AllowedWithWarning);
    let rejected = count(Verdict::Rejected);

    let mut license_counts: IndexMap<String, usize> = IndexMap::new();
    for package in &packages {
        if package.licenses.is_empty() {
            *license_counts.entry("(none)".to_string()).or_insert(0) += 1;
        }
        for license in &package.licenses {
            *license_counts.entry(license.clone()).or_insert(0) += 1;
        }
    }
    // Stable sort keeps first-seen order between equal counts.
    license_counts.sort_by(|_, a, _, b| b.cmp(a));

    LicenseReport {
        summary: CheckSummary {
            total: packages.len(),
            allowed,
            warnings,
            rejected,
            licenses: license_counts,
        },
        packages,
    }
}
