use serde::{Deserialize, Serialize};
use super::config::PolicyConfig;
use crate::package::PackageLicenseFacts;

/// Outcome of evaluating one package against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    Allowed,
    AllowedWithWarning,
    Rejected,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Allowed => "allowed",
            Verdict::AllowedWithWarning => "allowed-with-warning",
            Verdict::Rejected => "rejected",
        }
    }
}

/// A verdict together with the facts it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub verdict: Verdict,
    #[serde(flatten)]
    pub facts: PackageLicenseFacts,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self.verdict, Verdict::Allowed)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self.verdict, Verdict::Rejected)
    }
}

impl PolicyConfig {
    /// Decide whether a package may be used.
    ///
    /// The deny-list is checked first and vetoes outright; the allow-list is
    /// only consulted when the deny-list did not match, and then requires at
    /// least one declared license to be on it. A license on both lists is
    /// therefore rejected. Exempt packages turn a rejection into a warning.
    pub fn evaluate(&self, facts: PackageLicenseFacts) -> Decision {
        if facts.is_plugin_package() {
            return Decision {
                verdict: Verdict::Allowed,
                facts,
            };
        }

        let mut allowed_to_use = true;
        if !self.deny_list().is_empty() {
            allowed_to_use = self.denied_licenses(&facts.declared_licenses).is_empty();
        }
        if allowed_to_use && !self.allow_list().is_empty() {
            allowed_to_use = facts
                .declared_licenses
                .iter()
                .any(|license| self.allow_list().contains(license));
        }

        let verdict = if allowed_to_use {
            Verdict::Allowed
        } else if self.is_exempt(&facts) {
            Verdict::AllowedWithWarning
        } else {
            Verdict::Rejected
        };

        tracing::debug!(
            package = %facts.name,
            licenses = %facts.license_list(),
            verdict = verdict.as_str(),
            "evaluated license policy"
        );

        Decision { verdict, facts }
    }

    /// Declared licenses that appear on the deny-list, in declaration order.
    pub fn denied_licenses<'a>(&self, declared: &'a [String]) -> Vec<&'a str> {
        declared
            .iter()
            .filter(|license| self.deny_list().contains(license.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Exemption is keyed by package name; the display name is accepted too.
    pub fn is_exempt(&self, facts: &PackageLicenseFacts) -> bool {
        self.exempt_packages().contains_key(&facts.pretty_name)
            || self.exempt_packages().contains_key(&facts.name)
    }
}
