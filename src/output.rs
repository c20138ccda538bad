use crate::policy::{LicenseReport, PackageStatus, Verdict};

pub fn format_table_output(report: &LicenseReport, verbose: bool) -> String {
    let mut output = String::new();

    let summary = &report.summary;
    output.push_str(&format!("📦 License Summary ({} packages)\n", summary.total));
    output.push_str(&format!("✅ {} allowed  ⚠️ {} whitelisted  🚫 {} rejected\n\n",
                             summary.allowed, summary.warnings, summary.rejected));

    if verbose {
        output.push_str("📦 All Packages:\n");
        output.push_str(&format_package_table(report.packages.iter()));

        if !summary.licenses.is_empty() {
            output.push_str("\n📄 Licenses:\n");
            for (license, count) in &summary.licenses {
                output.push_str(&format!("  {:<20} {}\n", license, count));
            }
        }
    } else {
        let issues: Vec<&PackageStatus> = report.packages.iter()
            .filter(|p| p.verdict != Verdict::Allowed)
            .collect();

        if !issues.is_empty() {
            output.push_str("⚠️  Issues Found:\n");
            output.push_str(&format_package_table(issues.iter().copied()));
        } else {
            output.push_str("✅ No issues found!\n");
        }

        if report.packages.len() > issues.len() {
            output.push_str(&format!("\n💡 Run with --verbose to see all {} packages\n",
                                   report.packages.len()));
        }
    }

    output
}

fn format_package_table<'a>(packages: impl Iterator<Item = &'a PackageStatus>) -> String {
    let packages: Vec<&PackageStatus> = packages.collect();
    if packages.is_empty() {
        return "No packages found.\n".to_string();
    }

    let mut output = String::new();

    output.push_str("┌───────────────────────┬─────────┬─────────────────┬─────────────┐\n");
    output.push_str("│ Package               │ Version │ License         │ Status      │\n");
    output.push_str("├───────────────────────┼─────────┼─────────────────┼─────────────┤\n");

    for package in packages {
        let name = truncate(&package.name, 21);
        let version = truncate(package.version.as_deref().unwrap_or("unknown"), 7);
        let license = if package.licenses.is_empty() {
            "(none)".to_string()
        } else {
            truncate(&package.licenses.join(", "), 15)
        };
        let status = status_label(package.verdict);

        output.push_str(&format!("│ {:<21} │ {:<7} │ {:<15} │ {:<11} │\n",
                               name, version, license, status));
    }

    output.push_str("└───────────────────────┴─────────┴─────────────────┴─────────────┘\n");

    output
}

fn status_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Allowed => "OK",
        Verdict::AllowedWithWarning => "Whitelisted",
        Verdict::Rejected => "Rejected",
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 1).collect();
        format!("{}…", kept)
    }
}
