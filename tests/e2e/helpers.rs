use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

pub struct TestProject {
    pub dir: TempDir,
    pub binary_path: String,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let binary_path = env!("CARGO_BIN_EXE_license-gate").to_string();

        Self { dir, binary_path }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.path().join(file)
    }

    pub fn write(&self, file: &str, content: &str) {
        fs::write(self.path(file), content).expect("Failed to write fixture");
    }

    pub fn read(&self, file: &str) -> String {
        fs::read_to_string(self.path(file)).expect("Failed to read fixture")
    }

    /// Write `manifest.json` with the given policy section.
    pub fn write_manifest(&self, policy: &str) {
        self.write(
            "manifest.json",
            &format!(
                r#"{{
    "name": "acme/app",
    "extra": {{
        "license-gate/license-gate": {}
    }}
}}"#,
                policy
            ),
        );
    }

    /// Write `manifest.lock` with `(name, licenses)` runtime packages.
    pub fn write_lock(&self, packages: &[(&str, &[&str])]) {
        let entries: Vec<String> = packages
            .iter()
            .map(|(name, licenses)| {
                let licenses: Vec<String> = licenses.iter().map(|l| format!("\"{}\"", l)).collect();
                format!(
                    r#"{{"name": "{}", "version": "1.0.0", "license": [{}]}}"#,
                    name,
                    licenses.join(", ")
                )
            })
            .collect();
        self.write(
            "manifest.lock",
            &format!(r#"{{"packages": [{}], "packages-dev": []}}"#, entries.join(", ")),
        );
    }

    pub fn run(&self, args: &[&str]) -> std::process::Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.dir.path())
            .env_remove("LICENSE_GATE_LOG")
            .output()
            .expect("Failed to run license-gate")
    }
}
