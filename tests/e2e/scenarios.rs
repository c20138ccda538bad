use super::helpers::TestProject;

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_check_passes_without_policy() {
    let project = TestProject::new();
    project.write("manifest.json", r#"{"name": "acme/app"}"#);
    project.write_lock(&[("acme/http", &["MIT"]), ("acme/gpl-lib", &["GPL-3.0"])]);

    let output = project.run(&["check"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("License Summary (2 packages)"));
    assert!(stderr(&output).contains("No license policy configured"));
}

#[test]
fn test_check_rejects_denied_license() {
    let project = TestProject::new();
    project.write_manifest(r#"{"blacklist": ["GPL-3.0"]}"#);
    project.write_lock(&[("acme/http", &["MIT"]), ("acme/gpl-lib", &["GPL-3.0"])]);

    let output = project.run(&["check"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("acme/gpl-lib"));
    assert!(stderr(&output).contains("Licenses \"GPL-3.0\" of package \"acme/gpl-lib\""));
}

#[test]
fn test_check_exit_zero_and_json() {
    let project = TestProject::new();
    project.write_manifest(r#"{"whitelist": ["MIT", "BSD-3-Clause"]}"#);
    project.write_lock(&[("acme/http", &["MIT"]), ("acme/apache", &["Apache-2.0"])]);

    let output = project.run(&["check", "--format", "json", "--exit-zero"]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["summary"]["rejected"], 1);
    assert_eq!(report["packages"][1]["name"], "acme/apache");
    assert_eq!(report["packages"][1]["verdict"], "rejected");
}

#[test]
fn test_check_whitelisted_package_passes() {
    let project = TestProject::new();
    project.write_manifest(
        r#"{"whitelist": ["MIT"], "blacklist": ["GPL-3.0"], "whitelisted-packages": ["acme/gpl-lib"]}"#,
    );
    project.write_lock(&[("acme/gpl-lib", &["GPL-3.0"])]);

    let output = project.run(&["check"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("Whitelisted"));
}

#[test]
fn test_replay_rejects_install() {
    let project = TestProject::new();
    project.write_manifest(r#"{"blacklist": ["GPL-3.0"]}"#);
    project.write(
        "events.json",
        r#"{
    "command": "install",
    "operations": [
        {"type": "install", "package": {"name": "acme/http", "license": ["MIT"]}},
        {"type": "install", "package": {"name": "acme/gpl-lib", "license": ["GPL-3.0"]}}
    ]
}"#,
    );

    let output = project.run(&["replay", "events.json"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(
        "ERROR: Licenses \"GPL-3.0\" of package \"acme/gpl-lib\" are not allowed to be used in the project. Installation failed."
    ));
}

#[test]
fn test_replay_update_checks_target_and_warns() {
    let project = TestProject::new();
    project.write_manifest(r#"{"blacklist": ["GPL-3.0"], "whitelisted-packages": ["acme/legacy"]}"#);
    project.write(
        "events.json",
        r#"{
    "command": "update",
    "operations": [
        {"type": "update", "initial": {"name": "acme/lib", "license": ["GPL-3.0"]}, "target": {"name": "acme/lib", "license": ["MIT"]}},
        {"type": "install", "package": {"name": "acme/legacy", "license": ["GPL-3.0"]}},
        {"type": "uninstall", "package": {"name": "acme/old", "license": ["GPL-3.0"]}}
    ]
}"#,
    );

    let output = project.run(&["replay", "events.json"]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("WARNING: Licenses \"GPL-3.0\" of package \"acme/legacy\""));
    assert!(stdout(&output).contains("3 package operations passed"));
}

#[test]
fn test_replay_verbose_announces_plugin() {
    let project = TestProject::new();
    project.write_manifest(r#"{}"#);
    project.write(
        "events.json",
        r#"{"command": "install", "operations": [{"type": "install", "package": {"name": "license-gate/license-gate", "license": ["MIT"]}}]}"#,
    );

    let quiet_run = project.run(&["replay", "events.json"]);
    assert!(!stderr(&quiet_run).contains("has been enabled"));

    let verbose_run = project.run(&["--verbose", "replay", "events.json"]);
    assert!(verbose_run.status.success());
    assert!(stderr(&verbose_run).contains("The license-gate plugin has been enabled."));
}

#[test]
fn test_init_then_fix() {
    let project = TestProject::new();
    project.write("manifest.json", r#"{"name": "acme/app"}"#);
    project.write_lock(&[("acme/http", &["MIT"]), ("acme/agpl-lib", &["AGPL-3.0-only"])]);

    let init_output = project.run(&["init", "red"]);
    assert!(init_output.status.success(), "{}", stderr(&init_output));

    let dry_run = project.run(&["fix", "--dry-run"]);
    assert!(dry_run.status.success());
    assert!(stdout(&dry_run).contains("Would whitelist 1 packages"));
    assert!(!project.read("manifest.json").contains("acme/agpl-lib"));

    let fix_output = project.run(&["fix"]);
    assert!(fix_output.status.success(), "{}", stderr(&fix_output));
    assert!(project.read("manifest.json").contains("acme/agpl-lib"));

    let check_output = project.run(&["check"]);
    assert!(check_output.status.success(), "{}", stderr(&check_output));
}

#[test]
fn test_config_show_and_validate() {
    let project = TestProject::new();
    project.write_manifest(r#"{"whitelist": ["MIT", 5], "blacklist": "GPL-3.0"}"#);

    let show = project.run(&["config", "--show"]);
    assert!(show.status.success());
    let shown: serde_json::Value = serde_json::from_str(&stdout(&show)).unwrap();
    assert_eq!(shown["whitelist"], serde_json::json!(["MIT"]));
    assert_eq!(shown["blacklist"], serde_json::json!([]));

    let validate = project.run(&["config", "--validate"]);
    assert_eq!(validate.status.code(), Some(1));
    assert!(stderr(&validate).contains("whitelist[1]"));
    assert!(stderr(&validate).contains("blacklist"));
}

#[test]
fn test_global_options() {
    let project = TestProject::new();
    project.write("manifest.json", r#"{"name": "acme/app"}"#);

    let quiet_output = project.run(&["--quiet", "init", "green"]);
    assert!(quiet_output.status.success());
    assert!(stdout(&quiet_output).is_empty());

    let validate_output = project.run(&["config", "--validate"]);
    assert!(validate_output.status.success());
}
