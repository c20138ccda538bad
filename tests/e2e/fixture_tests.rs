use super::helpers::TestProject;

const MANIFEST: &str = r#"{
    "name": "acme/shop",
    "require": {
        "acme/http": "^2.0",
        "acme/pdf": "^1.4",
        "acme/meta": "^1.0"
    },
    "require-dev": {
        "acme/test-kit": "^8.1"
    },
    "extra": {
        "license-gate/license-gate": {
            "whitelist": ["MIT", "BSD-3-Clause", "Apache-2.0"],
            "blacklist": ["GPL-3.0-only", "AGPL-3.0-only"],
            "whitelisted-packages": {
                "acme/pdf": "1.4.*"
            }
        }
    }
}
"#;

const LOCK: &str = r#"{
    "content-hash": "8d1c4a",
    "packages": [
        {"name": "acme/http", "version": "2.3.1", "type": "library", "license": ["MIT"]},
        {"name": "acme/pdf", "version": "1.4.2", "type": "library", "license": ["AGPL-3.0-only"]},
        {"name": "license-gate/license-gate", "version": "0.1.0", "type": "plugin", "license": ["GPL-3.0-only"]}
    ],
    "packages-dev": [
        {"name": "acme/test-kit", "version": "8.1.7", "type": "library", "license": ["GPL-3.0-only", "MIT"]},
        {"name": "acme/meta", "version": "1.0.0", "type": "metapackage"}
    ]
}
"#;

#[test]
fn test_with_preconfigured_project() {
    let project = TestProject::new();
    project.write("manifest.json", MANIFEST);
    project.write("manifest.lock", LOCK);

    // Runtime packages only: http allowed, pdf whitelisted, own package allowed.
    let runtime = project.run(&["check", "--no-dev", "--format", "json"]);
    if !runtime.status.success() {
        eprintln!("STDOUT: {}", String::from_utf8_lossy(&runtime.stdout));
        eprintln!("STDERR: {}", String::from_utf8_lossy(&runtime.stderr));
    }
    assert!(runtime.status.success());

    let report: serde_json::Value = serde_json::from_slice(&runtime.stdout).unwrap();
    assert_eq!(report["summary"]["total"], 3);
    assert_eq!(report["summary"]["allowed"], 2);
    assert_eq!(report["summary"]["warnings"], 1);

    // Dev packages: test-kit is denied, the metapackage declares nothing.
    let all = project.run(&["check", "--format", "json"]);
    assert_eq!(all.status.code(), Some(2));

    let report: serde_json::Value = serde_json::from_slice(&all.stdout).unwrap();
    assert_eq!(report["summary"]["rejected"], 2);
    assert_eq!(report["packages"][4]["name"], "acme/meta");
    assert_eq!(report["packages"][4]["licenses"], serde_json::json!([]));
}
