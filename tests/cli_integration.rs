//! CLI integration tests for Stevedore.
//!
//! These tests drive the binary against descriptors written to temporary
//! directories and check output, written plans and exit codes.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const SCENARIO_A: &str = r#"
[toolchain]
compile-target = 35
min-supported = 23
target = 35
native-toolchain = "27.0.12077973"
language-level = "11"

[[plugins]]
name = "analytics"
required-min-toolchain = 21

[identity]
canonical = "com.example.app"
effective = "com.example.legacyapp"

[version]
code = 7
name = "1.2.0"

[[variants]]
name = "debug"
signing = "debug"

[[variants]]
name = "staging"

[[variants]]
name = "release"
signing = "release-key"
"#;

const PROJECT_CONFIG: &str = r#"
[signing.identities.release-key]
keystore = "keys/release.jks"
alias = "upload"
"#;

/// Get the stevedore binary command, isolated from the user's home config.
fn stevedore(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stevedore").unwrap();
    cmd.env("STEVEDORE_HOME", home.join(".stevedore-home"));
    cmd
}

/// Create a project directory with a descriptor and signing config.
fn project(descriptor: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Stevedore.toml"), descriptor).unwrap();
    fs::create_dir_all(tmp.path().join(".stevedore")).unwrap();
    fs::write(tmp.path().join(".stevedore/config.toml"), PROJECT_CONFIG).unwrap();
    tmp
}

// ============================================================================
// stevedore resolve
// ============================================================================

#[test]
fn test_resolve_emits_plan_to_stdout() {
    let tmp = project(SCENARIO_A);

    stevedore(tmp.path())
        .args(["resolve", "--variant", "release"])
        .current_dir(tmp.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"effective\": \"com.example.legacyapp\""))
        .stdout(predicate::str::contains("\"activation_order\""))
        .stderr(predicate::str::contains(
            "warning: publishing as `com.example.legacyapp` instead of canonical `com.example.app`",
        ));
}

#[test]
fn test_resolve_is_deterministic() {
    let tmp = project(SCENARIO_A);

    let run = || {
        stevedore(tmp.path())
            .args(["resolve"])
            .current_dir(tmp.path())
            .output()
            .unwrap()
            .stdout
    };

    let first = run();
    assert!(!first.is_empty());
    assert_eq!(first, run());
}

#[test]
fn test_resolve_writes_output_file() {
    let tmp = project(SCENARIO_A);

    stevedore(tmp.path())
        .args(["resolve", "--compact", "-o", "out/release.json"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(tmp.path().join("out/release.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["schema"], 1);
    assert_eq!(value["plan"]["variant"]["name"], "release");
    assert_eq!(value["plan"]["version"]["code"], 7);
    assert_eq!(value["activation_order"], serde_json::json!(["analytics"]));
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_resolve_all_writes_one_plan_per_variant() {
    let tmp = project(SCENARIO_A);

    stevedore(tmp.path())
        .args(["resolve", "--all", "--output", "plans"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "variant `staging` inherits signing identity `debug` from `debug`",
        ));

    for variant in ["debug", "staging", "release"] {
        let path = tmp.path().join("plans").join(format!("{}.plan.json", variant));
        assert!(path.exists(), "missing plan for {}", variant);
    }
}

#[test]
fn test_resolve_all_requires_output() {
    let tmp = project(SCENARIO_A);

    stevedore(tmp.path())
        .args(["resolve", "--all"])
        .current_dir(tmp.path())
        .assert()
        .failure();
}

#[test]
fn test_resolve_with_explicit_manifest() {
    let tmp = project(SCENARIO_A);
    let elsewhere = TempDir::new().unwrap();

    stevedore(tmp.path())
        .arg("--manifest")
        .arg(tmp.path().join("Stevedore.toml"))
        .args(["resolve", "--variant", "debug"])
        .current_dir(elsewhere.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"debug\""));
}

// ============================================================================
// Rejections (exit 1)
// ============================================================================

#[test]
fn test_unsatisfied_plugin_rejected() {
    let descriptor = r#"
[toolchain]
compile-target = 25
min-supported = 21
target = 25

[[plugins]]
name = "analytics"
required-min-toolchain = 21

[[plugins]]
name = "push"
required-min-toolchain = 30

[identity]
canonical = "com.example.app"

[[variants]]
name = "release"
signing = "release-key"
"#;
    let tmp = project(descriptor);

    stevedore(tmp.path())
        .args(["resolve"])
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "error: plugin `push` requires toolchain 30 but compile-target is 25 (base)",
        ))
        .stderr(predicate::str::contains("plugin `analytics`").not())
        .stderr(predicate::str::contains("error: could not resolve `release`"));
}

#[test]
fn test_missing_canonical_identity_rejected() {
    let descriptor = SCENARIO_A.replace(
        "canonical = \"com.example.app\"",
        "canonical = \"\"",
    );
    let tmp = project(&descriptor);

    stevedore(tmp.path())
        .args(["resolve"])
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error: canonical identity is empty"));
}

#[test]
fn test_unknown_signing_identity_rejected() {
    let tmp = project(SCENARIO_A);
    fs::remove_file(tmp.path().join(".stevedore/config.toml")).unwrap();

    stevedore(tmp.path())
        .args(["resolve"])
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("signing identity `release-key` not found"));
}

#[test]
fn test_every_error_reported() {
    let descriptor = r#"
[toolchain]
compile-target = 23
min-supported = 26
target = 24

[[plugins]]
name = "push"
required-min-toolchain = 30

[identity]
canonical = ""
effective = "com.example.legacyapp"

[[variants]]
name = "release"
signing = "nowhere"
"#;
    let tmp = project(descriptor);

    let output = stevedore(tmp.path())
        .args(["resolve"])
        .current_dir(tmp.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    let errors: Vec<_> = stderr.lines().filter(|l| l.starts_with("error: ")).collect();
    // version range, plugin, signing, canonical identity, summary
    assert_eq!(errors.len(), 5, "{}", stderr);
}

// ============================================================================
// Malformed input (exit 2)
// ============================================================================

#[test]
fn test_duplicate_plugin_is_input_error() {
    let descriptor = SCENARIO_A.replace(
        "[identity]",
        "[[plugins]]\nname = \"analytics\"\nrequired-min-toolchain = 23\n\n[identity]",
    );
    let tmp = project(&descriptor);

    stevedore(tmp.path())
        .args(["resolve"])
        .current_dir(tmp.path())
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("plugin `analytics` is already registered"));
}

#[test]
fn test_empty_plugin_name_is_input_error() {
    let descriptor = SCENARIO_A.replace(
        "[identity]",
        "[[plugins]]\nname = \"\"\nrequired-min-toolchain = 23\n\n[identity]",
    );
    let tmp = project(&descriptor);

    stevedore(tmp.path())
        .args(["resolve"])
        .current_dir(tmp.path())
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("plugins entry 2 has an empty name"));
}

#[test]
fn test_unknown_variant_is_input_error() {
    let tmp = project(SCENARIO_A);

    stevedore(tmp.path())
        .args(["resolve", "--variant", "beta"])
        .current_dir(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown variant `beta`"));
}

#[test]
fn test_missing_manifest_is_input_error() {
    let tmp = TempDir::new().unwrap();

    stevedore(tmp.path())
        .args(["resolve"])
        .current_dir(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("could not find `Stevedore.toml`"))
        .stderr(predicate::str::contains("stevedore init"));
}

#[test]
fn test_invalid_manifest_is_input_error() {
    let tmp = project("[toolchain]\ncompile-target = \"thirty-five\"\n");

    stevedore(tmp.path())
        .args(["check"])
        .current_dir(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid descriptor"));
}

// ============================================================================
// stevedore check / plugins / variants
// ============================================================================

#[test]
fn test_check_reports_each_variant() {
    let tmp = project(SCENARIO_A);

    stevedore(tmp.path())
        .args(["check"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("debug"))
        .stdout(predicate::str::contains("staging"))
        .stdout(predicate::str::contains("release"))
        .stdout(predicate::str::contains("rejected").not());
}

#[test]
fn test_check_single_variant_rejected() {
    let tmp = project(SCENARIO_A);
    fs::remove_file(tmp.path().join(".stevedore/config.toml")).unwrap();

    stevedore(tmp.path())
        .args(["check", "--variant", "release"])
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("release      rejected"));
}

#[test]
fn test_plugins_lists_activation_order() {
    let descriptor = SCENARIO_A.replace(
        "[identity]",
        "[[plugins]]\nname = \"push\"\nrequired-min-toolchain = 26\nordered = true\n\n[identity]",
    );
    let tmp = project(&descriptor);

    stevedore(tmp.path())
        .args(["plugins"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1. analytics >= 21"))
        .stdout(predicate::str::contains("2. push >= 26 (ordered, sets floor)"));
}

#[test]
fn test_variants_show_signing_source() {
    let tmp = project(SCENARIO_A);

    stevedore(tmp.path())
        .args(["variants"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("debug [fallback]: signing debug (explicit)"))
        .stdout(predicate::str::contains(
            "staging: signing debug (inherited from `debug`)",
        ))
        .stdout(predicate::str::contains("release: signing release-key (explicit)"));
}

// ============================================================================
// stevedore init / completions
// ============================================================================

#[test]
fn test_init_creates_resolvable_descriptor() {
    let tmp = TempDir::new().unwrap();

    stevedore(tmp.path())
        .args(["init", "app", "--id", "com.example.fresh"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let manifest = fs::read_to_string(tmp.path().join("app/Stevedore.toml")).unwrap();
    assert!(manifest.contains("canonical = \"com.example.fresh\""));

    stevedore(tmp.path())
        .args(["check"])
        .current_dir(tmp.path().join("app"))
        .assert()
        .success();
}

#[test]
fn test_init_fails_if_descriptor_exists() {
    let tmp = project(SCENARIO_A);

    stevedore(tmp.path())
        .args(["init"])
        .current_dir(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();

    stevedore(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stevedore"));
}
