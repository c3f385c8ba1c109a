//! Binary-level tests: flag surface, --check resolution, profile persistence.

use assert_cmd::Command;

fn opsdash() -> Command {
    Command::cargo_bin("opsdash").expect("binary built")
}

#[test]
fn help_mentions_short_and_long_flags() {
    let output = opsdash().arg("--help").output().expect("run opsdash --help");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        text.contains("--api-key")
            && text.contains("-k")
            && text.contains("--profile")
            && text.contains("-P")
            && text.contains("--check"),
        "help text missing expected flags\n{text}"
    );
}

#[test]
fn unknown_flag_is_rejected_with_usage() {
    let output = opsdash().arg("--frobnicate").output().expect("run opsdash");
    let text = String::from_utf8_lossy(&output.stderr).to_string();
    assert!(text.contains("Usage:"), "expected usage text, got\n{text}");
}

#[test]
fn check_reports_url_and_key_presence() {
    let td = tempfile::tempdir().unwrap();
    let output = opsdash()
        .env("XDG_CONFIG_HOME", td.path())
        .args(["--check", "--api-key", "s3cr3t", "http://metrics.internal:9999"])
        .output()
        .expect("run opsdash --check");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(text.contains("http://metrics.internal:9999"), "{text}");
    assert!(text.contains("configured"), "{text}");
}

#[test]
fn check_falls_back_to_environment() {
    let td = tempfile::tempdir().unwrap();
    let output = opsdash()
        .env("XDG_CONFIG_HOME", td.path())
        .env("OPSDASH_API_URL", "http://envhost:8081")
        .env_remove("OPSDASH_API_KEY")
        .arg("--check")
        .output()
        .expect("run opsdash --check");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(text.contains("http://envhost:8081"), "{text}");
    assert!(text.contains("none"), "{text}");
}

#[test]
fn profile_created_on_first_use_and_loaded_after() {
    let td = tempfile::tempdir().unwrap();

    // Name + URL creates the profile.
    let output = opsdash()
        .env("XDG_CONFIG_HOME", td.path())
        .args(["--check", "--profile", "prod", "http://one:8080"])
        .output()
        .expect("create profile");
    assert!(output.status.success());

    let data = std::fs::read_to_string(td.path().join("opsdash/profiles.json"))
        .expect("profiles.json created");
    assert!(data.contains("prod") && data.contains("http://one:8080"), "{data}");

    // Name alone now resolves to the stored URL.
    let output = opsdash()
        .env("XDG_CONFIG_HOME", td.path())
        .args(["--check", "--profile", "prod"])
        .output()
        .expect("load profile");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout).to_string();
    assert!(text.contains("http://one:8080"), "{text}");
}

#[test]
fn profile_overwrite_requires_save_flag() {
    let td = tempfile::tempdir().unwrap();

    opsdash()
        .env("XDG_CONFIG_HOME", td.path())
        .args(["--check", "--profile", "prod", "http://one:8080"])
        .output()
        .expect("create profile");

    // Without --save the stored entry stays put.
    opsdash()
        .env("XDG_CONFIG_HOME", td.path())
        .args(["--check", "--profile", "prod", "http://two:8080"])
        .output()
        .expect("no-save run");
    let data = std::fs::read_to_string(td.path().join("opsdash/profiles.json")).unwrap();
    assert!(data.contains("http://one:8080"), "{data}");

    // With --save it is updated.
    opsdash()
        .env("XDG_CONFIG_HOME", td.path())
        .args(["--check", "--profile", "prod", "--save", "http://two:8080"])
        .output()
        .expect("save run");
    let data = std::fs::read_to_string(td.path().join("opsdash/profiles.json")).unwrap();
    assert!(data.contains("http://two:8080"), "{data}");
}

#[test]
fn unknown_profile_without_url_fails() {
    let td = tempfile::tempdir().unwrap();
    let output = opsdash()
        .env("XDG_CONFIG_HOME", td.path())
        .args(["--check", "--profile", "ghost"])
        .output()
        .expect("run opsdash");
    assert!(!output.status.success());
    let text = String::from_utf8_lossy(&output.stderr).to_string();
    assert!(text.contains("ghost"), "{text}");
}
