use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_help_shows_usage() {
    cargo_bin_cmd!("image-toolkit")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("image generation"));
}

#[test]
fn test_tools_lists_all_definitions() {
    let tmp = TempDir::new().unwrap();
    cargo_bin_cmd!("image-toolkit")
        .current_dir(tmp.path())
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"generate\""))
        .stdout(predicate::str::contains("\"edit\""))
        .stdout(predicate::str::contains("\"analyze\""));
}

#[test]
fn test_mock_generate_prints_would_be_path() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("t");
    cargo_bin_cmd!("image-toolkit")
        .current_dir(tmp.path())
        .args(["--mock", "generate", "--prompt", "a red ball", "--filename", "ball"])
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("[TEST MODE] Would generate image:"))
        .stdout(predicate::str::contains("ball.png"));
}

#[test]
fn test_env_toggle_selects_mock_mode() {
    let tmp = TempDir::new().unwrap();
    cargo_bin_cmd!("image-toolkit")
        .current_dir(tmp.path())
        .env("GEMINI_TEST_MODE", "true")
        .args(["analyze", "--image", "cat.png", "--question", "what is it?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mock analysis"));
}

#[test]
fn test_missing_api_key_is_reported_as_tool_error() {
    let tmp = TempDir::new().unwrap();
    cargo_bin_cmd!("image-toolkit")
        .current_dir(tmp.path())
        .env_remove("GEMINI_API_KEY")
        .env_remove("GEMINI_TEST_MODE")
        .args(["generate", "--prompt", "a red ball"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Error: GEMINI_API_KEY is not set"));
}

#[test]
fn test_call_rejects_malformed_json() {
    let tmp = TempDir::new().unwrap();
    cargo_bin_cmd!("image-toolkit")
        .current_dir(tmp.path())
        .args(["call", "generate", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON"));
}

#[test]
fn test_notify_disabled_by_default_is_silent() {
    let tmp = TempDir::new().unwrap();
    cargo_bin_cmd!("image-toolkit")
        .current_dir(tmp.path())
        .args(["notify", "session.idle"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
