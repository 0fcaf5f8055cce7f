use std::process::Command;

#[test]
fn test_cli_help_flag() {
    let output = Command::new("cargo")
        .args(["run", "-p", "causerie-cli", "--", "--help"])
        .output()
        .expect("Failed to execute");

    assert!(output.status.success(), "Help flag should exit with code 0");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Generate speech audio for dialog lessons"),
        "Help output should contain description"
    );
    assert!(
        stdout.contains("Usage:"),
        "Help output should contain usage information"
    );
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("voices"));
}

#[test]
fn test_cli_version_flag() {
    let output = Command::new("cargo")
        .args(["run", "-p", "causerie-cli", "--", "--version"])
        .output()
        .expect("Failed to execute");

    assert!(
        output.status.success(),
        "Version flag should exit with code 0"
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("causerie"),
        "Version output should contain binary name"
    );
}

#[test]
fn test_cli_generate_help_lists_options() {
    let output = Command::new("cargo")
        .args(["run", "-p", "causerie-cli", "--", "generate", "--help"])
        .output()
        .expect("Failed to execute");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for option in [
        "--content-dir",
        "--backend",
        "--policy",
        "--voices",
        "--silence-ms",
        "--fade-ms",
        "--timeout-secs",
    ] {
        assert!(stdout.contains(option), "generate --help should list {option}");
    }
}

#[test]
fn test_cli_generate_empty_content_dir_succeeds() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = Command::new("cargo")
        .args(["run", "-p", "causerie-cli", "--", "generate", "--content-dir"])
        .arg(dir.path())
        .output()
        .expect("Failed to execute");

    assert!(
        output.status.success(),
        "An empty content directory is a clean run"
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("0 generated, 0 skipped, 0 failed"),
        "Summary line should be printed, got: {stdout}"
    );
}

#[test]
fn test_cli_generate_missing_content_dir_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("does-not-exist");

    let output = Command::new("cargo")
        .args(["run", "-p", "causerie-cli", "--", "generate", "--content-dir"])
        .arg(&missing)
        .output()
        .expect("Failed to execute");

    assert!(
        !output.status.success(),
        "A missing content directory should exit non-zero"
    );
}

#[test]
fn test_cli_rejects_unknown_backend() {
    let output = Command::new("cargo")
        .args([
            "run",
            "-p",
            "causerie-cli",
            "--",
            "voices",
            "--backend",
            "polly",
        ])
        .output()
        .expect("Failed to execute");

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("polly"),
        "Error output should name the unknown backend"
    );
}

#[test]
fn test_cli_rejects_unknown_policy() {
    let output = Command::new("cargo")
        .args([
            "run",
            "-p",
            "causerie-cli",
            "--",
            "generate",
            "--policy",
            "random",
        ])
        .output()
        .expect("Failed to execute");

    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("random"));
}

// Requires edge-tts and internet; run manually.
#[test]
#[ignore]
fn test_cli_voices_lists_french() {
    let output = Command::new("cargo")
        .args(["run", "-p", "causerie-cli", "--", "voices", "--language", "fr"])
        .output()
        .expect("Failed to execute");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("ShortName: fr-FR-"));
    assert!(stdout.contains("Gender:"));
}
