// Integration tests for editor error handling
#![cfg(unix)]


use std::fs::{self, File};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use test_helpers::TestVault;

// Opens a regular note (editing mode) with `editor_command` and returns
// whether the process succeeded along with its stderr.
fn run_with_editor(editor_command: &str) -> (bool, String) {
    let vault = TestVault::new();
    vault.write("Projects/plan.md", "plan");

    let output = vault
        .command()
        .env("TWEAKS_EDITOR", editor_command)
        .args(["open", "Projects/plan.md"])
        .output()
        .expect("Failed to execute command");

    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.success(), stderr)
}

// Create a mock editor script for testing
fn create_mock_editor(path: &Path, content: &str, mode: u32) {
    let mut file = File::create(path).expect("Failed to create mock editor script");
    file.write_all(content.as_bytes())
        .expect("Failed to write to mock editor script");
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .expect("Failed to set permissions");
}

#[test]
fn test_editor_command_not_found() {
    let (success, stderr) = run_with_editor("nonexistent_editor_command");
    assert!(!success, "Command with nonexistent editor should fail");
    assert!(
        stderr.contains("Editor command 'nonexistent_editor_command' not found"),
        "Error message should indicate the command was not found, got: {}",
        stderr
    );
}

#[test]
fn test_editor_permission_denied() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let script_path = temp_dir.path().join("non_executable_editor.sh");
    create_mock_editor(&script_path, "#!/bin/sh\necho 'This should not run'", 0o644);

    let (success, stderr) = run_with_editor(script_path.to_str().unwrap());

    assert!(!success, "Command with non-executable editor should fail");
    assert!(
        stderr.contains("Permission denied"),
        "Error message should indicate permission issues, got: {}",
        stderr
    );
}

#[test]
fn test_editor_non_zero_exit() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let script_path = temp_dir.path().join("failing_editor.sh");
    create_mock_editor(&script_path, "#!/bin/sh\nexit 3", 0o755);

    let (success, stderr) = run_with_editor(script_path.to_str().unwrap());

    assert!(!success, "Command with failing editor should fail");
    assert!(
        stderr.contains("exited with non-zero status code: 3"),
        "Error message should include the exit code, got: {}",
        stderr
    );
}

#[test]
fn test_successful_editor() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let script_path = temp_dir.path().join("success_editor.sh");
    create_mock_editor(&script_path, "#!/bin/sh\nexit 0", 0o755);

    let (success, stderr) = run_with_editor(script_path.to_str().unwrap());
    assert!(success, "Command with successful editor should succeed: {}", stderr);
}
