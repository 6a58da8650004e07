use std::fs;
use std::process::Command;

use tempfile::TempDir;

fn apidoc(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_apidoc"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run apidoc")
}

#[test]
fn print_lists_methods_of_clean_pages() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("user-get.md"),
        "# Get user\n\n<!-- { \"blockType\": \"request\", \"name\": \"get_user\" } -->\n```http\nGET /users/{id}\n```\n",
    )
    .unwrap();

    let output = apidoc(&["--no-color", "print", dir.path().to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("method get_user: GET /users/{id}"), "{}", stdout);
}

#[test]
fn print_reports_annotation_errors() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("broken.md"),
        "# Broken\n\n<!-- { \"blockType\": -->\n```json\n{}\n```\n",
    )
    .unwrap();

    let output = apidoc(&["--no-color", "print", dir.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("MalformedAnnotation"), "{}", stderr);
}
