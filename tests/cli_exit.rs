use std::{fs, path::Path, process::Command};

fn sheet_sync(workdir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sheet-sync"));
    command
        .current_dir(workdir)
        .env_remove("CONFIG_PATH")
        .env_remove("GOOGLE_SHEETS_CREDENTIALS")
        .env("SHEET_SYNC_SHEETS__SPREADSHEET_ID", "test-spreadsheet");
    command
}

#[test]
fn test_missing_credential_exits_non_zero_and_keeps_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("_data").join("site_content.json");
    fs::create_dir_all(output.parent().unwrap()).unwrap();
    let previous = "{\n  \"title\": \"Home\"\n}";
    fs::write(&output, previous).unwrap();

    let result = sheet_sync(dir.path()).output().unwrap();

    assert!(!result.status.success());
    assert_eq!(result.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Invalid or missing configuration"), "{stderr}");
    assert!(stderr.contains("GOOGLE_SHEETS_CREDENTIALS"), "{stderr}");

    assert_eq!(fs::read_to_string(&output).unwrap(), previous);
}

#[test]
fn test_unknown_argument_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();

    let result = sheet_sync(dir.path()).arg("--sequential").output().unwrap();

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("Unknown argument"));
    assert!(!dir.path().join("_data").exists());
}

#[test]
fn test_help_exits_zero() {
    let dir = tempfile::tempdir().unwrap();

    let result = sheet_sync(dir.path()).arg("--help").output().unwrap();

    assert!(result.status.success());
    assert!(String::from_utf8_lossy(&result.stdout).contains("Usage: sheet-sync"));
}
