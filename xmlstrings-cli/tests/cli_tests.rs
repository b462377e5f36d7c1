use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const MARKUP: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <!-- Greetings -->
    <string name="greeting">Hello</string>
    <string name="farewell"/>
    <string name="title" translatable="false">Main</string>
</resources>
"#;

/// Runs the binary inside `dir` with a private settings file.
fn xmlstrings_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xmlstrings"));
    cmd.current_dir(dir)
        .arg("--config")
        .arg(dir.join("settings.toml"))
        .env_remove("RUST_LOG");
    cmd
}

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("strings.xml"), MARKUP).unwrap();
    dir
}

#[test]
fn test_export_prints_summary_and_writes_file() {
    let dir = setup();

    xmlstrings_cmd(dir.path())
        .args(["export", "-i", "strings.xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total strings: 3"))
        .stdout(predicate::str::contains("Exported strings: 2"))
        .stdout(predicate::str::contains("Localizable.strings file!"))
        .stdout(predicate::str::contains("┌"));

    let content = fs::read_to_string(dir.path().join("Localizable.strings")).unwrap();
    let lines: Vec<_> = content.lines().skip(1).collect();
    assert_eq!(
        lines,
        vec![
            r#""farewell" = "";"#,
            r#""greeting" = "Hello";"#,
            r#""title" = "Main";"#,
        ]
    );
}

#[test]
fn test_export_skip_empty_flag() {
    let dir = setup();

    xmlstrings_cmd(dir.path())
        .args(["export", "-i", "strings.xml", "-o", "fr", "--skip-empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped empty strings: 1"));

    let content = fs::read_to_string(dir.path().join("fr.strings")).unwrap();
    assert!(!content.contains("farewell"));
}

#[test]
fn test_export_numbers_existing_output() {
    let dir = setup();
    fs::write(dir.path().join("Localizable.strings"), "keep me").unwrap();

    xmlstrings_cmd(dir.path())
        .args(["export", "-i", "strings.xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Localizable (1).strings"));

    assert_eq!(
        fs::read_to_string(dir.path().join("Localizable.strings")).unwrap(),
        "keep me"
    );
    assert!(dir.path().join("Localizable (1).strings").exists());

    xmlstrings_cmd(dir.path())
        .args(["export", "-i", "strings.xml", "--overwrite"])
        .assert()
        .success();
    assert_ne!(
        fs::read_to_string(dir.path().join("Localizable.strings")).unwrap(),
        "keep me"
    );
}

#[test]
fn test_export_json_report() {
    let dir = setup();

    let output = xmlstrings_cmd(dir.path())
        .args(["export", "-i", "strings.xml", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["stats"]["total"], 3);
    assert_eq!(body["stats"]["exported_empty"], 1);
}

#[test]
fn test_export_rejects_wrong_extension_and_bad_names() {
    let dir = setup();
    fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    xmlstrings_cmd(dir.path())
        .args(["export", "-i", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid file format! Should be .xml!"));

    xmlstrings_cmd(dir.path())
        .args(["export", "-i", "missing.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));

    xmlstrings_cmd(dir.path())
        .args(["export", "-i", "strings.xml", "-o", "PRN"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reserved name"));
}

#[test]
fn test_export_without_entries_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("empty.xml"), "<resources/>").unwrap();

    xmlstrings_cmd(dir.path())
        .args(["export", "-i", "empty.xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No strings found in XML file!"));
    assert!(!dir.path().join("Localizable.strings").exists());
}

#[test]
fn test_import_prints_changes_and_writes_copy() {
    let dir = setup();
    fs::write(
        dir.path().join("fr.strings"),
        "\"greeting\" = \"Bonjour\";\n\"farewell\" = \"Adieu\";\n\"extra\" = \"x\";\n",
    )
    .unwrap();

    xmlstrings_cmd(dir.path())
        .args(["import", "--xml", "strings.xml", "--strings", "fr.strings", "-o", "fr"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Changed: greeting"))
        .stdout(predicate::str::contains("  From: \"Hello\""))
        .stdout(predicate::str::contains("  To:   \"Bonjour\""))
        .stdout(predicate::str::contains("Imported strings: 1"))
        .stdout(predicate::str::contains("fr.xml"));

    let written = fs::read_to_string(dir.path().join("fr.xml")).unwrap();
    assert_eq!(written, MARKUP.replace("Hello", "Bonjour"));
    assert_eq!(
        fs::read_to_string(dir.path().join("strings.xml")).unwrap(),
        MARKUP
    );
}

#[test]
fn test_import_without_changes() {
    let dir = setup();
    fs::write(dir.path().join("same.strings"), "\"greeting\" = \"Hello\";\n").unwrap();

    xmlstrings_cmd(dir.path())
        .args(["import", "-x", "strings.xml", "-s", "same.strings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found no strings to update!"));
    assert!(!dir.path().join("strings_edited.xml").exists());
}

#[test]
fn test_import_empty_strings_file() {
    let dir = setup();
    fs::write(dir.path().join("blank.strings"), "/* nothing */\n").unwrap();

    xmlstrings_cmd(dir.path())
        .args(["import", "-x", "strings.xml", "-s", "blank.strings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No valid strings found in .strings file!"));
}

#[test]
fn test_import_malformed_strings_file_fails() {
    let dir = setup();
    fs::write(dir.path().join("bad.strings"), "\"greeting\" = \"Hello;\n").unwrap();

    xmlstrings_cmd(dir.path())
        .args(["import", "-x", "strings.xml", "-s", "bad.strings"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.strings"))
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn test_config_set_changes_export() {
    let dir = setup();

    xmlstrings_cmd(dir.path())
        .args(["config", "set", "include_empty", "false"])
        .assert()
        .success();
    xmlstrings_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("include_empty = false"));

    xmlstrings_cmd(dir.path())
        .args(["export", "-i", "strings.xml"])
        .assert()
        .success();
    let content = fs::read_to_string(dir.path().join("Localizable.strings")).unwrap();
    assert!(!content.contains("farewell"));

    xmlstrings_cmd(dir.path())
        .args(["config", "reset"])
        .assert()
        .success();
    xmlstrings_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("include_empty = true"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();

    xmlstrings_cmd(dir.path())
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown setting 'colour'"));
    assert!(!dir.path().join("settings.toml").exists());
}

#[test]
fn test_completions_for_bash() {
    let dir = TempDir::new().unwrap();

    xmlstrings_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("xmlstrings"));
}
