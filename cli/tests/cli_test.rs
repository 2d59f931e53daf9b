//! Exit code tests for the pdf2md binary.

use std::fs;
use std::process::Command;

fn pdf2md() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pdf2md"));
    cmd.env_remove("RUST_LOG").env_remove("PDF2MD_MAX_HEADING");
    cmd
}

#[test]
fn test_missing_input_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    let status = pdf2md()
        .arg(dir.path().join("missing.pdf"))
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn test_not_a_pdf_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "plain text").unwrap();

    let output = pdf2md().arg(&input).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
}

#[test]
fn test_bad_header_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fake.pdf");
    fs::write(&input, "<html></html>").unwrap();

    let status = pdf2md().arg(&input).arg("-q").status().unwrap();
    assert_eq!(status.code(), Some(2));
}

#[test]
fn test_missing_output_dir_exits_4() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.pdf");
    fs::write(&input, "%PDF-1.4\n").unwrap();

    let status = pdf2md()
        .arg(&input)
        .arg(dir.path().join("nowhere").join("doc.md"))
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(4));
}

#[test]
fn test_existing_output_without_force_exits_4() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.pdf");
    let output = dir.path().join("doc.md");
    fs::write(&input, "%PDF-1.4\n").unwrap();
    fs::write(&output, "keep me").unwrap();

    let status = pdf2md().arg(&input).status().unwrap();
    assert_eq!(status.code(), Some(4));
    assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");
}

#[test]
fn test_version_flag() {
    let output = pdf2md().arg("--version").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}
