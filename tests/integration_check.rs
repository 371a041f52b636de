//! Integration tests for the `check` command.

use anyhow::Result;

mod common;
use common::TestProject;

#[test]
fn test_check_clean_tree_passes() -> Result<()> {
    docstamp::test_utils::init_test_logging(None);

    let project = TestProject::new()?;
    project.add_page("version-1.2/intro.md", "v [[< current-version >]]")?;
    project.add_page("plain.md", "no markers")?;

    let output = project.run_docstamp(&["check", "docs"])?;
    assert!(output.success, "stderr: {}", output.stderr);
    assert!(
        output.stdout.contains("2 file(s) checked, no unresolved placeholders"),
        "stdout: {}",
        output.stdout
    );
    Ok(())
}

#[test]
fn test_check_reports_unresolved_placeholder() -> Result<()> {
    let project = TestProject::new()?;
    project.add_page("intro.md", "v [[< current-version >]] and [[< current-version >]]")?;

    let output = project.run_docstamp(&["check", "docs"])?;
    assert!(!output.success);
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("intro.md"), "stdout: {}", output.stdout);
    assert!(output.stdout.contains("unresolved placeholder"), "stdout: {}", output.stdout);
    assert!(output.stdout.contains("2 occurrence(s)"), "stdout: {}", output.stdout);
    assert!(output.stderr.contains("check found 1 issue(s)"), "stderr: {}", output.stderr);
    Ok(())
}

#[test]
fn test_check_reports_multiple_version_segments() -> Result<()> {
    let project = TestProject::new()?;
    project.add_page("version-1.0/sub/version-2.0/page.md", "no markers")?;

    let output = project.run_docstamp(&["check", "docs"])?;
    assert!(!output.success);
    assert!(output.stdout.contains("multiple version segments"), "stdout: {}", output.stdout);
    assert!(output.stdout.contains("1.0, 2.0"), "stdout: {}", output.stdout);
    Ok(())
}

#[test]
fn test_check_never_modifies_files() -> Result<()> {
    let project = TestProject::new()?;
    project.add_page("intro.md", "v [[< current-version >]]")?;

    let _ = project.run_docstamp(&["check", "docs"])?;
    assert_eq!(project.read_page("intro.md")?, "v [[< current-version >]]");
    Ok(())
}

#[test]
fn test_check_json_output_shape() -> Result<()> {
    let project = TestProject::new()?;
    project.add_page("version-1.2/ok.md", "v [[< current-version >]]")?;
    project.add_page("stray.md", "v [[< current-version >]]")?;

    let output = project.run_docstamp(&["check", "docs", "--format", "json"])?;
    assert!(!output.success);

    let report: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(report["files_checked"], 2);

    let findings = report["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["path"], "stray.md");
    assert_eq!(findings[0]["kind"], "unresolved-placeholder");
    Ok(())
}

#[test]
fn test_check_json_clean_tree() -> Result<()> {
    let project = TestProject::new()?;
    project.add_page("version-1.2/ok.md", "v [[< current-version >]]")?;

    let output = project.run_docstamp(&["check", "docs", "--format", "json"])?;
    assert!(output.success, "stderr: {}", output.stderr);

    let report: serde_json::Value = serde_json::from_str(&output.stdout)?;
    assert_eq!(report["files_checked"], 1);
    assert!(report["findings"].as_array().unwrap().is_empty());
    Ok(())
}

#[test]
fn test_check_respects_configured_placeholder() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("[rewrite]\nplaceholder = \"{{v}}\"\n")?;
    // The default token is plain text under the custom configuration.
    project.add_page("a.md", "v [[< current-version >]]")?;
    project.add_page("b.md", "v {{v}}")?;

    let output = project.run_docstamp(&["check", "docs"])?;
    assert!(!output.success);
    assert!(output.stdout.contains("b.md"), "stdout: {}", output.stdout);
    assert!(!output.stdout.contains("a.md"), "stdout: {}", output.stdout);
    Ok(())
}
