use anyhow::Result;

use redfish_tools::config::init_test_logging;
use redfish_tools::enums::{declarations, extract_enums, parse_enums};
use redfish_tools::ToolsError;

mod common;
use common::{fixtures_dir, run_tool, scratch_file, stderr_of, stdout_of};

const EXPECTED_RESOURCE_LINES: &str = "\
ENUM(State, uint32_t, Enabled, Disabled, StandbyOffline, InTest);
ENUM(Health, uint32_t, OK, Warning, Critical);
ENUM(ResetType, uint32_t, On, ForceOff, GracefulShutdown);
ENUM(Reserved, uint32_t, );
";

#[test]
fn test_extract_resource_metadata() -> Result<()> {
    let _ = init_test_logging();

    let enums = extract_enums(&fixtures_dir().join("Resource_v1.xml"))?;
    let lines: Vec<String> = declarations(&enums).collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines.join("\n") + "\n", EXPECTED_RESOURCE_LINES);
    Ok(())
}

#[test]
fn test_status_enum_line() -> Result<()> {
    let xml = r#"<Schema xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <EnumType Name="Status">
    <Member Name="Enabled"/>
    <Member Name="Disabled"/>
  </EnumType>
</Schema>"#;

    let enums = parse_enums(xml)?;
    let lines: Vec<String> = declarations(&enums).collect();

    assert_eq!(lines, vec!["ENUM(Status, uint32_t, Enabled, Disabled);"]);
    Ok(())
}

#[test]
fn test_missing_name_aborts_whole_run() -> Result<()> {
    let (_dir, path) = scratch_file(
        "Broken_v1.xml",
        r#"<Schema xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <EnumType Name="Good"><Member Name="A"/></EnumType>
  <EnumType><Member Name="B"/></EnumType>
</Schema>"#,
    )?;

    let result = extract_enums(&path);

    assert!(matches!(result, Err(ToolsError::MissingAttribute { .. })));
    Ok(())
}

#[test]
fn test_missing_file() {
    let result = extract_enums(std::path::Path::new("/nonexistent/Resource_v1.xml"));
    assert!(matches!(result, Err(ToolsError::FileNotFound(_))));
}

#[test]
fn test_binary_prints_declarations() -> Result<()> {
    let path = fixtures_dir().join("Resource_v1.xml").display().to_string();

    let output = run_tool(&["generate-enums", &path])?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), EXPECTED_RESOURCE_LINES);
    Ok(())
}

#[test]
fn test_binary_malformed_xml_prints_nothing() -> Result<()> {
    let (_dir, path) = scratch_file(
        "Broken_v1.xml",
        r#"<Schema xmlns="http://docs.oasis-open.org/odata/ns/edm">
  <EnumType Name="Good"><Member Name="A"/></EnumType>
  <EnumType Name="Cut"><Member Name="B">
</Schema>"#,
    )?;
    let path_arg = path.display().to_string();

    let output = run_tool(&["generate-enums", &path_arg])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).is_empty());
    assert!(!stderr_of(&output).is_empty());
    Ok(())
}

#[test]
fn test_binary_missing_file_exits_with_one() -> Result<()> {
    let output = run_tool(&["generate-enums", "/nonexistent/Resource_v1.xml"])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).is_empty());
    Ok(())
}

#[test]
fn test_binary_wrong_argument_count_exits_with_one() -> Result<()> {
    let output = run_tool(&["generate-enums"])?;
    assert_eq!(output.status.code(), Some(1));

    let output = run_tool(&["generate-enums", "a.xml", "b.xml"])?;
    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn test_binary_rejects_text_after_document() -> Result<()> {
    let (_dir, path) = scratch_file(
        "Trailing_v1.xml",
        r#"<Schema xmlns="http://docs.oasis-open.org/odata/ns/edm"><EnumType Name="A"><Member Name="X"/></EnumType></Schema>garbage"#,
    )?;
    let path_arg = path.display().to_string();

    let output = run_tool(&["generate-enums", &path_arg])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).is_empty());
    Ok(())
}
