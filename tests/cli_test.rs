#![cfg(unix)]

mod common;

use anyhow::Result;
use common::TestEnvironment;
use serde_json::json;

#[test]
fn test_disks_json_skips_disk_zero() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.install_utility()?;

    let output = env.run(&["--output", "json", "disks"])?;
    assert_eq!(output.exit_code, 0, "disks failed: {}", output.stderr);

    let event = output.event()?;
    assert_eq!(event["code"], "disks.list");
    assert_eq!(
        event["data"],
        json!([
            { "number": 1, "size": "14", "free": "14", "gpt": false },
            { "number": 2, "size": "931", "free": "100", "gpt": true },
        ])
    );
    assert_eq!(env.last_script()?, "list disk");
    Ok(())
}

#[test]
fn test_partitions_json_selects_disk() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.install_utility()?;

    let output = env.run(&["--output", "json", "partitions", "2"])?;
    assert_eq!(output.exit_code, 0, "partitions failed: {}", output.stderr);

    assert_eq!(
        output.event()?["data"],
        json!([
            { "number": 1, "type": "System", "size": "100" },
            { "number": 2, "type": "Reserved", "size": "16" },
            { "number": 3, "type": "Primary", "size": "475" },
        ])
    );
    assert_eq!(env.last_script()?, "select disk 2\nlist partition");
    Ok(())
}

#[test]
fn test_detail_json_reports_type_and_label() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.install_utility()?;

    let output = env.run(&["--output", "json", "detail", "2", "3"])?;
    assert_eq!(output.exit_code, 0, "detail failed: {}", output.stderr);

    assert_eq!(
        output.event()?["data"],
        json!({ "type": "ebd0a0a2-b9e5-4433-87c0-68b6b72699c7", "label": "Windows" })
    );
    assert_eq!(
        env.last_script()?,
        "select disk 2\nselect partition 3\ndetail partition"
    );
    Ok(())
}

#[test]
fn test_script_file_is_removed() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.install_utility()?;

    let output = env.run(&["disks"])?;
    assert_eq!(output.exit_code, 0, "disks failed: {}", output.stderr);

    let used = env.last_script_path()?;
    assert!(used.starts_with(env.script_dir()));
    assert!(!used.exists(), "script {} was left behind", used.display());
    assert_eq!(std::fs::read_dir(env.script_dir())?.count(), 0);
    Ok(())
}

#[test]
fn test_utility_error_degrades_to_empty_list() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.install_failing_utility()?;

    let output = env.run(&["--output", "json", "disks"])?;
    assert_eq!(output.exit_code, 0);
    assert_eq!(output.event()?["data"], json!([]));
    assert!(output.stderr.contains("diskpart.list_disks.failed"));
    assert!(output.stderr.contains("access denied"));
    Ok(())
}

#[test]
fn test_utility_error_in_text_mode_shows_no_drives() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.install_failing_utility()?;

    let output = env.run(&["disks"])?;
    assert_eq!(output.exit_code, 0);
    assert!(output.stderr.contains("Error listing disks"));
    assert!(output.stderr.contains("No drives!"));
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn test_missing_utility_degrades_to_empty_list() -> Result<()> {
    let env = TestEnvironment::new()?;

    let output = env.run(&["--output", "json", "partitions", "1"])?;
    assert_eq!(output.exit_code, 0);
    assert_eq!(output.event()?["data"], json!([]));
    assert!(output.stderr.contains("diskpart.list_partitions.failed"));
    Ok(())
}

#[test]
fn test_text_listing_shows_partition_style() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.install_utility()?;

    let output = env.run(&["disks"])?;
    assert_eq!(output.exit_code, 0, "disks failed: {}", output.stderr);

    let rows: Vec<&str> = output
        .stdout
        .lines()
        .filter(|l| l.starts_with('1') || l.starts_with('2'))
        .collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].ends_with("MBR"));
    assert!(rows[1].ends_with("GPT"));
    assert!(output.stdout.contains("Found 2 disks"));
    Ok(())
}

#[test]
fn test_excluded_disks_come_from_config() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.install_utility()?;
    env.write_config("excluded_disks = [2]\n")?;

    let output = env.run(&["--output", "json", "disks"])?;
    let numbers: Vec<u64> = output.event()?["data"]
        .as_array()
        .map(|disks| disks.iter().filter_map(|d| d["number"].as_u64()).collect())
        .unwrap_or_default();
    assert_eq!(numbers, vec![0, 1]);
    Ok(())
}

#[test]
fn test_malformed_config_fails() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.install_utility()?;
    std::fs::write(env.config_path(), "excluded_disks = \"zero\"\n")?;

    let output = env.run(&["disks"])?;
    assert_eq!(output.exit_code, 1);
    assert!(output.stderr.contains("parsing config"));
    Ok(())
}

#[test]
fn test_debug_mode_logs_commands() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.install_utility()?;

    let output = env.run(&["--debug", "disks"])?;
    assert_eq!(output.exit_code, 0);
    assert!(output.stderr.contains("list disk"));
    Ok(())
}
