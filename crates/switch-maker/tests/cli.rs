//! End-to-end tests for the `switch-maker` binary.

use std::process::Command;

fn switch_maker_bin() -> &'static str {
    env!("CARGO_BIN_EXE_switch-maker")
}

#[test]
fn test_writes_selected_footprints() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(switch_maker_bin())
        .arg("--output-dir")
        .arg(dir.path())
        .args(["--type", "choc", "--size", "1", "--size", "1.5"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Choc-1.5u.kicad_mod", "Choc-1u.kicad_mod"]);
}

#[test]
fn test_json_output() {
    let output = Command::new(switch_maker_bin())
        .args(["--json", "--type", "mx-alps", "--size", "1", "--no-led"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let footprints = value.as_array().unwrap();
    assert_eq!(footprints.len(), 1);
    assert_eq!(footprints[0]["name"], "MX-Alps-1u");
    let ovals = footprints[0]["pads"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|p| p["shape"] == "oval")
        .count();
    assert_eq!(ovals, 2);
}

#[test]
fn test_inspect_written_file() {
    let dir = tempfile::tempdir().unwrap();
    let status = Command::new(switch_maker_bin())
        .arg("-o")
        .arg(dir.path())
        .args(["-t", "mx-hotswap", "-s", "2", "--no-led"])
        .status()
        .unwrap();
    assert!(status.success());

    let output = Command::new(switch_maker_bin())
        .arg("--inspect")
        .arg(dir.path().join("MX-Hotswap-2u.kicad_mod"))
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["name"], "MX-Hotswap-2u");
    assert_eq!(value["attr"], "smd");
}

#[test]
fn test_unknown_type_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(switch_maker_bin())
        .arg("-o")
        .arg(dir.path())
        .args(["--type", "topre"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown switch type: topre"), "{stderr}");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_pretty_json_output() {
    let compact = Command::new(switch_maker_bin())
        .args(["--json", "--type", "mx", "--size", "1", "--no-led"])
        .output()
        .unwrap();
    let pretty = Command::new(switch_maker_bin())
        .args(["--json", "--pretty", "--type", "mx", "--size", "1", "--no-led"])
        .output()
        .unwrap();
    assert!(pretty.status.success(), "{pretty:?}");

    let compact_text = String::from_utf8_lossy(&compact.stdout);
    let pretty_text = String::from_utf8_lossy(&pretty.stdout);
    assert_eq!(compact_text.trim_end().lines().count(), 1);
    assert!(pretty_text.starts_with("[\n  {\n    \"name\": \"MX-1u\""), "{pretty_text}");

    let a: serde_json::Value = serde_json::from_str(&compact_text).unwrap();
    let b: serde_json::Value = serde_json::from_str(&pretty_text).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_repeated_size_writes_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(switch_maker_bin())
        .arg("-o")
        .arg(dir.path())
        .args(["-t", "alps", "-s", "1", "-s", "1"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Wrote 1 footprints"), "{stderr}");
}
