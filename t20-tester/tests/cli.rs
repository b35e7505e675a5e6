use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "t20-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_t20-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("innings-invariants"));
    assert!(content.contains("batting_paradise"));
}

#[test]
fn cli_runs_all_scenarios_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_t20-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args([
            "--report",
            "json",
            "--scenarios",
            "all",
            "--iterations",
            "2",
            "--seeds",
            "1,2",
            "--max-overs",
            "5",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("T20 Engine Automated Tester"));

    let content = std::fs::read_to_string(output_path).expect("read output");
    let parsed: serde_json::Value = serde_json::from_str(&content).expect("json report");
    let results = parsed.as_array().expect("array of results");
    assert_eq!(results.len(), 8 * 2);
    assert!(results.iter().all(|r| r["passed"] == true));
}

#[test]
fn cli_preset_csv_report_has_one_row_per_match() {
    let exe = env!("CARGO_BIN_EXE_t20-tester");
    let output_path = temp_path("csv");
    let status = Command::new(exe)
        .args([
            "--report",
            "csv",
            "--preset",
            "bowler_friendly",
            "--iterations",
            "3",
            "--seeds",
            "10",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert_eq!(content.lines().count(), 1 + 3);
}

#[test]
fn cli_rejects_unknown_preset_and_zero_overs() {
    let exe = env!("CARGO_BIN_EXE_t20-tester");
    let unknown = Command::new(exe)
        .args(["--preset", "moon-pitch", "--iterations", "1"])
        .output()
        .expect("run cli");
    assert!(!unknown.status.success());
    assert!(String::from_utf8_lossy(&unknown.stderr).contains("Unknown preset"));

    let zero = Command::new(exe)
        .args(["--max-overs", "0"])
        .output()
        .expect("run cli");
    assert!(!zero.status.success());
}
