//! Integration tests for crestline-cli.
//!
//! Tests run the `crestline` binary against small generated tables and check
//! the console output, the result files and the JSON report.

use std::path::Path;
use std::process::Command;

/// Helper to get the path to the `crestline` binary built by cargo.
fn crestline_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_crestline"))
}

/// Two triangle waves (+/-4, eight samples per period) a quarter period apart.
fn write_table(path: &Path, rows: usize) {
    let wave = [0.0, 2.0, 4.0, 2.0, 0.0, -2.0, -4.0, -2.0];
    let mut text = String::from("# t S1 S2\n");
    for i in 0..rows {
        text.push_str(&format!("{} {} {}\n", i, wave[i % 8], wave[(i + 2) % 8]));
    }
    std::fs::write(path, text).unwrap();
}

// ---------------------------------------------------------------------------
// `crestline analyze`
// ---------------------------------------------------------------------------

#[test]
fn analyze_writes_results_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("signals.txt");
    let config = dir.path().join("run.toml");
    let out_dir = dir.path().join("results");
    let report = dir.path().join("report.json");
    write_table(&input, 40);
    std::fs::write(&config, "epochs = 2\n").unwrap();

    let output = crestline_bin()
        .current_dir(dir.path())
        .arg("analyze")
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--report")
        .arg(&report)
        .output()
        .expect("failed to run crestline analyze");

    assert!(
        output.status.success(),
        "analyze failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("removed by consolidation"));
    assert!(stdout.contains("mean frequency"));

    for name in [
        "S1_crest.dat",
        "S1_trough.dat",
        "S1_filtered_crest.dat",
        "S2_filtered_trough.dat",
        "phase180_crest.dat",
        "phase360_trough.dat",
    ] {
        assert!(out_dir.join(name).is_file(), "{name} missing");
    }

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["params"]["epochs"], 2);
    assert_eq!(json["detected"][0]["signal_id"], 1);
    assert_eq!(json["detected"][0]["crests"], 5);
    assert_eq!(json["removed_per_epoch"].as_array().unwrap().len(), 2);
    let frequency = json["features"][0]["frequency"].as_f64().unwrap();
    assert!((frequency - 0.125).abs() < 1e-12);
}

#[test]
fn analyze_crop_and_signal_selection() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("signals.txt");
    let out_dir = dir.path().join("results");
    let report = dir.path().join("report.json");
    write_table(&input, 40);

    let output = crestline_bin()
        .current_dir(dir.path())
        .arg("analyze")
        .arg(&input)
        .args(["--signals", "1", "--crop", "1:30"])
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--report")
        .arg(&report)
        .output()
        .expect("failed to run crestline analyze");

    assert!(output.status.success());
    assert!(!out_dir.join("S2_crest.dat").exists());

    let filtered = std::fs::read_to_string(out_dir.join("S1_filtered_crest.dat")).unwrap();
    assert_eq!(filtered, "2 4\n10 4\n18 4\n26 4\n");

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["filtered"][0]["crests"], 4);
    assert_eq!(json["crop"]["upper"], 30.0);
    assert!(json["phase"]["crest"].as_array().unwrap().is_empty());
}

#[test]
fn analyze_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();

    let output = crestline_bin()
        .current_dir(dir.path())
        .arg("analyze")
        .arg(dir.path().join("absent.txt"))
        .output()
        .expect("failed to run crestline analyze");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("reading"), "unexpected stderr: {stderr}");
}

#[test]
fn analyze_rejects_bad_crop() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("signals.txt");
    write_table(&input, 16);

    let output = crestline_bin()
        .current_dir(dir.path())
        .arg("analyze")
        .arg(&input)
        .args(["--crop", "30"])
        .output()
        .expect("failed to run crestline analyze");

    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `crestline info`
// ---------------------------------------------------------------------------

#[test]
fn info_shows_table_layout() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("signals.txt");
    write_table(&input, 40);

    let output = crestline_bin()
        .arg("info")
        .arg(&input)
        .output()
        .expect("failed to run crestline info");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rows:        40"));
    assert!(stdout.contains("Signals:     2"));
    assert!(stdout.contains("S1"));
    assert!(stdout.contains("S2"));
}

// ---------------------------------------------------------------------------
// `crestline config`
// ---------------------------------------------------------------------------

#[test]
fn config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conf").join("crestline.toml");

    let init = crestline_bin()
        .args(["config", "init", "--path"])
        .arg(&path)
        .output()
        .expect("failed to run crestline config init");
    assert!(init.status.success());
    assert!(path.is_file());

    let again = crestline_bin()
        .args(["config", "init", "--path"])
        .arg(&path)
        .output()
        .expect("failed to run crestline config init");
    assert!(!again.status.success(), "init must not overwrite without --force");

    let show = crestline_bin()
        .args(["config", "show", "--config"])
        .arg(&path)
        .output()
        .expect("failed to run crestline config show");
    assert!(show.status.success());
    let stdout = String::from_utf8_lossy(&show.stdout);
    assert!(stdout.contains("noise_threshold"));
    assert!(stdout.contains("epochs"));
}
