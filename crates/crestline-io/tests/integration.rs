//! Integration tests for crestline-io table reading and result writing.

use crestline_core::{AnalysisParams, ExtremumKind, SignalSet};
use crestline_io::{Error, ExtremaStage, OutputDir, SignalTable};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

/// Two triangle waves (+/-4, eight samples per period) a quarter period
/// apart, as a commented three-column table.
fn two_signal_table(rows: usize) -> String {
    let wave = [0.0, 2.0, 4.0, 2.0, 0.0, -2.0, -4.0, -2.0];
    let mut text = String::from("# t  S1  S2\n");
    for i in 0..rows {
        text.push_str(&format!("{} {} {}\n", i, wave[i % 8], wave[(i + 2) % 8]));
    }
    text
}

fn write_temp(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

#[test]
fn reads_table_from_disk() {
    let file = write_temp(&two_signal_table(24));
    let table = SignalTable::read(file.path()).unwrap();
    assert_eq!(table.signal_count(), 2);
    assert_eq!(table.row_count(), 24);
    assert_eq!(table.time_span(), Some((0.0, 23.0)));
}

#[test]
fn missing_file_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = SignalTable::read(dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, Error::Unavailable { .. }));
}

// ---------------------------------------------------------------------------
// Full run through the file layer
// ---------------------------------------------------------------------------

#[test]
fn pipeline_writes_every_result_file() {
    let file = write_temp(&two_signal_table(40));
    let table = SignalTable::read(file.path()).unwrap();
    let mut set = SignalSet::from_source(&table, None, AnalysisParams::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = OutputDir::new(dir.path().join("output"));
    out.prepare().unwrap();

    for signal in set.signals() {
        for kind in ExtremumKind::ALL {
            out.write_extrema(signal.extrema(kind), signal.id(), ExtremaStage::Detected)
                .unwrap();
        }
    }

    set.consolidate_all().unwrap();
    let changes = set.restrict_to_range(1.0, 30.0).unwrap();
    for (id, change) in changes {
        let signal = set.get(id).unwrap();
        for kind in ExtremumKind::ALL {
            if change.changed(kind) {
                out.write_extrema(signal.extrema(kind), id, ExtremaStage::Filtered)
                    .unwrap();
            }
        }
    }

    for kind in ExtremumKind::ALL {
        out.write_phase_table(&set.aggregate_phase(kind)).unwrap();
    }

    let root = out.path();
    for name in [
        "S1_crest.dat",
        "S1_trough.dat",
        "S2_crest.dat",
        "S2_trough.dat",
        "phase180_crest.dat",
        "phase360_crest.dat",
        "phase180_trough.dat",
        "phase360_trough.dat",
    ] {
        assert!(root.join(name).is_file(), "{name} missing");
    }

    // Signal 1 crests at 2, 10, 18, 26, 34; cropping to 30 drops 34.
    let filtered = fs::read_to_string(root.join("S1_filtered_crest.dat")).unwrap();
    assert_eq!(filtered, "2 4\n10 4\n18 4\n26 4\n");

    let detected = fs::read_to_string(root.join("S1_crest.dat")).unwrap();
    assert_eq!(detected.lines().count(), 5);

    // Signal 1 lags signal 2 by a quarter period. Its crest at 2 precedes the
    // first crest of signal 2 and has no phase.
    let phase = fs::read_to_string(root.join("phase360_crest.dat")).unwrap();
    let first: Vec<&str> = phase.lines().next().unwrap().split(' ').collect();
    assert_eq!(first, vec!["10", "90"]);
}

#[test]
fn prepare_clears_previous_run() {
    let dir = tempfile::tempdir().unwrap();
    let out = OutputDir::new(dir.path());
    fs::write(dir.path().join("phase180_crest.dat"), "stale").unwrap();
    fs::write(dir.path().join("input.txt"), "0 1\n").unwrap();

    assert_eq!(out.prepare().unwrap(), 1);
    assert!(!dir.path().join("phase180_crest.dat").exists());
    assert!(dir.path().join("input.txt").exists());
}
