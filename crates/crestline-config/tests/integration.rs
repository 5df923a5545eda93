//! Integration tests for crestline-config.
//!
//! These tests verify file round trips and the hand-off to the core crate.

use crestline_config::{AnalysisConfig, CONFIG_FILE_NAME, ConfigError, Crop, find_config_from};
use crestline_core::{AnalysisParams, Sample, Signal, SignalSet};
use tempfile::TempDir;

/// Saving into a missing directory creates it and loads back unchanged.
#[test]
fn save_and_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

    let config = AnalysisConfig {
        noise_threshold: 1.5,
        epochs: 2,
        signals: Some(vec![1, 2]),
        crop: Some(Crop::new(1.0, 119.0)),
        ..AnalysisConfig::default()
    };
    config.save(&path).unwrap();

    let loaded = AnalysisConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(find_config_from(path.parent().unwrap()), Some(path));
}

#[test]
fn load_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let err = AnalysisConfig::load(temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

/// Parameters from a config drive the core pipeline.
#[test]
fn params_feed_the_core() {
    let config = AnalysisConfig::from_toml("noise_threshold = 10.0\nepochs = 2\n").unwrap();
    config.validate().unwrap();
    let params = config.params();
    assert_eq!(params, AnalysisParams::default().with_noise_threshold(10.0).with_epochs(2));

    let wave = [0.0, 5.0, 10.0, 5.0, 0.0, -5.0, -10.0, -5.0];
    let samples: Vec<Sample> = wave
        .iter()
        .enumerate()
        .map(|(i, &v)| Sample::new(i as f64, v))
        .collect();
    let signal = Signal::new(1, samples, &params).unwrap();
    assert_eq!(signal.crests().times(), &[2.0]);

    let mut set = SignalSet::new(vec![signal], params).unwrap();
    assert_eq!(set.consolidate_all().unwrap().removed_per_epoch, vec![0, 0]);
}
