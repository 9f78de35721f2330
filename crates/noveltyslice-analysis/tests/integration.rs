//! Integration tests for noveltyslice-analysis.
//!
//! Each test builds a signal with one known change point and checks that the
//! client reports a single slice close to it.

use std::f32::consts::PI;

use noveltyslice_analysis::{
    NoveltyFeature, NoveltySliceClient, NoveltySliceParams, ParameterInfo,
};

const SAMPLE_RATE: f32 = 48000.0;
const CHANGE_AT: usize = 48000;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn tone(freq_hz: f32, amplitude: f32, range: std::ops::Range<usize>) -> impl Iterator<Item = f32> {
    range.map(move |i| amplitude * (2.0 * PI * freq_hz * i as f32 / SAMPLE_RATE).sin())
}

/// One second of 440 Hz followed by one second of 3 kHz.
fn pitch_change() -> Vec<f32> {
    tone(440.0, 0.5, 0..CHANGE_AT)
        .chain(tone(3000.0, 0.5, CHANGE_AT..2 * CHANGE_AT))
        .collect()
}

/// One second of a quiet 440 Hz tone followed by one second of a loud one.
fn level_change() -> Vec<f32> {
    tone(440.0, 0.02, 0..CHANGE_AT)
        .chain(tone(440.0, 0.8, CHANGE_AT..2 * CHANGE_AT))
        .collect()
}

fn client(feature: NoveltyFeature) -> NoveltySliceClient {
    let mut params = NoveltySliceParams {
        feature,
        min_slice_length: 20,
        ..Default::default()
    };
    params.set_kernel_size(9);
    params.set_threshold(0.5);
    NoveltySliceClient::new(params)
}

fn assert_single_slice_near_change(slices: &[usize]) {
    assert_eq!(slices.len(), 1, "expected one slice, got {slices:?}");
    let distance = slices[0].abs_diff(CHANGE_AT);
    assert!(
        distance <= 1024,
        "slice at {} is {distance} samples from the change",
        slices[0]
    );
}

// ===========================================================================
// Features
// ===========================================================================

#[test]
fn spectrum_finds_pitch_change() {
    let result = client(NoveltyFeature::Spectrum)
        .process(&pitch_change(), SAMPLE_RATE)
        .unwrap();
    assert_single_slice_near_change(&result.slices);
}

#[test]
fn mfcc_finds_pitch_change() {
    let result = client(NoveltyFeature::Mfcc)
        .process(&pitch_change(), SAMPLE_RATE)
        .unwrap();
    assert_single_slice_near_change(&result.slices);
}

#[test]
fn loudness_finds_level_change() {
    let result = client(NoveltyFeature::Loudness)
        .process(&level_change(), SAMPLE_RATE)
        .unwrap();
    assert_single_slice_near_change(&result.slices);
}

// ===========================================================================
// Parameters
// ===========================================================================

#[test]
fn full_threshold_suppresses_all_slices() {
    let mut client = client(NoveltyFeature::Spectrum);
    client.params_mut().set_threshold(1.0);
    let result = client.process(&pitch_change(), SAMPLE_RATE).unwrap();
    assert!(result.slices.is_empty());
}

#[test]
fn novelty_curve_is_normalized() {
    let result = client(NoveltyFeature::Spectrum)
        .process(&pitch_change(), SAMPLE_RATE)
        .unwrap();
    let max = result.novelty.iter().fold(0.0f32, |m, &v| m.max(v));
    assert!((max - 1.0).abs() < 1e-5);
    assert!(result.novelty.iter().all(|&v| (0.0..=1.0).contains(&v)));
    // (96000 - 1024) / 512 + 1
    assert_eq!(result.novelty.len(), 186);
}

#[test]
fn param_edits_through_parameter_info() {
    let mut client = NoveltySliceClient::default();
    let index = client.params().find_param("kernel_size").unwrap();
    client.params_mut().set_param(index, 12.0);
    assert_eq!(client.params().kernel_size, 13);

    let desc = client.params().param_info(index).unwrap();
    assert_eq!(desc.format_value(13.0), "13 frames");
}

#[test]
fn params_roundtrip_through_toml() {
    let params = NoveltySliceParams {
        feature: NoveltyFeature::Mfcc,
        kernel_size: 11,
        threshold: 0.25,
        ..Default::default()
    };
    let text = toml::to_string(&params).unwrap();
    assert!(text.contains("feature = \"mfcc\""));
    let back: NoveltySliceParams = toml::from_str(&text).unwrap();
    assert_eq!(back, params);

    // Missing keys fall back to defaults.
    let partial: NoveltySliceParams = toml::from_str("threshold = 0.1").unwrap();
    assert_eq!(partial.kernel_size, 3);
    assert_eq!(partial.threshold, 0.1);
}
