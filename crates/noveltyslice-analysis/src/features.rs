//! Per-frame feature extraction.
//!
//! Every feature uses the same framing (window size, hop size) so that frame
//! `n` of any feature describes samples `n * hop .. n * hop + window`.

use crate::params::{NoveltyFeature, NoveltySliceParams};
use crate::stft::{MelFilterbank, StftAnalyzer};

/// Number of mel bands feeding the cepstrum.
const MEL_BANDS: usize = 40;
/// Cepstral coefficients kept per frame.
const MFCC_COEFFS: usize = 13;
/// Floor for log/dB conversions.
const LOUDNESS_FLOOR_DB: f32 = -120.0;

/// Feature matrix `[frame][dimension]`.
pub type FeatureFrames = Vec<Vec<f32>>;

/// Extracts the configured feature from a mono signal.
pub struct FeatureExtractor {
    feature: NoveltyFeature,
    stft: StftAnalyzer,
    sample_rate: f32,
}

impl FeatureExtractor {
    /// Build an extractor for the given parameters and sample rate.
    pub fn new(params: &NoveltySliceParams, sample_rate: f32) -> Self {
        let stft = StftAnalyzer::new(
            params.window_size as usize,
            params.effective_hop_size(),
            params.effective_fft_size(),
        );
        Self {
            feature: params.feature,
            stft,
            sample_rate,
        }
    }

    /// Hop size in samples.
    pub fn hop_size(&self) -> usize {
        self.stft.hop_size()
    }

    /// Window size in samples.
    pub fn window_size(&self) -> usize {
        self.stft.window_size()
    }

    /// Compute one feature vector per analysis frame.
    pub fn extract(&self, signal: &[f32]) -> FeatureFrames {
        match self.feature {
            NoveltyFeature::Spectrum => self.stft.analyze(signal).data,
            NoveltyFeature::Mfcc => self.mfcc(signal),
            NoveltyFeature::Loudness => self.loudness(signal),
        }
    }

    fn mfcc(&self, signal: &[f32]) -> FeatureFrames {
        let spectrogram = self.stft.analyze(signal);
        let max_freq = (self.sample_rate / 2.0).min(20000.0);
        let bank = MelFilterbank::new(
            spectrogram.num_bins(),
            MEL_BANDS,
            self.sample_rate,
            20.0,
            max_freq,
        );

        spectrogram
            .data
            .iter()
            .map(|frame| {
                let log_mel: Vec<f32> = bank
                    .apply(frame)
                    .iter()
                    .map(|&e| (e.max(1e-10)).ln())
                    .collect();
                dct_ii(&log_mel, MFCC_COEFFS)
            })
            .collect()
    }

    fn loudness(&self, signal: &[f32]) -> FeatureFrames {
        let window = self.window_size();
        let hop = self.hop_size();
        (0..self.stft.frame_count(signal.len()))
            .map(|n| {
                let frame = &signal[n * hop..n * hop + window];
                let mean_sq = frame.iter().map(|x| x * x).sum::<f32>() / window as f32;
                let peak = frame.iter().fold(0.0f32, |m, x| m.max(x.abs()));
                vec![to_db(mean_sq.sqrt()), to_db(peak)]
            })
            .collect()
    }
}

fn to_db(amplitude: f32) -> f32 {
    if amplitude <= 0.0 {
        LOUDNESS_FLOOR_DB
    } else {
        (20.0 * amplitude.log10()).max(LOUDNESS_FLOOR_DB)
    }
}

/// Unnormalized DCT-II, first `count` coefficients.
fn dct_ii(input: &[f32], count: usize) -> Vec<f32> {
    let n = input.len() as f32;
    (0..count.min(input.len()))
        .map(|k| {
            input
                .iter()
                .enumerate()
                .map(|(i, &x)| {
                    x * (std::f32::consts::PI * k as f32 * (i as f32 + 0.5) / n).cos()
                })
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(feature: NoveltyFeature) -> NoveltySliceParams {
        NoveltySliceParams {
            feature,
            ..Default::default()
        }
    }

    #[test]
    fn dimensions_per_feature() {
        let signal = vec![0.25f32; 4096];
        let spectrum = FeatureExtractor::new(&params(NoveltyFeature::Spectrum), 48000.0)
            .extract(&signal);
        let mfcc = FeatureExtractor::new(&params(NoveltyFeature::Mfcc), 48000.0).extract(&signal);
        let loud =
            FeatureExtractor::new(&params(NoveltyFeature::Loudness), 48000.0).extract(&signal);

        // (4096 - 1024) / 512 + 1
        assert_eq!(spectrum.len(), 7);
        assert_eq!(mfcc.len(), 7);
        assert_eq!(loud.len(), 7);
        assert_eq!(spectrum[0].len(), 513);
        assert_eq!(mfcc[0].len(), MFCC_COEFFS);
        assert_eq!(loud[0].len(), 2);
    }

    #[test]
    fn loudness_of_constant_signal() {
        let signal = vec![0.5f32; 2048];
        let loud =
            FeatureExtractor::new(&params(NoveltyFeature::Loudness), 48000.0).extract(&signal);
        let expected = 20.0 * 0.5f32.log10();
        assert!((loud[0][0] - expected).abs() < 1e-3);
        assert!((loud[0][1] - expected).abs() < 1e-3);
    }

    #[test]
    fn silence_hits_loudness_floor() {
        let loud = FeatureExtractor::new(&params(NoveltyFeature::Loudness), 48000.0)
            .extract(&[0.0; 1024]);
        assert_eq!(loud, vec![vec![LOUDNESS_FLOOR_DB, LOUDNESS_FLOOR_DB]]);
    }

    #[test]
    fn dct_of_constant_is_dc_only() {
        let out = dct_ii(&[1.0; 8], 4);
        assert!((out[0] - 8.0).abs() < 1e-4);
        for c in &out[1..] {
            assert!(c.abs() < 1e-4);
        }
    }
}
