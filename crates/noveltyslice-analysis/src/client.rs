//! The NoveltySlice client: parameters plus the analysis pipeline.

use crate::error::AnalysisError;
use crate::features::FeatureExtractor;
use crate::novelty::{Similarity, novelty_curve};
use crate::params::{NoveltyFeature, NoveltySliceParams};
use crate::slicer::{pick_peaks, smooth};

/// Output of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceResult {
    /// Slice positions in samples, ascending.
    pub slices: Vec<usize>,
    /// Smoothed, normalized novelty curve (one value per frame).
    pub novelty: Vec<f32>,
    /// Hop size used, in samples.
    pub hop_size: usize,
    /// Sample rate of the analyzed signal.
    pub sample_rate: f32,
}

impl SliceResult {
    /// Slice positions in seconds.
    pub fn slice_times(&self) -> Vec<f64> {
        self.slices
            .iter()
            .map(|&s| s as f64 / f64::from(self.sample_rate))
            .collect()
    }
}

/// Novelty-based segmentation client.
///
/// Holds a [`NoveltySliceParams`] set and runs the offline pipeline
/// (framing → features → self-similarity novelty → smoothing → peak picking)
/// on mono buffers.
#[derive(Debug, Clone, Default)]
pub struct NoveltySliceClient {
    params: NoveltySliceParams,
}

impl NoveltySliceClient {
    /// Create a client. Parameters are sanitized on the way in.
    pub fn new(params: NoveltySliceParams) -> Self {
        Self {
            params: params.sanitized(),
        }
    }

    /// Current parameter set.
    pub fn params(&self) -> &NoveltySliceParams {
        &self.params
    }

    /// Mutable parameter set. Use the `ParameterInfo` setters to keep values
    /// within range.
    pub fn params_mut(&mut self) -> &mut NoveltySliceParams {
        &mut self.params
    }

    /// Segment a mono signal.
    ///
    /// Each slice is reported at the centre of the frame where the novelty
    /// peak was found. A signal shorter than one analysis window yields no
    /// slices and an empty novelty curve.
    pub fn process(&self, signal: &[f32], sample_rate: f32) -> Result<SliceResult, AnalysisError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(AnalysisError::InvalidSampleRate(sample_rate));
        }
        if let Some(index) = signal.iter().position(|s| !s.is_finite()) {
            return Err(AnalysisError::NonFiniteInput(index));
        }

        let params = &self.params;
        let extractor = FeatureExtractor::new(params, sample_rate);
        let hop = extractor.hop_size();
        let window = extractor.window_size();

        let frames = extractor.extract(signal);
        let similarity = match params.feature {
            NoveltyFeature::Spectrum => Similarity::Cosine,
            NoveltyFeature::Mfcc | NoveltyFeature::Loudness => Similarity::NegativeDistance,
        };

        let raw = novelty_curve(&frames, params.kernel_size(), similarity);
        let novelty = smooth(&raw, params.filter_size as usize);
        let peaks = pick_peaks(
            &novelty,
            params.threshold,
            params.min_slice_length as usize,
        );

        let slices: Vec<usize> = peaks.iter().map(|&n| n * hop + window / 2).collect();

        tracing::debug!(
            feature = params.feature.name(),
            frames = frames.len(),
            slices = slices.len(),
            "novelty slice analysis complete"
        );

        Ok(SliceResult {
            slices,
            novelty,
            hop_size: hop,
            sample_rate,
        })
    }
}
