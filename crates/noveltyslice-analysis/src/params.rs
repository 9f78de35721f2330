//! NoveltySlice parameter set.

use serde::{Deserialize, Serialize};

use crate::param::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};

/// Per-frame feature the novelty curve is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoveltyFeature {
    /// Magnitude spectrum.
    #[default]
    Spectrum,
    /// Mel-frequency cepstral coefficients.
    Mfcc,
    /// Frame loudness in dB.
    Loudness,
}

impl NoveltyFeature {
    /// All features, in parameter-index order.
    pub const ALL: [NoveltyFeature; 3] = [
        NoveltyFeature::Spectrum,
        NoveltyFeature::Mfcc,
        NoveltyFeature::Loudness,
    ];

    /// Feature for a stepped parameter value.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// Stepped parameter value of this feature.
    pub fn index(self) -> usize {
        match self {
            NoveltyFeature::Spectrum => 0,
            NoveltyFeature::Mfcc => 1,
            NoveltyFeature::Loudness => 2,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            NoveltyFeature::Spectrum => "Spectrum",
            NoveltyFeature::Mfcc => "MFCC",
            NoveltyFeature::Loudness => "Loudness",
        }
    }
}

const FEATURE: usize = 0;
const KERNEL_SIZE: usize = 1;
const THRESHOLD: usize = 2;
const FILTER_SIZE: usize = 3;
const MIN_SLICE_LENGTH: usize = 4;
const WINDOW_SIZE: usize = 5;
const HOP_SIZE: usize = 6;
const FFT_SIZE: usize = 7;

const DESCRIPTORS: [ParamDescriptor; 8] = [
    ParamDescriptor::integer("Feature", "Feature", ParamUnit::None, 0.0, 2.0, 0.0)
        .with_id(ParamId(100), "feature"),
    ParamDescriptor::integer("Kernel Size", "Kernel", ParamUnit::Frames, 3.0, 101.0, 3.0)
        .with_id(ParamId(101), "kernel_size")
        .with_flags(ParamFlags::ODD_ONLY),
    ParamDescriptor::continuous("Threshold", "Thresh", 0.0, 1.0, 0.5)
        .with_id(ParamId(102), "threshold"),
    ParamDescriptor::integer("Filter Size", "Filter", ParamUnit::Frames, 1.0, 31.0, 1.0)
        .with_id(ParamId(103), "filter_size")
        .with_flags(ParamFlags::ODD_ONLY),
    ParamDescriptor::integer("Min Slice Length", "MinSlice", ParamUnit::Frames, 2.0, 1000.0, 2.0)
        .with_id(ParamId(104), "min_slice_length"),
    ParamDescriptor::integer("Window Size", "Window", ParamUnit::Samples, 64.0, 16384.0, 1024.0)
        .with_id(ParamId(105), "window_size"),
    // 0 selects half the window size.
    ParamDescriptor::integer("Hop Size", "Hop", ParamUnit::Samples, 0.0, 16384.0, 0.0)
        .with_id(ParamId(106), "hop_size")
        .with_flags(ParamFlags::HIDDEN),
    // 0 selects the next power of two at or above the window size.
    ParamDescriptor::integer("FFT Size", "FFT", ParamUnit::Samples, 0.0, 32768.0, 0.0)
        .with_id(ParamId(107), "fft_size")
        .with_flags(ParamFlags::HIDDEN),
];

/// Parameters of a [`NoveltySliceClient`](crate::NoveltySliceClient).
///
/// Serializes as a flat TOML/JSON table keyed by each descriptor's
/// `string_id`. Values read from a file go through [`sanitized`](Self::sanitized)
/// before use so out-of-range entries are clamped like GUI edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoveltySliceParams {
    /// Feature the novelty curve is computed from.
    pub feature: NoveltyFeature,
    /// Checkerboard kernel size in frames (odd).
    pub kernel_size: u32,
    /// Detection threshold on the normalized novelty curve.
    pub threshold: f32,
    /// Moving-average length applied to the novelty curve, in frames (odd).
    pub filter_size: u32,
    /// Minimum distance between slices, in frames.
    pub min_slice_length: u32,
    /// Analysis window size in samples.
    pub window_size: u32,
    /// Hop size in samples (0 = window / 2).
    pub hop_size: u32,
    /// FFT size in samples (0 = next power of two ≥ window).
    pub fft_size: u32,
}

impl Default for NoveltySliceParams {
    fn default() -> Self {
        Self {
            feature: NoveltyFeature::Spectrum,
            kernel_size: 3,
            threshold: 0.5,
            filter_size: 1,
            min_slice_length: 2,
            window_size: 1024,
            hop_size: 0,
            fft_size: 0,
        }
    }
}

impl NoveltySliceParams {
    /// Descriptor table, in index order.
    pub fn descriptors() -> &'static [ParamDescriptor] {
        &DESCRIPTORS
    }

    /// Re-apply every descriptor's clamping rules.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();
        for i in 0..out.param_count() {
            let v = self.get_param(i);
            out.set_param(i, v);
        }
        out
    }

    /// Hop size after resolving the `0 = window / 2` default.
    pub fn effective_hop_size(&self) -> usize {
        if self.hop_size == 0 {
            (self.window_size as usize / 2).max(1)
        } else {
            self.hop_size as usize
        }
    }

    /// FFT size after resolving the `0 = auto` default.
    pub fn effective_fft_size(&self) -> usize {
        let window = self.window_size as usize;
        if (self.fft_size as usize) < window {
            window.next_power_of_two()
        } else {
            self.fft_size as usize
        }
    }

    /// Kernel size as a frame count.
    pub fn kernel_size(&self) -> usize {
        self.kernel_size as usize
    }

    /// Set the kernel size (clamped, snapped odd).
    pub fn set_kernel_size(&mut self, frames: u32) {
        self.set_param(KERNEL_SIZE, frames as f32);
    }

    /// Set the detection threshold (clamped to 0..=1).
    pub fn set_threshold(&mut self, threshold: f32) {
        self.set_param(THRESHOLD, threshold);
    }
}

impl ParameterInfo for NoveltySliceParams {
    fn param_count(&self) -> usize {
        DESCRIPTORS.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        DESCRIPTORS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            FEATURE => self.feature.index() as f32,
            KERNEL_SIZE => self.kernel_size as f32,
            THRESHOLD => self.threshold,
            FILTER_SIZE => self.filter_size as f32,
            MIN_SLICE_LENGTH => self.min_slice_length as f32,
            WINDOW_SIZE => self.window_size as f32,
            HOP_SIZE => self.hop_size as f32,
            FFT_SIZE => self.fft_size as f32,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let Some(desc) = DESCRIPTORS.get(index) else {
            return;
        };
        let v = desc.clamp(value);
        match index {
            FEATURE => self.feature = NoveltyFeature::from_index(v as usize),
            KERNEL_SIZE => self.kernel_size = v as u32,
            THRESHOLD => self.threshold = v,
            FILTER_SIZE => self.filter_size = v as u32,
            MIN_SLICE_LENGTH => self.min_slice_length = v as u32,
            WINDOW_SIZE => self.window_size = v as u32,
            HOP_SIZE => self.hop_size = v as u32,
            FFT_SIZE => self.fft_size = v as u32,
            _ => {}
        }
    }
}
