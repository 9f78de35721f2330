//! STFT framing and mel filterbank
//!
//! Splits a signal into overlapping windowed frames and returns per-frame
//! magnitude spectra. The mel filterbank feeds the MFCC feature.

use crate::fft::{Fft, hann};

/// Per-frame magnitude spectra `[frame][bin]`.
#[derive(Debug, Clone)]
pub struct Spectrogram {
    /// 2D magnitude data `[time_frame][frequency_bin]`
    pub data: Vec<Vec<f32>>,
    /// FFT size used
    pub fft_size: usize,
}

impl Spectrogram {
    /// Number of frequency bins (fft_size / 2 + 1)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }
}

/// STFT (Short-Time Fourier Transform) analyzer
pub struct StftAnalyzer {
    window_size: usize,
    hop_size: usize,
    fft: Fft,
    window_coeffs: Vec<f32>,
}

impl StftAnalyzer {
    /// Create a Hann-windowed STFT analyzer.
    ///
    /// An `fft_size` below `window_size` is raised to it; frames are
    /// zero-padded up to the FFT size.
    pub fn new(window_size: usize, hop_size: usize, fft_size: usize) -> Self {
        Self {
            window_size,
            hop_size: hop_size.max(1),
            fft: Fft::new(fft_size.max(window_size)),
            window_coeffs: hann(window_size),
        }
    }

    /// Number of full frames that fit in a signal of `len` samples.
    pub fn frame_count(&self, len: usize) -> usize {
        if len >= self.window_size {
            (len - self.window_size) / self.hop_size + 1
        } else {
            0
        }
    }

    /// Compute the magnitude spectrogram of `signal`.
    pub fn analyze(&self, signal: &[f32]) -> Spectrogram {
        let num_frames = self.frame_count(signal.len());
        let mut data = Vec::with_capacity(num_frames);

        for frame_idx in 0..num_frames {
            let start = frame_idx * self.hop_size;
            let mut frame = signal[start..start + self.window_size].to_vec();

            for (sample, &coeff) in frame.iter_mut().zip(self.window_coeffs.iter()) {
                *sample *= coeff;
            }

            data.push(self.fft.magnitudes(&frame));
        }

        Spectrogram {
            data,
            fft_size: self.fft.size(),
        }
    }

    /// Hop size in samples
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Window size in samples
    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

/// Mel filterbank for converting linear spectra to mel scale
pub struct MelFilterbank {
    filters: Vec<Vec<f32>>,
}

impl MelFilterbank {
    /// Create a mel filterbank
    ///
    /// # Arguments
    /// * `num_fft_bins` - Number of FFT bins (fft_size / 2 + 1)
    /// * `num_mel_bins` - Number of mel bands
    /// * `sample_rate` - Sample rate in Hz
    /// * `min_freq` - Lowest band edge (Hz)
    /// * `max_freq` - Highest band edge (Hz)
    pub fn new(
        num_fft_bins: usize,
        num_mel_bins: usize,
        sample_rate: f32,
        min_freq: f32,
        max_freq: f32,
    ) -> Self {
        let fft_size = (num_fft_bins - 1) * 2;
        let mel_min = hz_to_mel(min_freq);
        let mel_max = hz_to_mel(max_freq);

        let bin_points: Vec<usize> = (0..=num_mel_bins + 1)
            .map(|i| mel_min + (mel_max - mel_min) * i as f32 / (num_mel_bins + 1) as f32)
            .map(mel_to_hz)
            .map(|f| ((fft_size as f32 + 1.0) * f / sample_rate).floor() as usize)
            .collect();

        let mut filters = vec![vec![0.0; num_fft_bins]; num_mel_bins];

        for (m, filter) in filters.iter_mut().enumerate() {
            let left = bin_points[m];
            let center = bin_points[m + 1];
            let right = bin_points[m + 2];

            if center > left {
                for (k, val) in filter
                    .iter_mut()
                    .enumerate()
                    .take(center.min(num_fft_bins))
                    .skip(left)
                {
                    *val = (k - left) as f32 / (center - left) as f32;
                }
            }

            if right > center {
                for (k, val) in filter
                    .iter_mut()
                    .enumerate()
                    .take(right.min(num_fft_bins))
                    .skip(center)
                {
                    *val = (right - k) as f32 / (right - center) as f32;
                }
            }
        }

        Self { filters }
    }

    /// Apply filterbank to a linear magnitude spectrum
    pub fn apply(&self, spectrum: &[f32]) -> Vec<f32> {
        self.filters
            .iter()
            .map(|filter| filter.iter().zip(spectrum).map(|(&f, &s)| f * s).sum())
            .collect()
    }
}

fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10.0_f32.powf(mel / 2595.0) - 1.0)
}
