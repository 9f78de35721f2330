//! NoveltySlice Analysis - novelty-based audio segmentation
//!
//! This crate provides the analysis client the REAPER panel constructs:
//!
//! - [`fft`] - FFT wrapper and analysis window
//! - [`stft`] - STFT framing and mel filterbank
//! - [`features`] - Per-frame features (spectrum, MFCC, loudness)
//! - [`novelty`] - Checkerboard-kernel novelty curve over frame self-similarity
//! - [`slicer`] - Novelty smoothing and peak picking
//! - [`param`] - Parameter introspection ([`ParameterInfo`], [`ParamDescriptor`])
//! - [`params`] - The [`NoveltySliceParams`] set
//! - [`client`] - [`NoveltySliceClient`], tying it all together
//!
//! ## Example
//!
//! ```rust
//! use noveltyslice_analysis::{NoveltySliceClient, NoveltySliceParams};
//!
//! let mut params = NoveltySliceParams::default();
//! params.set_threshold(0.3);
//! let client = NoveltySliceClient::new(params);
//!
//! let signal = vec![0.0f32; 48000];
//! let result = client.process(&signal, 48000.0).unwrap();
//! assert!(result.slices.is_empty());
//! ```

pub mod client;
pub mod error;
pub mod features;
pub mod fft;
pub mod novelty;
pub mod param;
pub mod params;
pub mod slicer;
pub mod stft;

pub use client::{NoveltySliceClient, SliceResult};
pub use error::AnalysisError;
pub use fft::Fft;
pub use param::{ParamDescriptor, ParamFlags, ParamId, ParamUnit, ParameterInfo};
pub use params::{NoveltyFeature, NoveltySliceParams};
