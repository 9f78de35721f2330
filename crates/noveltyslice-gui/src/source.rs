//! Audio files standing in for a take's source.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A source file could not be opened.
#[derive(Debug, Error)]
pub enum SourceError {
    /// `hound` rejected the file.
    #[error("failed to open WAV '{path}': {source}")]
    Wav {
        /// Path of the file.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: hound::Error,
    },
}

/// Sample rate declared in a WAV file's header.
pub fn wav_sample_rate(path: impl AsRef<Path>) -> Result<u32, SourceError> {
    let path = path.as_ref();
    let reader = hound::WavReader::open(path).map_err(|source| SourceError::Wav {
        path: path.to_owned(),
        source,
    })?;
    Ok(reader.spec().sample_rate)
}
