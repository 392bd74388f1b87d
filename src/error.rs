//! Error handling for DeckFX
//!
//! The DSP hot path never returns errors: out-of-range values are clamped at
//! the effect setters and degrade gracefully, as real-time processing
//! requires. `DeckFxError` covers the edges only: file I/O, parameter
//! snapshot (de)serialization, and snapshot validation.

use thiserror::Error;

/// Result type alias for DeckFX operations
pub type Result<T> = std::result::Result<T, DeckFxError>;

/// Main error type for DeckFX operations
#[derive(Error, Debug)]
pub enum DeckFxError {
    #[error("Invalid parameter {param}: got {value}, expected {expected}")]
    InvalidParameter {
        param: String,
        value: String,
        expected: String,
    },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio { reason: String },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Audio contains no samples")]
    EmptyAudio,

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = DeckFxError::InvalidParameter {
            param: "filter_cutoff".to_string(),
            value: "-5".to_string(),
            expected: "20-20000 Hz".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("filter_cutoff"));
        assert!(msg.contains("20-20000 Hz"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DeckFxError = io.into();
        assert!(matches!(err, DeckFxError::Io(_)));
    }
}
