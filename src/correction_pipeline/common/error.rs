use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorrectionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported media kind: {0}")]
    UnsupportedMediaKind(String),

    #[error("Timed out decoding frame at {time:.3}s")]
    DecodeTimeout { time: f64 },

    #[error("Failed to seek to {time:.3}s: {reason}")]
    SeekFailed { time: f64, reason: String },

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CorrectionError {
    /// Failures of a single video sample that the sampler absorbs by repeating
    /// the last good matrix instead of aborting the whole sequence.
    pub fn is_recoverable_sample_failure(&self) -> bool {
        matches!(
            self,
            CorrectionError::DecodeTimeout { .. } | CorrectionError::SeekFailed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CorrectionError>;
