use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressionError {
    /// Encoder failed while writing or finishing the stream.
    CompressFailed { msg: String },

    /// Input is not a valid raw DEFLATE stream (or ends early).
    DecompressFailed { msg: String },

    /// Inflated output exceeded the configured bound.
    OutputTooLarge { max: usize },
}

impl fmt::Display for CompressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CompressionError::*;
        match self {
            CompressFailed { msg } =>
                write!(f, "error compressing: {}", msg),
            DecompressFailed { msg } =>
                write!(f, "error decompressing: {}", msg),
            OutputTooLarge { max } =>
                write!(f, "decompressed output exceeds {} bytes", max),
        }
    }
}

impl std::error::Error for CompressionError {}

