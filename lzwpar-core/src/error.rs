//! Error types for lzwpar operations.
//!
//! A single error enum covers bit packing, LZW decoding, container parsing
//! and I/O. [`LzwparError::kind`] classifies an error into a coarse
//! [`ErrorKind`] so a front end can decide how to present it.

use std::io;
use thiserror::Error;

/// The main error type for lzwpar operations.
#[derive(Debug, Error)]
pub enum LzwparError {
    /// I/O error from the file collaborator.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A decoded code is neither in the dictionary nor the next code to be assigned.
    #[error("Bad compressed code: {code} (next dictionary code is {next_code})")]
    BadCompressedCode {
        /// The offending code.
        code: u32,
        /// The code the decoder would have assigned next.
        next_code: u32,
    },

    /// Size table, chunk count or frame trailer inconsistent with the payload.
    #[error("Malformed container: {message}")]
    MalformedContainer {
        /// Description of the inconsistency.
        message: String,
    },

    /// Bit width outside the supported 1..=32 range.
    #[error("Invalid bit width: {0} (must be 1-32)")]
    InvalidBitWidth(u8),

    /// A value does not fit in the requested bit width.
    #[error("Value {value} does not fit in {bit_width} bits")]
    ValueTooWide {
        /// The value that was being packed.
        value: u32,
        /// The bit width it had to fit in.
        bit_width: u8,
    },

    /// The total bit count is not a whole number of symbols.
    #[error("Bit count {total_bits} is not a multiple of bit width {bit_width}")]
    TrailingBits {
        /// Declared total bit count.
        total_bits: u64,
        /// Symbol bit width.
        bit_width: u8,
    },

    /// Input ended before the declared amount of data.
    #[error("Unexpected end of data: need {needed} bytes, have {available}")]
    UnexpectedEof {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// The dictionary reached its configured capacity.
    #[error("Dictionary overflow: limit of {max_size} entries reached")]
    DictionaryOverflow {
        /// Configured maximum dictionary size.
        max_size: usize,
    },

    /// A frame's packed bit count does not fit the 4-byte length field.
    #[error("Frame too large: {bits} bits exceeds the 32-bit bit counter")]
    FrameTooLarge {
        /// Number of bits that would have been written.
        bits: u64,
    },

    /// Chunk count outside 1..=255.
    #[error("Invalid chunk count: {count} (must be 1-255)")]
    InvalidChunkCount {
        /// Requested chunk count.
        count: usize,
    },

    /// Invalid argument supplied by the caller.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },

    /// The worker pool could not be created.
    #[error("Thread pool error: {message}")]
    ThreadPool {
        /// Message from the pool builder.
        message: String,
    },

    /// A single chunk failed while the rest of the job completed.
    #[error("Chunk {index} failed: {source}")]
    ChunkFailed {
        /// Index of the failed chunk.
        index: usize,
        /// Underlying failure.
        #[source]
        source: Box<LzwparError>,
    },
}

/// Coarse classification of an [`LzwparError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Corrupt LZW code stream.
    BadCompressedCode,
    /// Inconsistent container or frame layout.
    MalformedContainer,
    /// Source or destination unavailable.
    Io,
    /// Caller supplied arguments or values outside the contract.
    InvalidInput,
    /// A configured or format limit was reached.
    Limit,
    /// Runtime failure unrelated to the data.
    Internal,
}

/// Result type alias for lzwpar operations.
pub type Result<T> = std::result::Result<T, LzwparError>;

impl LzwparError {
    /// Create a bad compressed code error.
    pub fn bad_code(code: u32, next_code: u32) -> Self {
        Self::BadCompressedCode { code, next_code }
    }

    /// Create a malformed container error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedContainer {
            message: message.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(needed: usize, available: usize) -> Self {
        Self::UnexpectedEof { needed, available }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Wrap an error as the failure of chunk `index`.
    pub fn chunk_failed(index: usize, source: LzwparError) -> Self {
        Self::ChunkFailed {
            index,
            source: Box::new(source),
        }
    }

    /// Classify this error.
    ///
    /// Chunk failures report the kind of their underlying error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::BadCompressedCode { .. } => ErrorKind::BadCompressedCode,
            Self::MalformedContainer { .. }
            | Self::UnexpectedEof { .. }
            | Self::TrailingBits { .. } => ErrorKind::MalformedContainer,
            Self::InvalidBitWidth(_)
            | Self::ValueTooWide { .. }
            | Self::InvalidChunkCount { .. }
            | Self::InvalidArgument { .. } => ErrorKind::InvalidInput,
            Self::DictionaryOverflow { .. } | Self::FrameTooLarge { .. } => ErrorKind::Limit,
            Self::ThreadPool { .. } => ErrorKind::Internal,
            Self::ChunkFailed { source, .. } => source.kind(),
        }
    }
}
