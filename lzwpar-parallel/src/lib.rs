//! # lzwpar-parallel: chunked LZW and the container format
//!
//! Splits the input into `workers` contiguous chunks, compresses every chunk
//! with its own independent LZW dictionary on a dedicated thread, and stores
//! the frames in a container that records each frame's size, the chunk count
//! and the original file extension.
//!
//! ## Example
//!
//! ```rust
//! use lzwpar_parallel::{ParallelConfig, RunContext, compress_artifact, decompress_artifact};
//!
//! let ctx = RunContext::new(ParallelConfig::new(4));
//! let artifact = compress_artifact(b"TOBEORNOTTOBEORTOBEORNOT", ".txt", &ctx)
//!     .unwrap()
//!     .into_result()
//!     .unwrap();
//!
//! let ctx = RunContext::new(ParallelConfig::default());
//! let restored = decompress_artifact(&artifact, &ctx).unwrap();
//! assert_eq!(restored.extension, ".txt");
//! assert_eq!(restored.data, b"TOBEORNOTTOBEORTOBEORNOT");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
pub mod container;
mod context;
mod orchestrator;

pub use config::{DEFAULT_WORKERS, MAX_CHUNKS, ParallelConfig, ProgressScope};
pub use container::{SIZE_FIELD_LEN, parse_container, split_artifact, write_container};
pub use context::{ChunkFailure, ErrorSink, RunContext};
pub use orchestrator::{ParallelOutput, parallel_decode, parallel_encode, split_chunks};

use lzwpar_core::error::{LzwparError, Result};

/// A decompressed artifact.
#[derive(Debug)]
pub struct Decompressed {
    /// Joined output of every chunk that decoded.
    pub data: Vec<u8>,
    /// Extension stored with the artifact, leading `.` included, or empty.
    pub extension: String,
    /// Chunks that failed to decode.
    pub failures: Vec<ChunkFailure>,
}

impl Decompressed {
    /// The data, or the first chunk failure as an error.
    pub fn into_result(self) -> Result<(Vec<u8>, String)> {
        match self.failures.into_iter().next() {
            None => Ok((self.data, self.extension)),
            Some(failure) => Err(LzwparError::chunk_failed(failure.index, failure.error)),
        }
    }
}

/// Compress `data` into a complete artifact: container followed by
/// `extension`.
pub fn compress_artifact(
    data: &[u8],
    extension: &str,
    ctx: &RunContext<'_>,
) -> Result<ParallelOutput> {
    container::validate_extension(extension)?;
    let mut output = parallel_encode(data, ctx)?;
    container::append_extension(&mut output.data, extension)?;
    Ok(output)
}

/// Decompress an artifact produced by [`compress_artifact`].
pub fn decompress_artifact(artifact: &[u8], ctx: &RunContext<'_>) -> Result<Decompressed> {
    let (body, extension) = split_artifact(artifact)?;
    let output = parallel_decode(body, ctx)?;
    Ok(Decompressed {
        data: output.data,
        extension,
        failures: output.failures,
    })
}
