//! # lzwpar-lzw: adaptive-dictionary LZW
//!
//! Byte-oriented LZW whose dictionary grows for the whole input without
//! clear codes or resets. Because the dictionary never stops growing, the
//! code width is chosen *after* the scan, from the final dictionary size,
//! and every code in the stream uses that single width.
//!
//! ## Frame format
//!
//! ```text
//! Frame := PackedBits Nbits(u32 LE) BitWidth(u8)
//! ```
//!
//! - `PackedBits`: the codes, MSB-first, `BitWidth` bits each
//! - `Nbits`: meaningful bits in `PackedBits`
//! - `BitWidth`: `ceil(log2(final dictionary size))`
//!
//! ## Example
//!
//! ```rust
//! use lzwpar_lzw::{compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//! let frame = compress(original).unwrap();
//! let decompressed = decompress(&frame).unwrap();
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod dictionary;
mod encoder;
pub mod frame;

pub use config::{DEFAULT_MAX_DICT_SIZE, INITIAL_DICT_SIZE, LzwConfig};
pub use decoder::LzwDecoder;
pub use dictionary::{DecodeDictionary, EncodeDictionary};
pub use encoder::{EncodedCodes, LzwEncoder};
pub use frame::{FRAME_TRAILER_LEN, FrameTrailer};

use lzwpar_core::error::Result;
use lzwpar_core::progress::{NoProgress, ProgressSink};

/// Compress `data` into one frame with the given configuration.
///
/// # Example
///
/// ```rust
/// use lzwpar_lzw::{LzwConfig, compress_with, decompress_with};
///
/// let original = b"Hello, World!";
/// let report = |fraction: f64| assert!((0.0..=1.0).contains(&fraction));
/// let frame = compress_with(original, LzwConfig::DEFAULT, &report).unwrap();
/// let decompressed = decompress_with(&frame, LzwConfig::DEFAULT, &report).unwrap();
/// assert_eq!(decompressed, original);
/// ```
pub fn compress_with(
    data: &[u8],
    config: LzwConfig,
    progress: &dyn ProgressSink,
) -> Result<Vec<u8>> {
    LzwEncoder::new(config)?.encode(data, progress)
}

/// Decompress one frame with the given configuration.
pub fn decompress_with(
    frame: &[u8],
    config: LzwConfig,
    progress: &dyn ProgressSink,
) -> Result<Vec<u8>> {
    LzwDecoder::new(config)?.decode(frame, progress)
}

/// Compress `data` into one frame (default configuration, no progress).
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, LzwConfig::DEFAULT, &NoProgress)
}

/// Decompress one frame (default configuration, no progress).
pub fn decompress(frame: &[u8]) -> Result<Vec<u8>> {
    decompress_with(frame, LzwConfig::DEFAULT, &NoProgress)
}
