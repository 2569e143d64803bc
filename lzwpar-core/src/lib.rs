//! # lzwpar core
//!
//! Building blocks shared by the lzwpar crates:
//!
//! - [`bitpack`]: fixed-width MSB-first packing of integer codes
//! - [`progress`]: progress reporting sinks
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI: lzwpar compress / decompress                       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Container: chunk orchestration, size table, extension   │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec: LZW encoder/decoder, per-chunk frame trailer     │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate): BitPacker, progress, errors          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use lzwpar_core::bitpack::{pack, unpack};
//!
//! let codes = [65u32, 256, 257, 256];
//! let packed = pack(&codes, 9).unwrap();
//! assert_eq!(packed.bit_len, 36);
//! assert_eq!(packed.bytes.len(), 5);
//!
//! let unpacked = unpack(&packed.bytes, packed.bit_len, 9).unwrap();
//! assert_eq!(unpacked, codes);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitpack;
pub mod error;
pub mod progress;

pub use bitpack::{PackedBits, bit_width_for, pack, packed_len, unpack};
pub use error::{ErrorKind, LzwparError, Result};
pub use progress::{NoProgress, ProgressSink};

/// Read a little-endian `u32` from the first four bytes of `bytes`.
///
/// Returns `None` if fewer than four bytes are available.
pub fn read_u32_le(bytes: &[u8]) -> Option<u32> {
    let raw: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
    Some(u32::from_le_bytes(raw))
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitpack::{PackedBits, pack, unpack};
    pub use crate::error::{ErrorKind, LzwparError, Result};
    pub use crate::progress::ProgressSink;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u32_le() {
        assert_eq!(read_u32_le(&[0x78, 0x56, 0x34, 0x12]), Some(0x1234_5678));
        assert_eq!(read_u32_le(&[1, 0, 0, 0, 0xFF]), Some(1));
        assert_eq!(read_u32_le(&[1, 2, 3]), None);
    }
}
