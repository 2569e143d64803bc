//! Per-chunk frame layout.
//!
//! ```text
//! Frame := PackedBits Nbits(u32 LE) BitWidth(u8)
//! ```
//!
//! `Nbits` is the exact number of meaningful bits in `PackedBits`; the last
//! byte may be padded. `BitWidth` is the width of every code in the frame.

use lzwpar_core::bitpack::PackedBits;
use lzwpar_core::error::{LzwparError, Result};
use lzwpar_core::read_u32_le;

/// Length of the `(nbits, bit_width)` trailer.
pub const FRAME_TRAILER_LEN: usize = 5;

/// Metadata appended after a frame's packed bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTrailer {
    /// Meaningful bits in the payload.
    pub nbits: u32,
    /// Width of each code.
    pub bit_width: u8,
}

impl FrameTrailer {
    /// Append the trailer to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.nbits.to_le_bytes());
        out.push(self.bit_width);
    }

    /// Number of payload bytes this trailer describes.
    pub fn payload_len(&self) -> usize {
        (self.nbits as usize).div_ceil(8)
    }
}

/// Assemble a frame from packed codes.
///
/// Fails with [`LzwparError::FrameTooLarge`] if the bit count does not fit
/// the 32-bit trailer field.
pub fn build_frame(packed: PackedBits, bit_width: u8) -> Result<Vec<u8>> {
    let nbits = u32::try_from(packed.bit_len).map_err(|_| LzwparError::FrameTooLarge {
        bits: packed.bit_len,
    })?;

    let mut frame = packed.bytes;
    frame.reserve_exact(FRAME_TRAILER_LEN);
    FrameTrailer { nbits, bit_width }.write_to(&mut frame);
    Ok(frame)
}

/// Split a frame into its payload and trailer.
pub fn split_frame(frame: &[u8]) -> Result<(&[u8], FrameTrailer)> {
    let Some(payload_end) = frame.len().checked_sub(FRAME_TRAILER_LEN) else {
        return Err(LzwparError::malformed(format!(
            "frame of {} bytes is shorter than its {FRAME_TRAILER_LEN}-byte trailer",
            frame.len()
        )));
    };

    let (payload, tail) = frame.split_at(payload_end);
    let nbits = read_u32_le(tail).ok_or_else(|| LzwparError::unexpected_eof(4, tail.len()))?;
    let trailer = FrameTrailer {
        nbits,
        bit_width: tail[4],
    };

    if payload.len() != trailer.payload_len() {
        return Err(LzwparError::malformed(format!(
            "frame payload is {} bytes but trailer declares {} bits",
            payload.len(),
            nbits
        )));
    }

    Ok((payload, trailer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lzwpar_core::bitpack::pack;

    #[test]
    fn test_trailer_layout() {
        let frame = build_frame(pack(&[65, 256], 9).unwrap(), 9).unwrap();
        assert_eq!(frame.len(), 3 + FRAME_TRAILER_LEN);
        assert_eq!(&frame[3..], &[18, 0, 0, 0, 9]);

        let (payload, trailer) = split_frame(&frame).unwrap();
        assert_eq!(payload, &frame[..3]);
        assert_eq!(
            trailer,
            FrameTrailer {
                nbits: 18,
                bit_width: 9
            }
        );
    }

    #[test]
    fn test_empty_frame() {
        let frame = build_frame(pack(&[], 8).unwrap(), 8).unwrap();
        assert_eq!(frame, vec![0, 0, 0, 0, 8]);
        let (payload, trailer) = split_frame(&frame).unwrap();
        assert!(payload.is_empty());
        assert_eq!(trailer.nbits, 0);
    }

    #[test]
    fn test_short_frame_rejected() {
        let err = split_frame(&[0, 0, 8]).unwrap_err();
        assert!(matches!(err, LzwparError::MalformedContainer { .. }));
    }

    #[test]
    fn test_payload_mismatch_rejected() {
        // Trailer claims 18 bits (3 bytes) but only 2 payload bytes precede it.
        let err = split_frame(&[0xAA, 0xBB, 18, 0, 0, 0, 9]).unwrap_err();
        assert!(matches!(err, LzwparError::MalformedContainer { .. }));
    }
}
