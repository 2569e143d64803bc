//! Fixed-width MSB-first bit packing.
//!
//! Every code in one LZW chunk is written with the same bit width, most
//! significant bit first, with no separator between symbols. The final byte
//! is zero-padded, so the exact bit count must travel alongside the bytes:
//! it cannot be recovered from the byte length.
//!
//! # Example
//!
//! ```
//! use lzwpar_core::bitpack::{pack, unpack};
//!
//! let packed = pack(&[0b101, 0b011, 0b111], 3).unwrap();
//! assert_eq!(packed.bytes, vec![0b1010_1111, 0b1000_0000]);
//! assert_eq!(packed.bit_len, 9);
//!
//! let values = unpack(&packed.bytes, packed.bit_len, 3).unwrap();
//! assert_eq!(values, vec![0b101, 0b011, 0b111]);
//! ```

use crate::error::{LzwparError, Result};

/// Widest supported symbol.
pub const MAX_BIT_WIDTH: u8 = 32;

/// Packed symbols plus the number of meaningful bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    /// Packed bytes; the last one may carry zero padding.
    pub bytes: Vec<u8>,
    /// Number of meaningful bits (`count * bit_width`).
    pub bit_len: u64,
}

/// MSB-first bit writer.
#[derive(Debug)]
struct MsbBitWriter {
    output: Vec<u8>,
    /// Bit buffer; valid bits are the low `bits_in_buffer`.
    buffer: u64,
    bits_in_buffer: u8,
}

impl MsbBitWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Write the low `count` bits of `value`. `count` is already validated.
    #[inline]
    fn write_bits(&mut self, value: u32, count: u8) {
        let mask = (1u64 << count) - 1;
        self.buffer = (self.buffer << count) | (value as u64 & mask);
        self.bits_in_buffer += count;

        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.output.push(byte);
            self.bits_in_buffer -= 8;
        }
    }

    /// Flush remaining bits, padding with zeros.
    fn into_vec(mut self) -> Vec<u8> {
        if self.bits_in_buffer > 0 {
            let byte = (self.buffer << (8 - self.bits_in_buffer)) as u8;
            self.output.push(byte);
        }
        self.output
    }
}

/// MSB-first bit reader.
#[derive(Debug)]
struct MsbBitReader<'a> {
    data: &'a [u8],
    byte_pos: usize,
    buffer: u64,
    bits_in_buffer: u8,
}

impl<'a> MsbBitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            buffer: 0,
            bits_in_buffer: 0,
        }
    }

    /// Read `count` bits. The caller guarantees enough input.
    #[inline]
    fn read_bits(&mut self, count: u8) -> u32 {
        while self.bits_in_buffer < count {
            self.buffer = (self.buffer << 8) | self.data[self.byte_pos] as u64;
            self.byte_pos += 1;
            self.bits_in_buffer += 8;
        }

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count) - 1;
        self.bits_in_buffer -= count;
        ((self.buffer >> shift) & mask) as u32
    }
}

fn check_width(bit_width: u8) -> Result<()> {
    if bit_width == 0 || bit_width > MAX_BIT_WIDTH {
        return Err(LzwparError::InvalidBitWidth(bit_width));
    }
    Ok(())
}

/// Number of bytes needed to hold `count` symbols of `bit_width` bits.
pub fn packed_len(count: usize, bit_width: u8) -> usize {
    (count * bit_width as usize).div_ceil(8)
}

/// Smallest bit width able to represent every code below `dict_size`.
///
/// This is `ceil(log2(dict_size))`, clamped to at least one bit.
pub fn bit_width_for(dict_size: usize) -> u8 {
    let max_code = dict_size.saturating_sub(1);
    (usize::BITS - max_code.leading_zeros()).max(1) as u8
}

/// Pack `values` into a zero-initialised buffer, `bit_width` bits each.
///
/// # Errors
///
/// - [`LzwparError::InvalidBitWidth`] if `bit_width` is not in `1..=32`
/// - [`LzwparError::ValueTooWide`] if a value needs more than `bit_width` bits
pub fn pack(values: &[u32], bit_width: u8) -> Result<PackedBits> {
    check_width(bit_width)?;

    if bit_width < MAX_BIT_WIDTH {
        let limit = 1u32 << bit_width;
        if let Some(&value) = values.iter().find(|&&v| v >= limit) {
            return Err(LzwparError::ValueTooWide { value, bit_width });
        }
    }

    let mut writer = MsbBitWriter::with_capacity(packed_len(values.len(), bit_width));
    for &value in values {
        writer.write_bits(value, bit_width);
    }

    Ok(PackedBits {
        bytes: writer.into_vec(),
        bit_len: values.len() as u64 * bit_width as u64,
    })
}

/// Unpack `total_bits / bit_width` symbols from `bytes`.
///
/// # Errors
///
/// - [`LzwparError::InvalidBitWidth`] if `bit_width` is not in `1..=32`
/// - [`LzwparError::TrailingBits`] if `total_bits` is not a multiple of `bit_width`
/// - [`LzwparError::UnexpectedEof`] if `bytes` holds fewer than `total_bits`
pub fn unpack(bytes: &[u8], total_bits: u64, bit_width: u8) -> Result<Vec<u32>> {
    check_width(bit_width)?;

    if total_bits % bit_width as u64 != 0 {
        return Err(LzwparError::TrailingBits {
            total_bits,
            bit_width,
        });
    }

    let needed = usize::try_from(total_bits.div_ceil(8))
        .map_err(|_| LzwparError::unexpected_eof(usize::MAX, bytes.len()))?;
    if bytes.len() < needed {
        return Err(LzwparError::unexpected_eof(needed, bytes.len()));
    }

    let count = (total_bits / bit_width as u64) as usize;
    let mut reader = MsbBitReader::new(&bytes[..needed]);
    Ok((0..count).map(|_| reader.read_bits(bit_width)).collect())
}
