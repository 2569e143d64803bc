//! LZW encoder (compression).

use crate::config::LzwConfig;
use crate::dictionary::EncodeDictionary;
use crate::frame::build_frame;
use lzwpar_core::bitpack::{bit_width_for, pack};
use lzwpar_core::error::Result;
use lzwpar_core::progress::{Cadence, ProgressSink};

/// Codes emitted for one input plus the final dictionary size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedCodes {
    /// Emitted codes, in order.
    pub codes: Vec<u32>,
    /// Dictionary size after the last insertion, seed included.
    pub dict_size: usize,
}

impl EncodedCodes {
    /// Width used to serialise every code: `ceil(log2(dict_size))`.
    pub fn bit_width(&self) -> u8 {
        bit_width_for(self.dict_size)
    }
}

/// LZW encoder for compression.
///
/// Each call to [`encode`](Self::encode) runs an independent session with a
/// fresh dictionary.
#[derive(Debug, Clone)]
pub struct LzwEncoder {
    config: LzwConfig,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run LZW over `input` and return the emitted codes.
    ///
    /// # Algorithm
    ///
    /// 1. Seed the dictionary with the 256 single bytes
    /// 2. Extend the current sequence byte by byte while it stays in the dictionary
    /// 3. On a miss, emit the current sequence, add the extended one at the
    ///    next code, and restart from the missing byte
    /// 4. Emit whatever remains at the end
    ///
    /// Progress is reported about every third of the input and once with
    /// `1.0` at the end.
    pub fn encode_codes(
        &self,
        input: &[u8],
        progress: &dyn ProgressSink,
    ) -> Result<EncodedCodes> {
        let mut dict = EncodeDictionary::new(self.config);
        let mut codes = Vec::new();
        let cadence = Cadence::new(input.len());

        // Code of the sequence matched so far
        let mut current: Option<u32> = None;

        for (i, &byte) in input.iter().enumerate() {
            current = Some(match current {
                None => byte as u32,
                Some(prefix) => match dict.find(prefix, byte) {
                    Some(code) => code,
                    None => {
                        codes.push(prefix);
                        dict.insert(prefix, byte)?;
                        byte as u32
                    }
                },
            });

            if let Some(fraction) = cadence.at(i + 1) {
                progress.report(fraction);
            }
        }

        if let Some(code) = current {
            codes.push(code);
        }

        progress.report(1.0);

        Ok(EncodedCodes {
            codes,
            dict_size: dict.len(),
        })
    }

    /// Encode `input` into a frame: packed codes plus `(nbits, bit_width)` trailer.
    ///
    /// The bit width is only known once the whole input has been scanned, so
    /// packing happens after encoding.
    pub fn encode(&self, input: &[u8], progress: &dyn ProgressSink) -> Result<Vec<u8>> {
        let encoded = self.encode_codes(input, progress)?;
        let bit_width = encoded.bit_width();
        let packed = pack(&encoded.codes, bit_width)?;
        build_frame(packed, bit_width)
    }
}
