//! LZW decoder (decompression).

use crate::config::LzwConfig;
use crate::dictionary::DecodeDictionary;
use crate::frame::split_frame;
use lzwpar_core::bitpack::unpack;
use lzwpar_core::error::{LzwparError, Result};
use lzwpar_core::progress::{Cadence, ProgressSink};

/// LZW decoder for decompression.
///
/// Each call to [`decode`](Self::decode) runs an independent session with a
/// fresh dictionary.
#[derive(Debug, Clone)]
pub struct LzwDecoder {
    config: LzwConfig,
}

impl LzwDecoder {
    /// Create a new LZW decoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Rebuild the original bytes from a code sequence.
    ///
    /// The dictionary grows by `previous + first byte of current` after every
    /// code but the first, mirroring the encoder's insertions. A code equal
    /// to the next unassigned code is the self-referencing case (`cScSc`)
    /// and resolves to `previous + previous[0]`. Any other unknown code fails
    /// with [`LzwparError::BadCompressedCode`].
    pub fn decode_codes(&self, codes: &[u32], progress: &dyn ProgressSink) -> Result<Vec<u8>> {
        let Some((&first, rest)) = codes.split_first() else {
            progress.report(1.0);
            return Ok(Vec::new());
        };

        let mut dict = DecodeDictionary::new(self.config);
        let cadence = Cadence::new(codes.len());

        let mut previous = dict
            .get(first)
            .ok_or_else(|| LzwparError::bad_code(first, dict.next_code()))?
            .to_vec();
        let mut output = previous.clone();
        if let Some(fraction) = cadence.at(1) {
            progress.report(fraction);
        }

        for (i, &code) in rest.iter().enumerate() {
            let entry = match dict.get(code) {
                Some(entry) => entry.to_vec(),
                None if code == dict.next_code() => {
                    let mut entry = previous.clone();
                    entry.push(previous[0]);
                    entry
                }
                None => return Err(LzwparError::bad_code(code, dict.next_code())),
            };

            output.extend_from_slice(&entry);

            let mut new_entry = previous;
            new_entry.push(entry[0]);
            dict.push(new_entry)?;
            previous = entry;

            if let Some(fraction) = cadence.at(i + 2) {
                progress.report(fraction);
            }
        }

        progress.report(1.0);
        Ok(output)
    }

    /// Decode one frame: strip the trailer, unpack the codes, run LZW.
    pub fn decode(&self, frame: &[u8], progress: &dyn ProgressSink) -> Result<Vec<u8>> {
        let (payload, trailer) = split_frame(frame)?;
        let codes = unpack(payload, trailer.nbits as u64, trailer.bit_width)?;
        self.decode_codes(&codes, progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::LzwEncoder;
    use lzwpar_core::bitpack::pack;
    use lzwpar_core::progress::NoProgress;
    use std::sync::Mutex;

    fn decoder() -> LzwDecoder {
        LzwDecoder::new(LzwConfig::DEFAULT).unwrap()
    }

    #[test]
    fn test_decode_eight_a() {
        let output = decoder()
            .decode_codes(&[65, 256, 257, 256], &NoProgress)
            .unwrap();
        assert_eq!(output, b"AAAAAAAA");
    }

    #[test]
    fn test_decode_self_reference() {
        // ABABABA -> 65 66 256 258, where 258 is used before it is defined
        let output = decoder()
            .decode_codes(&[65, 66, 256, 258], &NoProgress)
            .unwrap();
        assert_eq!(output, b"ABABABA");
    }

    #[test]
    fn test_decode_empty() {
        assert!(decoder().decode_codes(&[], &NoProgress).unwrap().is_empty());
        assert!(
            decoder()
                .decode(&[0, 0, 0, 0, 8], &NoProgress)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_progress_cadence() {
        let codes: Vec<u32> = (0..9).collect();
        let seen = Mutex::new(Vec::new());
        let sink = |f: f64| seen.lock().unwrap().push(f);
        decoder().decode_codes(&codes, &sink).unwrap();

        let seen = seen.into_inner().unwrap();
        assert_eq!(seen.len(), 4);
        assert!((seen[0] - 1.0 / 3.0).abs() < 1e-9);
        assert!((seen[1] - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(seen[2], 1.0);
        assert_eq!(seen[3], 1.0);
    }

    #[test]
    fn test_progress_three_codes() {
        let seen = Mutex::new(Vec::new());
        let sink = |f: f64| seen.lock().unwrap().push(f);
        decoder().decode_codes(&[65, 66, 67], &sink).unwrap();

        // Every code is a reporting point when there are exactly three.
        assert_eq!(seen.into_inner().unwrap().len(), 4);
    }

    #[test]
    fn test_progress_no_codes() {
        let seen = Mutex::new(Vec::new());
        let sink = |f: f64| seen.lock().unwrap().push(f);
        decoder().decode_codes(&[], &sink).unwrap();
        assert_eq!(seen.into_inner().unwrap(), vec![1.0]);
    }

    #[test]
    fn test_bad_code_rejected() {
        let err = decoder().decode_codes(&[65, 300], &NoProgress).unwrap_err();
        assert!(matches!(
            err,
            LzwparError::BadCompressedCode {
                code: 300,
                next_code: 256
            }
        ));
    }

    #[test]
    fn test_bad_first_code_rejected() {
        let err = decoder().decode_codes(&[256], &NoProgress).unwrap_err();
        assert!(matches!(err, LzwparError::BadCompressedCode { code: 256, .. }));
    }

    #[test]
    fn test_bad_code_in_frame() {
        let packed = pack(&[65, 66, 400], 9).unwrap();
        let mut frame = packed.bytes;
        frame.extend_from_slice(&(packed.bit_len as u32).to_le_bytes());
        frame.push(9);

        let err = decoder().decode(&frame, &NoProgress).unwrap_err();
        assert!(matches!(err, LzwparError::BadCompressedCode { code: 400, .. }));
    }

    #[test]
    fn test_decode_roundtrip_all_bytes() {
        let original: Vec<u8> = (0..=255).collect();
        let frame = LzwEncoder::new(LzwConfig::DEFAULT)
            .unwrap()
            .encode(&original, &NoProgress)
            .unwrap();
        assert_eq!(decoder().decode(&frame, &NoProgress).unwrap(), original);
    }

    #[test]
    fn test_decode_310_bytes() {
        let original = b"This is a test of compression! ".repeat(10);
        assert_eq!(original.len(), 310);

        let frame = LzwEncoder::new(LzwConfig::DEFAULT)
            .unwrap()
            .encode(&original, &NoProgress)
            .unwrap();
        let decompressed = decoder().decode(&frame, &NoProgress).unwrap();
        assert_eq!(decompressed.len(), 310);
        assert_eq!(decompressed, original);
    }
}
