//! LZW dictionaries.
//!
//! Both sides start from the 256 single-byte entries and grow by one entry
//! per emitted code after the first, in the same order, so a code assigned
//! by the encoder resolves to the same sequence in the decoder.

use crate::config::{INITIAL_DICT_SIZE, LzwConfig};
use lzwpar_core::error::{LzwparError, Result};
use rustc_hash::FxHashMap;

/// Encoder dictionary: byte sequence -> code.
///
/// A multi-byte sequence is stored as `(code of its prefix, last byte)`.
/// Every prefix of an entry is itself an entry, so this key identifies the
/// sequence exactly. Single bytes are implicit: byte `b` has code `b`.
#[derive(Debug)]
pub struct EncodeDictionary {
    /// Extension lookup: (prefix code, next byte) -> code.
    extensions: FxHashMap<(u32, u8), u32>,
    /// Current number of entries, seed included.
    size: usize,
    /// Configured limit.
    max_size: usize,
}

impl EncodeDictionary {
    /// Create a dictionary holding the 256 single-byte entries.
    pub fn new(config: LzwConfig) -> Self {
        Self {
            extensions: FxHashMap::default(),
            size: INITIAL_DICT_SIZE,
            max_size: config.max_dict_size,
        }
    }

    /// Code for the sequence `prefix` followed by `byte`, if known.
    #[inline]
    pub fn find(&self, prefix: u32, byte: u8) -> Option<u32> {
        self.extensions.get(&(prefix, byte)).copied()
    }

    /// Insert `prefix + byte` at the next code.
    pub fn insert(&mut self, prefix: u32, byte: u8) -> Result<u32> {
        if self.size >= self.max_size {
            return Err(LzwparError::DictionaryOverflow {
                max_size: self.max_size,
            });
        }

        let code = self.size as u32;
        self.extensions.insert((prefix, byte), code);
        self.size += 1;
        Ok(code)
    }

    /// Number of entries, seed included.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Always false: the seed entries are present from construction.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Decoder dictionary: code -> byte sequence.
#[derive(Debug)]
pub struct DecodeDictionary {
    table: Vec<Vec<u8>>,
    max_size: usize,
}

impl DecodeDictionary {
    /// Create a dictionary holding the 256 single-byte entries.
    pub fn new(config: LzwConfig) -> Self {
        let table = (0..INITIAL_DICT_SIZE).map(|b| vec![b as u8]).collect();
        Self {
            table,
            max_size: config.max_dict_size,
        }
    }

    /// Sequence for `code`, if assigned.
    #[inline]
    pub fn get(&self, code: u32) -> Option<&[u8]> {
        self.table.get(code as usize).map(Vec::as_slice)
    }

    /// The code the next [`push`](Self::push) will assign.
    #[inline]
    pub fn next_code(&self) -> u32 {
        self.table.len() as u32
    }

    /// Append `entry` at the next code.
    pub fn push(&mut self, entry: Vec<u8>) -> Result<u32> {
        if self.table.len() >= self.max_size {
            return Err(LzwparError::DictionaryOverflow {
                max_size: self.max_size,
            });
        }

        let code = self.next_code();
        self.table.push(entry);
        Ok(code)
    }

    /// Number of entries, seed included.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false: the seed entries are present from construction.
    pub fn is_empty(&self) -> bool {
        false
    }
}
