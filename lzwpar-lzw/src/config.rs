//! LZW configuration.

use lzwpar_core::bitpack::{MAX_BIT_WIDTH, bit_width_for};
use lzwpar_core::error::{LzwparError, Result};

/// Number of single-byte entries every dictionary starts with.
pub const INITIAL_DICT_SIZE: usize = 256;

/// Default dictionary limit: the capacity of a 32-bit signed code.
pub const DEFAULT_MAX_DICT_SIZE: usize = 1 << 31;

/// LZW configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Maximum number of dictionary entries, seed entries included.
    ///
    /// A chunk whose dictionary would grow past this fails with
    /// [`LzwparError::DictionaryOverflow`]; the dictionary is never reset.
    pub max_dict_size: usize,
}

impl LzwConfig {
    /// Default configuration: dictionary limited to 2^31 entries.
    pub const DEFAULT: Self = Self {
        max_dict_size: DEFAULT_MAX_DICT_SIZE,
    };

    /// Create a configuration with the given dictionary limit.
    pub fn new(max_dict_size: usize) -> Self {
        Self { max_dict_size }
    }

    /// Set the dictionary limit.
    pub fn with_max_dict_size(mut self, max_dict_size: usize) -> Self {
        self.max_dict_size = max_dict_size;
        self
    }

    /// Widest code this configuration can produce.
    pub fn max_bits(&self) -> u8 {
        bit_width_for(self.max_dict_size)
    }

    /// Check that the limit leaves room for the seed and fits a 32-bit code.
    pub fn validate(&self) -> Result<()> {
        if self.max_dict_size < INITIAL_DICT_SIZE {
            return Err(LzwparError::invalid_argument(format!(
                "dictionary limit {} is below the {INITIAL_DICT_SIZE} seed entries",
                self.max_dict_size
            )));
        }
        if self.max_dict_size as u64 > 1u64 << MAX_BIT_WIDTH {
            return Err(LzwparError::invalid_argument(format!(
                "dictionary limit {} exceeds the 32-bit code space",
                self.max_dict_size
            )));
        }
        Ok(())
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LzwConfig::default();
        assert_eq!(config.max_dict_size, 1 << 31);
        assert_eq!(config.max_bits(), 31);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_limits() {
        assert!(LzwConfig::new(255).validate().is_err());
        assert!(LzwConfig::new(256).validate().is_ok());
        assert_eq!(LzwConfig::new(4096).max_bits(), 12);
        assert_eq!(LzwConfig::DEFAULT.with_max_dict_size(4097).max_bits(), 13);
    }
}
