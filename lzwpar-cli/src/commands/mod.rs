//! Command implementations for the lzwpar CLI.

pub mod compress;
pub mod decompress;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
