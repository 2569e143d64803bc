//! Orchestration settings.

use lzwpar_core::error::{LzwparError, Result};
use lzwpar_lzw::LzwConfig;

/// Default degree of parallelism.
pub const DEFAULT_WORKERS: usize = 4;

/// Largest chunk count the one-byte container field can carry.
pub const MAX_CHUNKS: usize = u8::MAX as usize;

/// Which chunks feed the caller's progress sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressScope {
    /// Only the last chunk reports; the other chunks run silently.
    LastChunk,
    /// Every chunk reports; the sink receives the mean of all chunk fractions.
    #[default]
    Aggregate,
}

/// Settings for one compress or decompress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Number of chunks (and workers) used when compressing.
    pub workers: usize,
    /// Progress reporting policy.
    pub progress_scope: ProgressScope,
    /// Per-chunk codec settings.
    pub lzw: LzwConfig,
}

impl ParallelConfig {
    /// Configuration with `workers` chunks and default codec settings.
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Self::default()
        }
    }

    /// Set the number of chunks and workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the progress reporting policy.
    pub fn with_progress_scope(mut self, scope: ProgressScope) -> Self {
        self.progress_scope = scope;
        self
    }

    /// Set the per-chunk codec settings.
    pub fn with_lzw(mut self, lzw: LzwConfig) -> Self {
        self.lzw = lzw;
        self
    }

    /// Check the worker count and codec settings.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 || self.workers > MAX_CHUNKS {
            return Err(LzwparError::InvalidChunkCount {
                count: self.workers,
            });
        }
        self.lzw.validate()
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            progress_scope: ProgressScope::default(),
            lzw: LzwConfig::DEFAULT,
        }
    }
}
