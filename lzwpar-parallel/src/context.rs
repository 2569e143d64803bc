//! Per-call run context.
//!
//! A [`RunContext`] lives for exactly one top-level compress or decompress
//! call. It owns the settings, the caller's progress and error sinks, and the
//! "first failure already reported" flag, so nothing needs resetting between
//! independent runs.

use crate::config::{ParallelConfig, ProgressScope};
use lzwpar_core::error::LzwparError;
use lzwpar_core::progress::{NoProgress, ProgressSink};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// A chunk that failed while the rest of the job completed.
#[derive(Debug)]
pub struct ChunkFailure {
    /// Chunk index.
    pub index: usize,
    /// Why it failed.
    pub error: LzwparError,
}

/// Receiver for the first chunk failure of a run.
pub trait ErrorSink: Sync {
    /// Called at most once per [`RunContext`].
    fn report(&self, failure: &ChunkFailure);
}

impl<F> ErrorSink for F
where
    F: Fn(&ChunkFailure) + Sync,
{
    fn report(&self, failure: &ChunkFailure) {
        self(failure)
    }
}

/// Settings and sinks for one top-level run.
pub struct RunContext<'a> {
    config: ParallelConfig,
    progress: Option<&'a dyn ProgressSink>,
    errors: Option<&'a dyn ErrorSink>,
    error_reported: AtomicBool,
}

impl<'a> RunContext<'a> {
    /// Create a context without sinks.
    pub fn new(config: ParallelConfig) -> Self {
        Self {
            config,
            progress: None,
            errors: None,
            error_reported: AtomicBool::new(false),
        }
    }

    /// Attach a progress sink.
    pub fn with_progress(mut self, sink: &'a dyn ProgressSink) -> Self {
        self.progress = Some(sink);
        self
    }

    /// Attach an error sink.
    pub fn with_error_sink(mut self, sink: &'a dyn ErrorSink) -> Self {
        self.errors = Some(sink);
        self
    }

    /// The run's settings.
    pub fn config(&self) -> &ParallelConfig {
        &self.config
    }

    /// Whether a failure has been passed to the error sink.
    pub fn error_reported(&self) -> bool {
        self.error_reported.load(Ordering::Acquire)
    }

    /// Forward `failure` to the error sink if it is the run's first.
    pub(crate) fn report_failure(&self, failure: &ChunkFailure) {
        if self.error_reported.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(sink) = self.errors {
            sink.report(failure);
        }
    }

    /// Build the progress fan-in for a job of `chunks` chunks.
    pub(crate) fn progress_for(&self, chunks: usize) -> JobProgress<'a> {
        JobProgress {
            sink: self.progress,
            scope: self.config.progress_scope,
            chunks,
            fractions: Mutex::new(vec![0.0; chunks]),
        }
    }
}

impl std::fmt::Debug for RunContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("config", &self.config)
            .field("progress", &self.progress.is_some())
            .field("errors", &self.errors.is_some())
            .field("error_reported", &self.error_reported())
            .finish()
    }
}

/// Routes per-chunk progress to the caller's sink according to the scope.
pub(crate) struct JobProgress<'a> {
    sink: Option<&'a dyn ProgressSink>,
    scope: ProgressScope,
    chunks: usize,
    /// Last fraction seen from each chunk.
    fractions: Mutex<Vec<f64>>,
}

impl<'a> JobProgress<'a> {
    /// Sink handed to chunk `index`'s codec.
    pub(crate) fn chunk(&self, index: usize) -> ChunkProgress<'_, 'a> {
        ChunkProgress { job: self, index }
    }

    fn update(&self, index: usize, fraction: f64) {
        let Some(sink) = self.sink else {
            return;
        };

        match self.scope {
            ProgressScope::LastChunk => sink.report(fraction),
            ProgressScope::Aggregate => {
                let mut fractions = self.fractions.lock().unwrap_or_else(|e| e.into_inner());
                fractions[index] = fraction;
                let mean = fractions.iter().sum::<f64>() / fractions.len() as f64;
                sink.report(mean);
            }
        }
    }

    fn reports_for(&self, index: usize) -> bool {
        match self.scope {
            ProgressScope::LastChunk => index + 1 == self.chunks,
            ProgressScope::Aggregate => true,
        }
    }
}

/// Progress sink for a single chunk.
pub(crate) struct ChunkProgress<'j, 'a> {
    job: &'j JobProgress<'a>,
    index: usize,
}

impl ChunkProgress<'_, '_> {
    /// The sink to hand to the codec; silent chunks get [`NoProgress`].
    pub(crate) fn as_sink(&self) -> &dyn ProgressSink {
        if self.job.sink.is_some() && self.job.reports_for(self.index) {
            self
        } else {
            &NoProgress
        }
    }
}

impl ProgressSink for ChunkProgress<'_, '_> {
    fn report(&self, fraction: f64) {
        self.job.update(self.index, fraction);
    }
}
