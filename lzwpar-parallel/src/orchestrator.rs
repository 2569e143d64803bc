//! Chunked parallel encode and decode.

use crate::config::MAX_CHUNKS;
use crate::container::{parse_container, write_container};
use crate::context::{ChunkFailure, RunContext};
use log::{debug, warn};
use lzwpar_core::error::{LzwparError, Result};
use lzwpar_lzw::{LzwDecoder, LzwEncoder};
use rayon::ThreadPool;
use rayon::prelude::*;

/// Result of a parallel run that may have lost some chunks.
///
/// Failed chunks contribute no bytes to `data`; their errors are listed in
/// `failures` in chunk order.
#[derive(Debug, Default)]
pub struct ParallelOutput {
    /// Joined output of every chunk that succeeded.
    pub data: Vec<u8>,
    /// Chunks that failed.
    pub failures: Vec<ChunkFailure>,
}

impl ParallelOutput {
    /// Whether every chunk succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// The output, or the first chunk failure as an error.
    pub fn into_result(self) -> Result<Vec<u8>> {
        match self.failures.into_iter().next() {
            None => Ok(self.data),
            Some(failure) => Err(LzwparError::chunk_failed(failure.index, failure.error)),
        }
    }
}

/// Split `data` into `count` contiguous chunks.
///
/// The first `count - 1` chunks hold `data.len() / count` bytes each and the
/// last holds the rest, so some or all chunks may be empty.
pub fn split_chunks(data: &[u8], count: usize) -> Result<Vec<&[u8]>> {
    if count == 0 || count > MAX_CHUNKS {
        return Err(LzwparError::InvalidChunkCount { count });
    }

    let base = data.len() / count;
    let mut chunks = Vec::with_capacity(count);
    let mut rest = data;
    for _ in 1..count {
        let (head, tail) = rest.split_at(base);
        chunks.push(head);
        rest = tail;
    }
    chunks.push(rest);

    Ok(chunks)
}

fn build_pool(threads: usize) -> Result<ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("lzwpar-worker-{i}"))
        .build()
        .map_err(|e| LzwparError::ThreadPool {
            message: e.to_string(),
        })
}

/// Run `work` on every input in its own pool thread and collect results in
/// input order.
fn run_chunks<I, F>(inputs: &[I], work: F) -> Result<Vec<Result<Vec<u8>>>>
where
    I: Sync,
    F: Fn(usize, &I) -> Result<Vec<u8>> + Sync,
{
    let pool = build_pool(inputs.len())?;
    let results: Vec<Result<Vec<u8>>> = pool.install(|| {
        inputs
            .par_iter()
            .enumerate()
            .map(|(index, input)| work(index, input))
            .collect()
    });

    Ok(results)
}

/// Sort per-chunk results into outputs and failures, reporting the first
/// failure through the run's error sink.
fn partition(
    ctx: &RunContext<'_>,
    results: Vec<Result<Vec<u8>>>,
) -> (Vec<Vec<u8>>, Vec<ChunkFailure>) {
    let mut outputs = Vec::with_capacity(results.len());
    let mut failures = Vec::new();

    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(output) => outputs.push(output),
            Err(error) => {
                warn!("chunk {index} failed: {error}");
                let failure = ChunkFailure { index, error };
                ctx.report_failure(&failure);
                failures.push(failure);
                outputs.push(Vec::new());
            }
        }
    }

    (outputs, failures)
}

/// Compress `data` as `ctx.config().workers` independent chunks and wrap the
/// frames in a container.
///
/// A chunk that fails to encode is stored as an empty frame and listed in
/// the returned failures.
pub fn parallel_encode(data: &[u8], ctx: &RunContext<'_>) -> Result<ParallelOutput> {
    let config = ctx.config();
    config.validate()?;

    let chunks = split_chunks(data, config.workers)?;
    debug!(
        "encoding {} bytes as {} chunks of at least {} bytes",
        data.len(),
        chunks.len(),
        data.len() / chunks.len()
    );

    let encoder = LzwEncoder::new(config.lzw)?;
    let job = ctx.progress_for(chunks.len());
    let results = run_chunks(&chunks, |index, chunk| {
        encoder.encode(chunk, job.chunk(index).as_sink())
    })?;

    let (frames, failures) = partition(ctx, results);
    let data = write_container(&frames)?;
    debug!("container holds {} bytes", data.len());

    Ok(ParallelOutput { data, failures })
}

/// Decompress a container body, one worker per stored chunk.
///
/// A malformed container is a hard error. A chunk whose frame fails to
/// decode contributes no bytes and is listed in the returned failures.
pub fn parallel_decode(body: &[u8], ctx: &RunContext<'_>) -> Result<ParallelOutput> {
    let config = ctx.config();
    config.lzw.validate()?;

    let frames = parse_container(body)?;
    debug!("decoding {} chunks from {} bytes", frames.len(), body.len());

    let decoder = LzwDecoder::new(config.lzw)?;
    let job = ctx.progress_for(frames.len());
    let results = run_chunks(&frames, |index, frame| {
        decoder.decode(frame, job.chunk(index).as_sink())
    })?;

    let (outputs, failures) = partition(ctx, results);
    let data = outputs.concat();

    Ok(ParallelOutput { data, failures })
}
