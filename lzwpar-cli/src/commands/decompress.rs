//! Decompress command implementation.

use crate::utils::{create_progress_bar, decoded_path, print_summary, progress_position};
use log::info;
use lzwpar_parallel::{ChunkFailure, ParallelConfig, RunContext, decompress_artifact};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    config: ParallelConfig,
    quiet: bool,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Reject the wrong input before reading it.
    decoded_path(input, "")?;

    let artifact = std::fs::read(input)?;
    info!("decompressing {} ({} bytes)", input.display(), artifact.len());

    let pb = create_progress_bar("decompressing", !quiet);
    let report = |fraction: f64| pb.set_position(progress_position(fraction));
    let on_error = |failure: &ChunkFailure| {
        pb.suspend(|| eprintln!("Chunk {} failed: {}", failure.index, failure.error))
    };
    let ctx = RunContext::new(config)
        .with_progress(&report)
        .with_error_sink(&on_error);

    let start = Instant::now();
    let result = decompress_artifact(&artifact, &ctx);
    let elapsed = start.elapsed();
    pb.finish_and_clear();

    let (data, extension) = result?.into_result()?;
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => decoded_path(input, &extension)?,
    };

    std::fs::write(&output, &data)?;

    if !quiet {
        println!("Decompressed {} -> {}", input.display(), output.display());
        print_summary(artifact.len(), data.len(), elapsed);
    }

    Ok(output)
}
