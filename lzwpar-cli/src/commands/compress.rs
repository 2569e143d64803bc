//! Compress command implementation.

use crate::utils::{
    compressed_path, create_progress_bar, print_summary, progress_position, split_extension,
};
use log::{info, warn};
use lzwpar_parallel::{ParallelConfig, RunContext, compress_artifact};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    config: ParallelConfig,
    quiet: bool,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let data = std::fs::read(input)?;
    let (_, extension) = split_extension(input)?;
    let output = output.map_or_else(|| compressed_path(input), Path::to_path_buf);
    info!(
        "compressing {} ({} bytes) with {} workers",
        input.display(),
        data.len(),
        config.workers
    );

    let pb = create_progress_bar("compressing", !quiet);
    let report = |fraction: f64| pb.set_position(progress_position(fraction));
    let ctx = RunContext::new(config).with_progress(&report);

    let start = Instant::now();
    let result = compress_artifact(&data, &extension, &ctx);
    let elapsed = start.elapsed();
    pb.finish_and_clear();

    let output_result = result?;
    for failure in &output_result.failures {
        warn!("chunk {} could not be compressed: {}", failure.index, failure.error);
    }
    let artifact = output_result.into_result()?;

    std::fs::write(&output, &artifact)?;

    if !quiet {
        println!("Compressed {} -> {}", input.display(), output.display());
        print_summary(data.len(), artifact.len(), elapsed);
    }

    Ok(output)
}
