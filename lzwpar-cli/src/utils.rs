//! Utility functions for the CLI.

use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use lzwpar_core::error::{LzwparError, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Progress bar positions per unit of completion.
pub const PROGRESS_STEPS: u64 = 1000;

/// Extension of compressed artifacts.
pub const ARTIFACT_EXTENSION: &str = "bin";

/// Suffix added to the stem of decompressed files.
pub const DECODED_SUFFIX: &str = " Decoded";

/// Create a progress bar with standard styling.
pub fn create_progress_bar(message: &'static str, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(PROGRESS_STEPS);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {percent:>3}% {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb.set_message(message);
    pb
}

/// Map a completion fraction onto the progress bar's range.
pub fn progress_position(fraction: f64) -> u64 {
    (fraction.clamp(0.0, 1.0) * PROGRESS_STEPS as f64).round() as u64
}

/// Split `path` into its extension-less path and its extension, leading `.`
/// included. A file without an extension yields an empty string.
pub fn split_extension(path: &Path) -> Result<(PathBuf, String)> {
    let extension = match path.extension() {
        None => String::new(),
        Some(ext) => {
            let ext = ext.to_str().ok_or_else(|| {
                LzwparError::invalid_argument(format!(
                    "extension of {} is not valid UTF-8",
                    path.display()
                ))
            })?;
            format!(".{ext}")
        }
    };
    Ok((path.with_extension(""), extension))
}

/// `<stem>.bin` next to the input.
pub fn compressed_path(input: &Path) -> PathBuf {
    input.with_extension(ARTIFACT_EXTENSION)
}

/// `<stem> Decoded<ext>` next to the compressed input.
///
/// Fails unless `input` ends in `.bin`.
pub fn decoded_path(input: &Path, extension: &str) -> Result<PathBuf> {
    if input.extension().and_then(|e| e.to_str()) != Some(ARTIFACT_EXTENSION) {
        return Err(LzwparError::invalid_argument(format!(
            "{} is not a .{ARTIFACT_EXTENSION} file",
            input.display()
        )));
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(input.with_file_name(format!("{stem}{DECODED_SUFFIX}{extension}")))
}

/// Sizes, ratio, elapsed time and throughput of one run, one line each.
pub fn summary_lines(input_len: usize, output_len: usize, elapsed: Duration) -> Vec<String> {
    let secs = elapsed.as_secs_f64();
    let mut lines = vec![
        format!("  Input:      {}", HumanBytes(input_len as u64)),
        format!("  Output:     {}", HumanBytes(output_len as u64)),
    ];
    if input_len > 0 {
        lines.push(format!(
            "  Ratio:      {:.1}%",
            output_len as f64 / input_len as f64 * 100.0
        ));
    }
    lines.push(format!("  Time:       {secs:.3}s"));
    if secs > 0.0 {
        lines.push(format!(
            "  Throughput: {}/s",
            HumanBytes((input_len as f64 / secs) as u64)
        ));
    }
    lines
}

/// Print the run summary.
pub fn print_summary(input_len: usize, output_len: usize, elapsed: Duration) {
    for line in summary_lines(input_len, output_len, elapsed) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_extension() {
        let (stem, ext) = split_extension(Path::new("dir/notes.txt")).unwrap();
        assert_eq!(stem, PathBuf::from("dir/notes"));
        assert_eq!(ext, ".txt");

        let (stem, ext) = split_extension(Path::new("README")).unwrap();
        assert_eq!(stem, PathBuf::from("README"));
        assert_eq!(ext, "");

        let (_, ext) = split_extension(Path::new("archive.tar.gz")).unwrap();
        assert_eq!(ext, ".gz");
    }

    #[test]
    fn test_compressed_path() {
        assert_eq!(
            compressed_path(Path::new("data/report.pdf")),
            PathBuf::from("data/report.bin")
        );
        assert_eq!(compressed_path(Path::new("log")), PathBuf::from("log.bin"));
    }

    #[test]
    fn test_decoded_path() {
        assert_eq!(
            decoded_path(Path::new("data/report.bin"), ".pdf").unwrap(),
            PathBuf::from("data/report Decoded.pdf")
        );
        assert_eq!(
            decoded_path(Path::new("log.bin"), "").unwrap(),
            PathBuf::from("log Decoded")
        );
        assert!(decoded_path(Path::new("report.pdf"), ".pdf").is_err());
        assert!(decoded_path(Path::new("report"), "").is_err());
    }

    #[test]
    fn test_summary_lines() {
        let lines = summary_lines(2048, 512, Duration::from_secs(2));
        assert_eq!(lines[0], "  Input:      2.00 KiB");
        assert_eq!(lines[1], "  Output:     512 B");
        assert_eq!(lines[2], "  Ratio:      25.0%");
        assert_eq!(lines[3], "  Time:       2.000s");
        assert_eq!(lines[4], "  Throughput: 1.00 KiB/s");
    }

    #[test]
    fn test_summary_empty_input() {
        let lines = summary_lines(0, 9, Duration::ZERO);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| !l.contains("Ratio")));
    }

    #[test]
    fn test_progress_position() {
        assert_eq!(progress_position(0.0), 0);
        assert_eq!(progress_position(0.5), 500);
        assert_eq!(progress_position(1.0), PROGRESS_STEPS);
        assert_eq!(progress_position(1.5), PROGRESS_STEPS);
    }
}
