//! lzwpar CLI - parallel LZW compression
//!
//! Compresses a whole file into a `.bin` container of independently encoded
//! LZW chunks, and restores it together with its original extension.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{cmd_compress, cmd_decompress};
use log::LevelFilter;
use lzwpar_parallel::{DEFAULT_WORKERS, ParallelConfig, ProgressScope};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lzwpar")]
#[command(author, version, about = "Parallel LZW file compressor")]
#[command(long_about = "
lzwpar splits a file into chunks, compresses every chunk with its own LZW
dictionary on a separate thread, and stores the result with the original
file extension so it can be restored.

Examples:
  lzwpar compress report.pdf
  lzwpar compress -j 8 video.raw -o video.bin
  lzwpar decompress report.bin
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into <stem>.bin
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (defaults to <stem>.bin)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of chunks and worker threads (1-255)
        #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
        jobs: usize,

        /// Which chunks drive the progress bar
        #[arg(long, value_enum, default_value = "aggregate")]
        progress_scope: ScopeArg,

        /// Suppress the progress bar and summary
        #[arg(short, long)]
        quiet: bool,
    },

    /// Decompress a .bin file into "<stem> Decoded<ext>"
    #[command(alias = "d")]
    Decompress {
        /// File to decompress (must end in .bin)
        input: PathBuf,

        /// Output file (defaults to "<stem> Decoded<ext>")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Which chunks drive the progress bar
        #[arg(long, value_enum, default_value = "aggregate")]
        progress_scope: ScopeArg,

        /// Suppress the progress bar and summary
        #[arg(short, long)]
        quiet: bool,
    },
}

/// Progress scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScopeArg {
    /// Only the last chunk reports
    Last,
    /// Mean progress of all chunks
    Aggregate,
}

impl From<ScopeArg> for ProgressScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Last => ProgressScope::LastChunk,
            ScopeArg::Aggregate => ProgressScope::Aggregate,
        }
    }
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() {
    let cli = Cli::parse();

    // Logging is best effort; a second logger or a missing terminal is not fatal.
    let _ = TermLogger::init(
        log_level(cli.verbose),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            jobs,
            progress_scope,
            quiet,
        } => {
            let config = ParallelConfig::new(jobs).with_progress_scope(progress_scope.into());
            cmd_compress(&input, output.as_deref(), config, quiet)
        }
        Commands::Decompress {
            input,
            output,
            progress_scope,
            quiet,
        } => {
            let config = ParallelConfig::default().with_progress_scope(progress_scope.into());
            cmd_decompress(&input, output.as_deref(), config, quiet)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
