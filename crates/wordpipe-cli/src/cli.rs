//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use wordpipe::DEFAULT_CAPACITY;

/// Decode a little-endian byte stream into 32-bit words.
///
/// Reads from standard input by default, so a generator can be piped straight
/// in: `rng | wordpipe -n 1000000 -f dec`.
#[derive(Debug, Clone, Parser)]
#[command(name = "wordpipe", version)]
pub struct Args {
    /// File to read instead of standard input. `-` means standard input.
    #[arg(short, long, value_name = "PATH", default_value = "-")]
    pub input: PathBuf,

    /// Decoder buffer size in bytes; a multiple of 4.
    #[arg(short, long, value_name = "BYTES", default_value_t = DEFAULT_CAPACITY, env = "WORDPIPE_BUFFER_SIZE")]
    pub buffer_size: usize,

    /// Number of words to emit. Without it, emit until the stream ends.
    #[arg(short = 'n', long, value_name = "N")]
    pub words: Option<u64>,

    /// Output encoding.
    #[arg(short, long, value_enum, default_value_t = Format::Hex)]
    pub format: Format,

    /// Fail instead of padding with zero words when the stream ends before
    /// `--words` have been emitted.
    #[arg(long, requires = "words")]
    pub strict: bool,

    /// Generator name shown in logs.
    #[arg(long, default_value = "stdin")]
    pub name: String,

    /// More logging; repeat for trace output.
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// How to report the final statistics.
    #[arg(long, value_enum, default_value_t = SummaryFormat::Log)]
    pub summary: SummaryFormat,
}

impl Args {
    /// Whether input comes from standard input.
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

/// Word encodings for standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `0x%08x`, one per line.
    Hex,
    /// Decimal, one per line.
    Dec,
    /// Four little-endian bytes per word, no separator.
    Raw,
}

/// Log line formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Where the end-of-run statistics go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// An `info` log event.
    Log,
    /// The log event plus a JSON document on standard error.
    Json,
}
