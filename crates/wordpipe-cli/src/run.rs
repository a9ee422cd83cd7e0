use std::cell::Cell;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

use anyhow::{Context, bail};
use serde::Serialize;
use tracing::{info, warn};
use wordpipe::{ExternGen, Generator, SourceOptions, SourceStats, WORD_BYTES, WordSource};

use crate::{Args, Format, SummaryFormat};

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Generator name.
    pub name: String,
    /// Words the output accepted, sentinel padding included. Words still
    /// buffered when the reader hung up are not counted.
    pub written: u64,
    /// Whether the reader of our output hung up before we finished.
    pub output_closed: bool,
    /// Decoder counters at the end of the run.
    pub stats: SourceStats,
}

/// Opens the configured input and output, runs, and reports the summary.
///
/// # Errors
///
/// Fails if the input cannot be opened or [`run`] fails.
pub fn execute(args: &Args) -> anyhow::Result<Report> {
    let input: Box<dyn Read> = if args.reads_stdin() {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.input)
            .with_context(|| format!("failed to open {}", args.input.display()))?;
        Box::new(file)
    };

    let report = run(args, input, io::stdout().lock())?;

    let stats = report.stats;
    info!(
        name = %report.name,
        written = report.written,
        words = stats.words,
        sentinels = stats.sentinels,
        refills = stats.refills,
        bytes_read = stats.bytes_read,
        dropped_tail = stats.dropped_tail,
        "run complete"
    );
    if args.summary == SummaryFormat::Json {
        let json = serde_json::to_string(&report).context("failed to encode summary")?;
        writeln!(io::stderr(), "{json}").context("failed to write summary")?;
    }
    Ok(report)
}

/// Decodes `input` and writes words to `output` as `args` describes.
///
/// The source is driven through an [`ExternGen`], the same shape a test
/// battery pulls from. Without `--words` the run stops at end of stream;
/// with it, a short stream is padded with zero words unless `--strict` is
/// set. A closed output ends the run without error.
///
/// # Errors
///
/// Fails on an invalid buffer size, a short stream under `--strict`, or an
/// output error other than a broken pipe.
pub fn run<R: Read, W: Write>(args: &Args, input: R, output: W) -> anyhow::Result<Report> {
    let options = SourceOptions::with_capacity(args.buffer_size);
    let mut source = WordSource::with_options(input, options).context("invalid --buffer-size")?;
    info!(
        name = %args.name,
        capacity = source.capacity(),
        input = %args.input.display(),
        words = ?args.words,
        "reading words"
    );

    let mut out = BufWriter::new(Delivered::new(output, args.format));
    let ended = Cell::new(false);
    let mut produced = 0u64;
    let mut output_closed = false;
    {
        let mut generator = ExternGen::new(args.name.as_str(), || {
            let word = source.next_word();
            if source.is_exhausted() {
                ended.set(true);
            }
            word
        });

        while args.words.is_none_or(|limit| produced < limit) {
            let word = generator.next_bits();
            if ended.get() {
                match args.words {
                    None => break,
                    Some(limit) if args.strict => {
                        bail!("stream ended after {produced} of {limit} words")
                    }
                    Some(_) => {}
                }
            }
            match write_word(&mut out, args.format, word) {
                Ok(()) => produced += 1,
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                    output_closed = true;
                    break;
                }
                Err(err) => return Err(err).context("failed to write word"),
            }
        }
    }

    if !output_closed {
        match out.flush() {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => output_closed = true,
            Err(err) => return Err(err).context("failed to flush output"),
        }
    }
    // Dismantle without the flush-on-drop, which would write to a closed pipe again.
    let (delivered, _) = out.into_parts();
    let written = delivered.words();
    if output_closed {
        info!(produced, written, "output closed by reader");
    }

    let stats = source.stats();
    if stats.sentinels > 0 && args.words.is_some() && !args.strict {
        warn!(
            sentinels = stats.sentinels,
            "stream ended early, output was padded with zero words"
        );
    }

    Ok(Report {
        name: args.name.clone(),
        written,
        output_closed,
        stats,
    })
}

/// Counts the words that made it through to the underlying writer.
struct Delivered<W> {
    inner: W,
    format: Format,
    bytes: u64,
    lines: u64,
}

impl<W> Delivered<W> {
    fn new(inner: W, format: Format) -> Self {
        Self {
            inner,
            format,
            bytes: 0,
            lines: 0,
        }
    }

    fn words(&self) -> u64 {
        match self.format {
            Format::Raw => self.bytes / WORD_BYTES as u64,
            Format::Hex | Format::Dec => self.lines,
        }
    }
}

impl<W: Write> Write for Delivered<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes += n as u64;
        self.lines += buf[..n].iter().filter(|&&b| b == b'\n').count() as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

fn write_word<W: Write>(out: &mut W, format: Format, word: u32) -> io::Result<()> {
    match format {
        Format::Hex => writeln!(out, "{word:#010x}"),
        Format::Dec => writeln!(out, "{word}"),
        Format::Raw => out.write_all(&word.to_le_bytes()),
    }
}
