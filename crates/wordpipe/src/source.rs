use core::{fmt, mem};
use std::io::{self, Read};

use tracing::{debug, trace, warn};

use crate::{Error, SENTINEL, SourceOptions, SourceStats, WORD_BYTES};

/// What the next refill is allowed to do with the upstream channel.
enum Channel {
    Open,
    /// A read failed after part of a refill had already arrived. Those bytes
    /// are still being served; the next refill reports the error.
    Failed(io::Error),
    Exhausted,
}

/// Decodes a byte stream into little-endian `u32` words through a
/// fixed-capacity buffer.
///
/// The buffer is allocated once, at construction. Every later call to
/// [`next_word`](Self::next_word) either serves four already-buffered bytes or
/// refills the buffer first, so the per-word cost is constant and nothing is
/// allocated on the hot path.
///
/// Layout of the buffer at any time:
///
/// ```text
/// [0, pos)      consumed, never read again
/// [pos, len)    unread
/// [len, cap)    stale
/// ```
///
/// # End of stream
///
/// When the channel runs dry the source becomes *exhausted* and
/// [`next_word`](Self::next_word) returns the sentinel `0` for that call and
/// every call after it. A battery that keeps pulling from an exhausted source
/// is testing a constant stream, so its results for the remainder of the run
/// are meaningless. Callers that can act on the condition should use
/// [`try_next_word`](Self::try_next_word) or check
/// [`is_exhausted`](Self::is_exhausted).
///
/// # Examples
///
/// ```rust
/// use wordpipe::WordSource;
///
/// let input: &[u8] = &[0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
/// let mut source = WordSource::new(input);
///
/// assert_eq!(source.next_word(), 1);
/// assert_eq!(source.next_word(), u32::MAX);
/// assert_eq!(source.next_word(), 0);
/// assert!(source.is_exhausted());
/// ```
pub struct WordSource<R> {
    reader: R,
    buffer: Box<[u8]>,
    len: usize,
    pos: usize,
    channel: Channel,
    stats: SourceStats,
}

impl<R: Read> WordSource<R> {
    /// Wraps `reader` with a buffer of the default capacity.
    pub fn new(reader: R) -> Self {
        Self::build(reader, SourceOptions::default())
    }

    /// Wraps `reader` using `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if the capacity is not a multiple of
    /// four or is smaller than one word.
    pub fn with_options(reader: R, options: SourceOptions) -> Result<Self, Error> {
        options.validate()?;
        Ok(Self::build(reader, options))
    }

    fn build(reader: R, options: SourceOptions) -> Self {
        debug!(capacity = options.capacity, "word source created");
        Self {
            reader,
            buffer: vec![0; options.capacity].into_boxed_slice(),
            len: 0,
            pos: 0,
            channel: Channel::Open,
            stats: SourceStats::default(),
        }
    }

    /// Replaces the buffer contents with fresh bytes from the channel and
    /// returns how many arrived.
    ///
    /// Reads are repeated until the buffer is full or the channel reports end
    /// of stream, so a short read from a pipe never leaves a partial buffer in
    /// the middle of a stream. Unread bytes still in the buffer are discarded
    /// and counted in [`SourceStats::dropped_tail`].
    ///
    /// # Errors
    ///
    /// [`Error::EndOfStream`] if no bytes could be read, or [`Error::Channel`]
    /// if the read failed before any bytes arrived. Either leaves the source
    /// exhausted, and every later refill returns [`Error::EndOfStream`]
    /// without touching the channel.
    pub fn refill(&mut self) -> Result<usize, Error> {
        self.stats.dropped_tail += (self.len - self.pos) as u64;
        self.len = 0;
        self.pos = 0;

        match mem::replace(&mut self.channel, Channel::Exhausted) {
            Channel::Open => {}
            Channel::Failed(err) => return Err(self.exhaust(Error::Channel(err))),
            Channel::Exhausted => return Err(Error::EndOfStream),
        }

        let mut filled = 0;
        let mut failure = None;
        while filled < self.buffer.len() {
            match self.reader.read(&mut self.buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }

        if filled == 0 {
            return Err(self.exhaust(failure.map_or(Error::EndOfStream, Error::Channel)));
        }

        self.channel = match failure {
            Some(err) => Channel::Failed(err),
            None => Channel::Open,
        };
        self.len = filled;
        self.stats.refills += 1;
        self.stats.bytes_read += filled as u64;
        debug!(bytes = filled, refills = self.stats.refills, "buffer refilled");
        Ok(filled)
    }

    /// Decodes the next word, refilling the buffer when fewer than four
    /// unread bytes remain.
    ///
    /// # Errors
    ///
    /// The first failure is whatever ended the stream ([`Error::EndOfStream`]
    /// or [`Error::Channel`]); every call after that returns
    /// [`Error::EndOfStream`]. Up to three trailing bytes of a stream whose
    /// length is not a multiple of four are never returned.
    pub fn try_next_word(&mut self) -> Result<u32, Error> {
        loop {
            if let Some(&bytes) = self.buffer[self.pos..self.len].first_chunk::<WORD_BYTES>() {
                self.pos += WORD_BYTES;
                self.stats.words += 1;
                return Ok(u32::from_le_bytes(bytes));
            }
            self.refill()?;
        }
    }

    /// Decodes the next word, or returns the sentinel `0` once the stream has
    /// ended.
    ///
    /// This is the entry point for batteries whose callback convention has no
    /// way to report failure. See the type-level docs for what exhaustion
    /// means for a running test.
    #[inline]
    pub fn next_word(&mut self) -> u32 {
        match self.try_next_word() {
            Ok(word) => word,
            Err(_) => {
                self.stats.sentinels += 1;
                trace!(sentinels = self.stats.sentinels, "serving sentinel word");
                SENTINEL
            }
        }
    }

    /// Two consecutive words as one `u64`, the first word in the low half.
    pub fn next_u64(&mut self) -> u64 {
        let low = self.next_word();
        let high = self.next_word();
        (u64::from(high) << 32) | u64::from(low)
    }

    fn exhaust(&mut self, err: Error) -> Error {
        self.channel = Channel::Exhausted;
        warn!(
            reason = %err,
            words = self.stats.words,
            bytes_read = self.stats.bytes_read,
            dropped_tail = self.stats.dropped_tail,
            "upstream channel exhausted, serving sentinel words from now on"
        );
        err
    }
}

impl<R> WordSource<R> {
    /// Size of the byte buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Unread bytes currently buffered.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.len - self.pos
    }

    /// Whether a refill has failed. An exhausted source only serves the
    /// sentinel.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self.channel, Channel::Exhausted)
    }

    /// Counters accumulated since construction.
    #[must_use]
    pub fn stats(&self) -> SourceStats {
        self.stats
    }

    /// The upstream channel.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Gives the upstream channel back, discarding any buffered bytes.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R> fmt::Debug for WordSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordSource")
            .field("capacity", &self.buffer.len())
            .field("len", &self.len)
            .field("pos", &self.pos)
            .field("exhausted", &self.is_exhausted())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
