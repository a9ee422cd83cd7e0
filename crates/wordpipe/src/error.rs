use std::io;

use thiserror::Error;

/// Failures surfaced by [`WordSource`](crate::WordSource).
///
/// Only [`Error::InvalidCapacity`] is reported at construction. The other two
/// variants are terminal: once either has been returned the source is
/// exhausted and serves the sentinel word from then on.
#[derive(Debug, Error)]
pub enum Error {
    /// The upstream channel produced zero bytes on a refill.
    #[error("end of stream")]
    EndOfStream,
    /// The upstream channel failed with an I/O error other than `Interrupted`.
    #[error("channel read error: {0}")]
    Channel(#[from] io::Error),
    /// Buffer capacities must be a non-zero multiple of the word width.
    #[error("invalid buffer capacity {0}: expected a multiple of 4 that is at least 4")]
    InvalidCapacity(usize),
}

impl Error {
    /// Whether this error ends the stream.
    ///
    /// A channel error is indistinguishable from a clean close as far as the
    /// decoder is concerned, so both count.
    #[must_use]
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, Error::EndOfStream | Error::Channel(_))
    }
}
