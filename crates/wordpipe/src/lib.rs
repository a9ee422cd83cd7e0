//! Feed a raw byte stream to a statistical test battery one `u32` at a time.
//!
//! A random number generator writes bytes to a pipe; a battery such as
//! TestU01 wants a zero-argument function it can call billions of times for a
//! fresh 32-bit word. [`WordSource`] sits between the two: it reads the pipe
//! through a fixed buffer and reassembles little-endian words, including
//! across refill boundaries. [`ExternGen`] wraps it in the named-callback
//! shape the battery registers.
//!
//! ```rust
//! use wordpipe::{ExternGen, Generator, SourceOptions, WordSource};
//!
//! let stream: Vec<u8> = (0u8..32).collect();
//! let source = WordSource::with_options(&stream[..], SourceOptions::with_capacity(8))?;
//! let mut generator = ExternGen::from_source("counting bytes", source);
//!
//! assert_eq!(generator.next_bits(), 0x0302_0100);
//! assert_eq!(generator.next_bits(), 0x0706_0504);
//! assert_eq!(generator.next_bits(), 0x0B0A_0908);
//! # Ok::<(), wordpipe::Error>(())
//! ```
//!
//! When the stream ends the source serves `0` forever rather than failing,
//! because the callback has no way to report an error. That keeps a long run
//! alive but turns the rest of it into a test of a constant sequence; see
//! [`WordSource`] for the stricter alternatives.

mod error;
mod generator;
mod options;
#[cfg(feature = "rand")]
mod rand_support;
mod source;
mod stats;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use generator::{ExternGen, Generator};
pub use options::{DEFAULT_CAPACITY, SourceOptions};
pub use source::WordSource;
pub use stats::SourceStats;

/// Word served once the upstream channel has ended.
pub const SENTINEL: u32 = 0;

/// Width of a decoded word in bytes.
pub const WORD_BYTES: usize = 4;
