use std::io::Read;

use tracing::info;
use wordpipe::{DEFAULT_CAPACITY, Error, SourceOptions, SourceStats, WordSource};

/// A decoder owned by C code through a raw pointer.
///
/// The channel is boxed so one handle type covers standard input and
/// whatever a Rust caller installs.
#[derive(Debug)]
pub struct WordPipe {
    source: WordSource<Box<dyn Read>>,
}

impl WordPipe {
    /// Decodes `reader` through a buffer of `capacity` bytes, where `0`
    /// means [`DEFAULT_CAPACITY`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCapacity`] for a capacity that is not a multiple of 4.
    pub fn open(reader: impl Read + 'static, capacity: usize) -> Result<Self, Error> {
        let capacity = if capacity == 0 { DEFAULT_CAPACITY } else { capacity };
        let reader: Box<dyn Read> = Box::new(reader);
        let source = WordSource::with_options(reader, SourceOptions::with_capacity(capacity))?;
        Ok(Self { source })
    }

    /// Hands ownership to C.
    #[must_use]
    pub fn into_raw(self) -> *mut WordPipe {
        Box::into_raw(Box::new(self))
    }

    /// Takes ownership back from C.
    ///
    /// # Safety
    ///
    /// `ptr` must come from [`WordPipe::into_raw`] and not have been released.
    pub unsafe fn from_raw(ptr: *mut WordPipe) -> Self {
        // SAFETY: upheld by the caller.
        *unsafe { Box::from_raw(ptr) }
    }

    /// See [`WordSource::next_word`].
    pub fn next_word(&mut self) -> u32 {
        self.source.next_word()
    }

    /// See [`WordSource::is_exhausted`].
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.source.is_exhausted()
    }

    /// See [`WordSource::stats`].
    #[must_use]
    pub fn stats(&self) -> SourceStats {
        self.source.stats()
    }
}

impl Drop for WordPipe {
    fn drop(&mut self) {
        let stats = self.source.stats();
        info!(
            words = stats.words,
            sentinels = stats.sentinels,
            bytes_read = stats.bytes_read,
            "wordpipe closed"
        );
    }
}
