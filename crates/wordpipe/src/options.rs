use crate::{Error, WORD_BYTES};

/// Buffer capacity used when no other is configured, in bytes.
pub const DEFAULT_CAPACITY: usize = 8192;

/// Configuration for a [`WordSource`](crate::WordSource).
///
/// # Examples
///
/// ```rust
/// use wordpipe::{SourceOptions, WordSource};
///
/// let options = SourceOptions::with_capacity(16);
/// let source = WordSource::with_options(&[1u8, 0, 0, 0][..], options).unwrap();
/// assert_eq!(source.capacity(), 16);
/// ```
///
/// # Default
///
/// A capacity of [`DEFAULT_CAPACITY`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceOptions {
    /// Size of the byte buffer, which is also the most a single refill can
    /// read from the channel.
    ///
    /// Must be a multiple of 4 and at least 4. A capacity that does not
    /// divide into whole words would leave bytes stranded at every refill.
    ///
    /// # Default
    ///
    /// `8192`
    pub capacity: usize,
}

impl SourceOptions {
    /// Options with the given buffer capacity and everything else defaulted.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.capacity < WORD_BYTES || self.capacity % WORD_BYTES != 0 {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
