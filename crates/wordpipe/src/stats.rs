/// Running counters kept by a [`WordSource`](crate::WordSource).
///
/// Reading them is free and does not disturb decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceStats {
    /// Words decoded from stream data.
    pub words: u64,
    /// Sentinel words served after the stream ended.
    pub sentinels: u64,
    /// Refills that delivered at least one byte.
    pub refills: u64,
    /// Bytes received from the upstream channel.
    pub bytes_read: u64,
    /// Bytes a refill discarded unread.
    ///
    /// When refills are only triggered by word extraction this is the 1 to 3
    /// byte tail of a stream that ended mid-word, and zero otherwise.
    pub dropped_tail: u64,
}

impl SourceStats {
    /// Total words handed out, real and sentinel.
    #[must_use]
    pub fn served(&self) -> u64 {
        self.words + self.sentinels
    }
}
