use core::fmt;
use std::io::Read;

use tracing::debug;

use crate::WordSource;

/// A named source of 32-bit words, as seen by a test battery.
pub trait Generator {
    /// Label reported alongside battery results.
    fn name(&self) -> &str;

    /// The next 32 random bits.
    fn next_bits(&mut self) -> u32;
}

/// An external generator: a name and a zero-argument `u32` function.
///
/// This mirrors the object a statistical battery registers before a run. The
/// function is a closure, so whatever state it needs travels with it rather
/// than living in a global. Constructing the generator registers it and
/// dropping it deletes it; both are logged.
///
/// # Examples
///
/// Borrowing the source keeps its statistics readable after the run:
///
/// ```rust
/// use wordpipe::{ExternGen, Generator, WordSource};
///
/// let input: &[u8] = &[7, 0, 0, 0, 9, 0, 0, 0];
/// let mut source = WordSource::new(input);
/// {
///     let mut generator = ExternGen::new("fixture", || source.next_word());
///     assert_eq!(generator.next_bits(), 7);
///     assert_eq!(generator.next_bits(), 9);
/// }
/// assert_eq!(source.stats().words, 2);
/// ```
pub struct ExternGen<'a> {
    name: String,
    bits: Box<dyn FnMut() -> u32 + 'a>,
    calls: u64,
}

impl<'a> ExternGen<'a> {
    /// Registers `bits` under `name`.
    pub fn new(name: impl Into<String>, bits: impl FnMut() -> u32 + 'a) -> Self {
        let name = name.into();
        debug!(name = %name, "generator created");
        Self {
            name,
            bits: Box::new(bits),
            calls: 0,
        }
    }

    /// Registers a generator that owns `source`.
    pub fn from_source<R: Read + 'a>(name: impl Into<String>, mut source: WordSource<R>) -> Self {
        Self::new(name, move || source.next_word())
    }

    /// How many times the battery has pulled a word.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl Generator for ExternGen<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn next_bits(&mut self) -> u32 {
        self.calls += 1;
        (self.bits)()
    }
}

impl<G: Generator + ?Sized> Generator for &mut G {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn next_bits(&mut self) -> u32 {
        (**self).next_bits()
    }
}

impl Drop for ExternGen<'_> {
    fn drop(&mut self) {
        debug!(name = %self.name, calls = self.calls, "generator deleted");
    }
}

impl fmt::Debug for ExternGen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternGen")
            .field("name", &self.name)
            .field("calls", &self.calls)
            .finish_non_exhaustive()
    }
}
