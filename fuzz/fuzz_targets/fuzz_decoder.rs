#![no_main]
use std::io::{self, Read};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wordpipe::{SourceOptions, WORD_BYTES, WordSource};

#[derive(Debug, Arbitrary)]
struct Input {
    /// Buffer capacity in words, folded into 1..=64.
    capacity_words: u8,
    /// Read sizes the channel cycles through; zeros are bumped to one.
    reads: Vec<u16>,
    /// Fail the channel with an I/O error instead of closing it cleanly.
    fail_at_end: bool,
    stream: Vec<u8>,
}

/// Hands out the stream in the sizes the fuzzer picked.
struct ScriptedChannel<'a> {
    data: &'a [u8],
    reads: &'a [u16],
    next: usize,
    fail_at_end: bool,
}

impl Read for ScriptedChannel<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            if self.fail_at_end {
                return Err(io::ErrorKind::ConnectionReset.into());
            }
            return Ok(0);
        }
        let size = match self.reads {
            [] => self.data.len(),
            reads => usize::from(reads[self.next % reads.len()]).max(1),
        };
        self.next += 1;
        let n = size.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn decoder(input: Input) {
    let capacity = WORD_BYTES * (1 + usize::from(input.capacity_words % 64));
    let channel = ScriptedChannel {
        data: &input.stream,
        reads: &input.reads,
        next: 0,
        fail_at_end: input.fail_at_end,
    };
    let mut source = WordSource::with_options(channel, SourceOptions::with_capacity(capacity))
        .expect("capacity is a positive multiple of the word size");

    for chunk in input.stream.chunks_exact(WORD_BYTES) {
        let expected = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        assert_eq!(source.try_next_word().ok(), Some(expected));
    }
    assert!(source.try_next_word().is_err());
    for _ in 0..4 {
        assert_eq!(source.next_word(), 0);
    }
    assert!(source.is_exhausted());

    let stats = source.stats();
    assert_eq!(stats.bytes_read, input.stream.len() as u64);
    assert_eq!(stats.dropped_tail, (input.stream.len() % WORD_BYTES) as u64);
    assert_eq!(stats.sentinels, 4);
}

fuzz_target!(|input: Input| decoder(input));
