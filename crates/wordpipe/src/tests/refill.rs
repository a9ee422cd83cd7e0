use rstest::rstest;

use super::readers::{ChunkedReader, CountingReader, FailingReader, InterruptingReader, grouped, pattern};
use crate::{Error, SourceOptions, WordSource};

fn drain<R: std::io::Read>(source: &mut WordSource<R>) -> Vec<u32> {
    std::iter::from_fn(|| source.try_next_word().ok()).collect()
}

#[rstest]
#[case(4)]
#[case(8)]
#[case(16)]
#[case(8192)]
fn words_straddle_refills_intact(#[case] capacity: usize) {
    let input = pattern(2 * capacity + 8);
    let mut source =
        WordSource::with_options(&input[..], SourceOptions::with_capacity(capacity)).unwrap();

    assert_eq!(drain(&mut source), grouped(&input));

    let stats = source.stats();
    assert_eq!(stats.refills, input.len().div_ceil(capacity) as u64);
    assert_eq!(stats.bytes_read, input.len() as u64);
    assert_eq!(stats.dropped_tail, 0);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
fn trailing_partial_word_is_dropped(#[case] tail: usize) {
    let input = pattern(4 * 5 + tail);
    let mut source = WordSource::with_options(&input[..], SourceOptions::with_capacity(8)).unwrap();

    for expected in grouped(&input) {
        assert_eq!(source.next_word(), expected);
    }
    assert!(!source.is_exhausted());
    assert_eq!(source.next_word(), 0);
    assert!(source.is_exhausted());
    assert!(matches!(source.try_next_word(), Err(Error::EndOfStream)));

    let stats = source.stats();
    assert_eq!(stats.words, 5);
    assert_eq!(stats.dropped_tail, tail as u64);
    assert_eq!(stats.bytes_read, input.len() as u64);
}

#[test]
fn final_refill_shorter_than_a_word() {
    // 8 + 8 + 2: the last refill succeeds with two bytes, which can never
    // form a word.
    let input = pattern(18);
    let mut source = WordSource::with_options(&input[..], SourceOptions::with_capacity(8)).unwrap();

    assert_eq!(drain(&mut source), grouped(&input));
    assert_eq!(source.stats().refills, 3);
    assert_eq!(source.stats().dropped_tail, 2);
}

#[test]
fn exhaustion_is_sticky() {
    let mut source = WordSource::new(CountingReader {
        inner: std::io::empty(),
        reads: 0,
    });

    for _ in 0..1000 {
        assert_eq!(source.next_word(), 0);
    }
    assert!(source.is_exhausted());
    assert_eq!(source.get_ref().reads, 1);
    assert_eq!(source.stats().sentinels, 1000);
    assert_eq!(source.stats().words, 0);
    assert_eq!(source.stats().refills, 0);
}

#[test]
fn short_reads_never_split_words() {
    let input = pattern(200);
    let reader = ChunkedReader::new(&input, vec![0, 2, 4, 6, 1]);
    let mut source = WordSource::with_options(reader, SourceOptions::with_capacity(12)).unwrap();

    assert_eq!(drain(&mut source), grouped(&input));
    assert_eq!(source.stats().dropped_tail, 0);
}

#[test]
fn interrupted_reads_are_retried() {
    let input = pattern(40);
    let reader = InterruptingReader {
        data: &input,
        interrupt: false,
    };
    let mut source = WordSource::with_options(reader, SourceOptions::with_capacity(16)).unwrap();

    assert_eq!(drain(&mut source), grouped(&input));
    assert_eq!(source.stats().refills, 3);
}

#[test]
fn channel_error_after_partial_refill() {
    let input = pattern(10);
    let mut source =
        WordSource::with_options(FailingReader { data: &input }, SourceOptions::with_capacity(16))
            .unwrap();

    let expected = grouped(&input);
    assert_eq!(source.try_next_word().unwrap(), expected[0]);
    assert_eq!(source.try_next_word().unwrap(), expected[1]);
    match source.try_next_word() {
        Err(Error::Channel(err)) => assert_eq!(err.kind(), std::io::ErrorKind::BrokenPipe),
        other => panic!("expected a channel error, got {other:?}"),
    }
    assert!(matches!(source.try_next_word(), Err(Error::EndOfStream)));
    assert_eq!(source.next_word(), 0);
    assert_eq!(source.stats().dropped_tail, 2);
}

#[test]
fn channel_error_before_any_data() {
    let mut source = WordSource::new(FailingReader { data: &[] });

    assert!(matches!(source.try_next_word(), Err(Error::Channel(_))));
    assert_eq!(source.next_word(), 0);
    assert!(source.is_exhausted());
}

#[test]
fn manual_refill_discards_unread_bytes() {
    let input = pattern(16);
    let mut source = WordSource::with_options(&input[..], SourceOptions::with_capacity(8)).unwrap();
    let expected = grouped(&input);

    assert_eq!(source.next_word(), expected[0]);
    assert_eq!(source.refill().unwrap(), 8);
    assert_eq!(source.stats().dropped_tail, 4);
    assert_eq!(source.next_word(), expected[2]);
    assert_eq!(source.next_word(), expected[3]);
}

#[test]
fn into_inner_returns_the_channel() {
    let input = pattern(12);
    let mut source = WordSource::with_options(&input[..], SourceOptions::with_capacity(4)).unwrap();
    source.next_word();

    let rest = source.into_inner();
    assert_eq!(rest, &input[4..]);
}
