use rstest::rstest;

use super::readers::{grouped, pattern};
use crate::{Error, SourceOptions, WordSource};

#[rstest]
#[case([0x01, 0x00, 0x00, 0x00], 1)]
#[case([0x00, 0x01, 0x00, 0x00], 0x0000_0100)]
#[case([0x00, 0x00, 0x00, 0x80], 0x8000_0000)]
#[case([0x78, 0x56, 0x34, 0x12], 0x1234_5678)]
#[case([0xFF, 0xFF, 0xFF, 0xFF], u32::MAX)]
fn byte_order_is_little_endian(#[case] bytes: [u8; 4], #[case] expected: u32) {
    let [b0, b1, b2, b3] = bytes.map(u32::from);
    assert_eq!(expected, b0 | (b1 << 8) | (b2 << 16) | (b3 << 24));

    let mut source = WordSource::new(&bytes[..]);
    assert_eq!(source.next_word(), expected);
}

#[test]
fn one_word_then_sentinel() {
    let input: &[u8] = &[0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
    let mut source = WordSource::with_options(input, SourceOptions::with_capacity(8)).unwrap();

    assert_eq!(source.next_word(), 1);
    assert_eq!(source.next_word(), 4_294_967_295);
    assert!(!source.is_exhausted());
    assert_eq!(source.next_word(), 0);
    assert!(source.is_exhausted());
    assert!(matches!(source.try_next_word(), Err(Error::EndOfStream)));

    let stats = source.stats();
    assert_eq!(stats.words, 2);
    assert_eq!(stats.sentinels, 1);
    assert_eq!(stats.served(), 3);
}

#[test]
fn consumes_words_in_order() {
    let input = pattern(4 * 1000);
    let mut source = WordSource::new(&input[..]);

    let decoded: Vec<u32> = (0..1000).map(|_| source.next_word()).collect();

    assert_eq!(decoded, grouped(&input));
    assert_eq!(source.remaining(), 0);
    assert_eq!(source.stats().refills, 1);
}

#[test]
fn first_call_refills() {
    let input = pattern(64);
    let mut source = WordSource::with_options(&input[..], SourceOptions::with_capacity(16)).unwrap();
    assert_eq!(source.remaining(), 0);
    assert_eq!(source.stats().refills, 0);

    source.next_word();
    assert_eq!(source.remaining(), 12);
    assert_eq!(source.stats().refills, 1);
}

#[test]
fn wide_words_pair_low_then_high() {
    let input: &[u8] = &[1, 0, 0, 0, 2, 0, 0, 0, 0xAA, 0xBB, 0xCC, 0xDD];
    let mut source = WordSource::new(input);

    assert_eq!(source.next_u64(), 0x0000_0002_0000_0001);
    // The low half is the last real word; the high half is the sentinel.
    assert_eq!(source.next_u64(), 0x0000_0000_DDCC_BBAA);
}

#[test]
fn ascii_listing() {
    let mut source = WordSource::new(&b"wordpipe"[..]);
    let rendered: Vec<String> = (0..3).map(|_| format!("{:#010x}", source.next_word())).collect();
    insta::assert_snapshot!(rendered.join(" "), @"0x64726f77 0x65706970 0x00000000");
}
