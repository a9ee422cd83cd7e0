use rand::{Rng, RngCore};

use super::readers::{grouped, pattern};
use crate::{SourceOptions, WordSource};

#[test]
fn fill_bytes_preserves_stream_order() {
    let input = pattern(32);
    let mut source = WordSource::with_options(&input[..], SourceOptions::with_capacity(8)).unwrap();

    let mut head = [0u8; 6];
    source.fill_bytes(&mut head);
    assert_eq!(head, input[..6]);

    // The partial word consumed all four of its bytes.
    let mut rest = [0u8; 24];
    source.fill_bytes(&mut rest);
    assert_eq!(rest, input[8..]);
}

#[test]
fn next_u32_is_next_word() {
    let input = pattern(16);
    let mut source = WordSource::new(&input[..]);
    let expected = grouped(&input);

    assert_eq!(RngCore::next_u32(&mut source), expected[0]);
    assert_eq!(source.r#gen::<u32>(), expected[1]);
}

#[test]
fn try_fill_bytes_fails_after_the_stream() {
    let input = pattern(8);
    let mut source = WordSource::new(&input[..]);

    let mut buf = [0u8; 8];
    source.try_fill_bytes(&mut buf).unwrap();
    assert_eq!(buf, input[..]);

    assert!(source.try_fill_bytes(&mut buf).is_err());
    assert!(source.is_exhausted());
}
