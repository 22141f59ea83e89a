#![no_main]

use kauai_codec::{Format, decompress, decompressed_len};
use libfuzzer_sys::fuzz_target;

/// Guard byte surrounding the destination window.
const GUARD: u8 = 0xA5;

/// Verifies that the decoder safely handles arbitrary, potentially malformed input.
///
/// # Invariants
/// - The decoder returns `Ok(_)` or `Err(_)`; it never panics.
/// - Nothing outside the destination window is written (guard bytes intact).
/// - A successful result never exceeds the destination capacity and agrees with
///   the counting pass.
///
/// # Panics
/// Panics when any invariant fails. These panics signal a fuzzing failure.
fn verify_bounded_decode(stream: &[u8], format: Format, capacity: usize) {
    let mut buf = vec![GUARD; capacity + 64];
    let result = decompress(stream, &mut buf[32..32 + capacity], format);

    if buf[..32].iter().chain(&buf[32 + capacity..]).any(|&b| b != GUARD) {
        panic!("Write outside destination ({format:?}, capacity {capacity})");
    }

    if let Ok(n) = result {
        assert!(n <= capacity, "Reported {n} bytes into capacity {capacity}");
        assert_eq!(decompressed_len(stream, format), Ok(n));
    }
}

fuzz_target!(|data: &[u8]| {
    // The first two bytes pick the destination capacity; the rest is the stream.
    let (capacity, stream) = match data {
        [hi, lo, rest @ ..] => (usize::from(u16::from_be_bytes([*hi, *lo])) % 8192, rest),
        _ => (0, data),
    };

    verify_bounded_decode(stream, Format::Legacy, capacity);
    verify_bounded_decode(stream, Format::Extended, capacity);
});
