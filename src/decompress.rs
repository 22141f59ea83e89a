use crate::error::DecompressionError;
use crate::format::Format;
use crate::token::{Token, TokenReader};

#[cfg(feature = "alloc")]
use alloc::{vec, vec::Vec};

type Result<T> = core::result::Result<T, DecompressionError>;

/// Decompresses `input` into `output`, returning the number of bytes written.
///
/// `output.len()` is the destination capacity; nothing past it is ever touched,
/// and no byte past `input.len()` is ever read. On error the bytes written by
/// earlier tokens stay in `output` and the error names the first token that
/// could not be applied.
///
/// An empty `input` decodes to zero bytes for any destination, including an
/// empty one.
pub fn decompress(input: &[u8], output: &mut [u8], format: Format) -> Result<usize> {
    let mut sink = SliceSink { buf: output, pos: 0 };
    run(input, format, &mut sink)
}

/// Returns the exact number of bytes `input` decodes to, without writing them.
///
/// The stream is validated just as [`decompress`] would validate it given a
/// destination of unlimited capacity, so a successful result is the smallest
/// destination size for which `decompress` succeeds.
pub fn decompressed_len(input: &[u8], format: Format) -> Result<usize> {
    let mut sink = CountingSink { pos: 0 };
    run(input, format, &mut sink)
}

/// Decompresses `input` into a freshly allocated vector of exactly the decoded size.
///
/// A single extended token can expand to 65535 bytes, so the decoded size of
/// an untrusted stream is bounded by `max_len`: streams that would produce
/// more fail with [`DecompressionError::DestinationOverflow`] before anything
/// is allocated.
#[cfg(feature = "alloc")]
pub fn decompress_to_vec(input: &[u8], format: Format, max_len: usize) -> Result<Vec<u8>> {
    let len = decompressed_len(input, format)?;
    if len > max_len {
        log::debug!("decoded size {len} exceeds limit {max_len}");
        return Err(DecompressionError::DestinationOverflow);
    }
    let mut output = vec![0u8; len];
    let written = decompress(input, &mut output, format)?;
    debug_assert_eq!(written, len);
    Ok(output)
}

/// Destination of the decode loop.
///
/// Capacity and distance checks happen in [`run`] before any call here, so
/// the write methods are infallible.
trait Sink {
    /// Bytes produced so far in this call.
    fn written(&self) -> usize;

    /// Bytes that may still be produced.
    fn remaining(&self) -> usize;

    fn put_literal(&mut self, bytes: &[u8]);

    /// Requires `1 <= distance <= written()` and `length <= remaining()`.
    fn put_match(&mut self, distance: usize, length: usize);
}

/// Writes into a caller-supplied buffer.
struct SliceSink<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl Sink for SliceSink<'_> {
    fn written(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn put_literal(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    #[inline]
    fn put_match(&mut self, distance: usize, length: usize) {
        let src_pos = self.pos - distance;
        let end = self.pos + length;

        if distance == 1 {
            // RLE: every byte repeats the last one written.
            let byte = self.buf[src_pos];
            self.buf[self.pos..end].fill(byte);
        } else if distance >= length {
            // Source and destination ranges are disjoint.
            self.buf.copy_within(src_pos..src_pos + length, self.pos);
        } else {
            // Overlapping: each byte may read one produced by this same copy.
            for k in 0..length {
                self.buf[self.pos + k] = self.buf[src_pos + k];
            }
        }

        self.pos = end;
    }
}

/// Counts output without storing it.
struct CountingSink {
    pos: usize,
}

impl Sink for CountingSink {
    fn written(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> usize {
        usize::MAX - self.pos
    }

    fn put_literal(&mut self, bytes: &[u8]) {
        self.pos += bytes.len();
    }

    fn put_match(&mut self, _distance: usize, length: usize) {
        self.pos += length;
    }
}

/// The decode loop shared by every entry point and both formats.
fn run<S: Sink>(input: &[u8], format: Format, sink: &mut S) -> Result<usize> {
    let mut tokens = TokenReader::new(input, format);

    loop {
        let token_start = tokens.position();
        let Some(token) = tokens.next() else {
            break;
        };

        if let Err(err) = token.and_then(|token| apply(token, sink)) {
            log::debug!(
                "decode failed ({err}) at source offset {token_start}, output offset {}",
                sink.written()
            );
            return Err(err);
        }
    }

    Ok(sink.written())
}

/// Checks a token against the current output state, then emits it.
#[inline]
fn apply<S: Sink>(token: Token<'_>, sink: &mut S) -> Result<()> {
    match token {
        Token::Literal(bytes) => {
            if bytes.len() > sink.remaining() {
                return Err(DecompressionError::DestinationOverflow);
            }
            sink.put_literal(bytes);
        }
        Token::Match { distance, length } => {
            if distance == 0 || distance > sink.written() {
                return Err(DecompressionError::InvalidBackReference);
            }
            if length > sink.remaining() {
                return Err(DecompressionError::DestinationOverflow);
            }
            sink.put_match(distance, length);
        }
    }
    Ok(())
}
