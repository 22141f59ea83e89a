use crate::error::DecompressionError;
use crate::format::{Format, MATCH_FLAG, MIN_SHORT_MATCH, SHORT_COUNT_MASK, TokenLimits};

type Result<T> = core::result::Result<T, DecompressionError>;

/// One instruction of an encoded stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Raw bytes copied verbatim to the output, borrowed from the source.
    Literal(&'a [u8]),
    /// Copy `length` bytes starting `distance` bytes behind the output cursor.
    /// `distance` may be smaller than `length`, in which case the copy repeats
    /// the bytes it has just produced.
    Match { distance: usize, length: usize },
}

impl Token<'_> {
    /// Number of output bytes this token produces.
    #[must_use]
    pub const fn output_len(&self) -> usize {
        match self {
            Self::Literal(bytes) => bytes.len(),
            Self::Match { length, .. } => *length,
        }
    }
}

/// Parses tokens from an encoded stream, one at a time.
///
/// Only the source side is validated here: truncated encodings and tag shapes
/// the format does not define. Whether a match distance points into written
/// output is for the consumer to decide. After the first error the reader is
/// exhausted.
#[derive(Debug, Clone)]
pub struct TokenReader<'a> {
    input: &'a [u8],
    pos: usize,
    limits: TokenLimits,
    failed: bool,
}

impl<'a> TokenReader<'a> {
    #[must_use]
    pub const fn new(input: &'a [u8], format: Format) -> Self {
        Self {
            input,
            pos: 0,
            limits: format.limits(),
            failed: false,
        }
    }

    /// Offset of the next unread source byte.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` once the source is consumed exactly at a token boundary.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.pos == self.input.len()
    }

    fn read_u8(&mut self) -> Result<u8> {
        let byte = *self
            .input
            .get(self.pos)
            .ok_or(DecompressionError::TruncatedSource)?;
        self.pos += 1;
        Ok(byte)
    }

    fn read_u16_le(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        // `pos <= input.len()` always holds, so the subtraction cannot wrap.
        if len > self.input.len() - self.pos {
            return Err(DecompressionError::TruncatedSource);
        }
        let bytes = &self.input[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn read_distance(&mut self) -> Result<usize> {
        if self.limits.distance_bytes() == 2 {
            self.read_u16_le().map(usize::from)
        } else {
            self.read_u8().map(usize::from)
        }
    }

    /// Reads a 16-bit count that follows an escape tag. Zero is not a valid count.
    fn read_long_count(&mut self) -> Result<usize> {
        match self.read_u16_le()? {
            0 => Err(DecompressionError::MalformedToken),
            n => Ok(usize::from(n)),
        }
    }

    fn parse_token(&mut self) -> Result<Token<'a>> {
        let tag = self.read_u8()?;

        if self.limits.reserved_tag() == Some(tag) {
            return Err(DecompressionError::MalformedToken);
        }

        if tag & MATCH_FLAG == 0 {
            let run = if self.limits.literal_escape() == Some(tag) {
                self.read_long_count()?
            } else {
                usize::from(tag) + 1
            };
            return self.read_bytes(run).map(Token::Literal);
        }

        let length = if self.limits.match_escape() == Some(tag) {
            self.read_long_count()?
        } else {
            usize::from(tag & SHORT_COUNT_MASK) + MIN_SHORT_MATCH
        };
        let distance = self.read_distance()?;

        Ok(Token::Match { distance, length })
    }
}

impl<'a> Iterator for TokenReader<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.is_finished() {
            return None;
        }
        let token = self.parse_token();
        self.failed = token.is_err();
        Some(token)
    }
}

impl core::iter::FusedIterator for TokenReader<'_> {}
