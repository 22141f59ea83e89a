//! Token-width parameters for the two supported stream variants.
//!
//! Both variants share one tag byte layout: the high bit selects a literal run
//! (`0`) or a back-reference (`1`), and the low seven bits carry a short count.
//! They differ only in how wide the distance field is and whether the top tag
//! of each half escapes to a 16-bit count.

/// Tags below this value start a literal run.
pub const MATCH_FLAG: u8 = 0x80;

/// Mask for the short count carried in the tag byte.
pub const SHORT_COUNT_MASK: u8 = 0x7F;

/// Shortest back-reference that a short match tag can express.
pub const MIN_SHORT_MATCH: usize = 2;

/// Selects the token encoding of a compressed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    /// Original variant: 8-bit distances, no long runs.
    #[default]
    Legacy,
    /// Second variant: 16-bit distances plus escaped 16-bit literal and match counts.
    Extended,
}

/// Numeric limits of a [`Format`], threaded through the single decode routine.
///
/// Only obtainable from [`Format::limits`], so every value describes a real
/// variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLimits {
    /// Distances are 16-bit little-endian instead of a single byte.
    wide_distance: bool,
    literal_escape: Option<u8>,
    match_escape: Option<u8>,
    reserved_tag: Option<u8>,
}

impl TokenLimits {
    /// Width in bytes of the little-endian distance field of a match.
    #[must_use]
    pub const fn distance_bytes(&self) -> usize {
        if self.wide_distance { 2 } else { 1 }
    }

    /// Literal tag that is followed by a 16-bit run length instead of a short count.
    #[must_use]
    pub const fn literal_escape(&self) -> Option<u8> {
        self.literal_escape
    }

    /// Match tag that is followed by a 16-bit match length.
    #[must_use]
    pub const fn match_escape(&self) -> Option<u8> {
        self.match_escape
    }

    /// Tag value that no token shape of this variant accepts.
    #[must_use]
    pub const fn reserved_tag(&self) -> Option<u8> {
        self.reserved_tag
    }

    /// Largest distance a match token can encode.
    #[must_use]
    pub const fn max_distance(&self) -> usize {
        if self.wide_distance {
            u16::MAX as usize
        } else {
            u8::MAX as usize
        }
    }

    /// Longest literal run a single token can carry.
    #[must_use]
    pub const fn max_literal_run(&self) -> usize {
        if self.literal_escape.is_some() {
            u16::MAX as usize
        } else {
            SHORT_COUNT_MASK as usize + 1
        }
    }

    /// Longest back-reference a single token can carry.
    #[must_use]
    pub const fn max_match_length(&self) -> usize {
        if self.match_escape.is_some() {
            u16::MAX as usize
        } else {
            // The top short tag is reserved when there is no escape.
            SHORT_COUNT_MASK as usize - 1 + MIN_SHORT_MATCH
        }
    }
}

impl Format {
    /// Returns the token-width parameters of this variant.
    #[must_use]
    pub const fn limits(self) -> TokenLimits {
        match self {
            Self::Legacy => TokenLimits {
                wide_distance: false,
                literal_escape: None,
                match_escape: None,
                reserved_tag: Some(0xFF),
            },
            Self::Extended => TokenLimits {
                wide_distance: true,
                literal_escape: Some(0x7F),
                match_escape: Some(0xFF),
                reserved_tag: None,
            },
        }
    }
}
