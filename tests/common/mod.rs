//! Test-only stream builders: a token writer for hand-made streams and a
//! greedy hash-chain encoder for round-trip tests.

#![allow(dead_code)]

use kauai_codec::{Format, TokenLimits};

/// Shortest match worth encoding.
const MIN_MATCH: usize = 3;

/// Maximum number of hash chain entries to inspect per position.
const MAX_SEARCH_DEPTH: usize = 16;

/// Hash mask for the 4096-entry table (12 bits).
const HASH_MASK: usize = 0xFFF;

/// Marker for an empty hash table entry.
const EMPTY_ENTRY: usize = usize::MAX;

/// Appends well-formed tokens of one format to a buffer.
///
/// Runs longer than a single token can carry are split across several tokens.
pub struct TokenWriter {
    limits: TokenLimits,
    out: Vec<u8>,
}

impl TokenWriter {
    pub fn new(format: Format) -> Self {
        Self {
            limits: format.limits(),
            out: Vec::new(),
        }
    }

    pub fn literal(&mut self, bytes: &[u8]) -> &mut Self {
        for run in bytes.chunks(self.limits.max_literal_run()) {
            match self.limits.literal_escape() {
                Some(escape) if run.len() > usize::from(escape) => {
                    self.out.push(escape);
                    self.out.extend_from_slice(&(run.len() as u16).to_le_bytes());
                }
                _ => self.out.push((run.len() - 1) as u8),
            }
            self.out.extend_from_slice(run);
        }
        self
    }

    /// Emits a back-reference. `distance` is written as given, so out-of-range
    /// values (including 0) can be produced for negative tests.
    pub fn back_ref(&mut self, distance: usize, length: usize) -> &mut Self {
        assert!(distance <= self.limits.max_distance(), "distance not encodable");
        let max = self.limits.max_match_length();
        let mut remaining = length;

        while remaining > 0 {
            let mut take = remaining.min(max);
            // Without a long form the shortest match is 2 bytes; never leave 1.
            if self.limits.match_escape().is_none() && remaining - take == 1 {
                take -= 1;
            }
            self.match_token(distance, take);
            remaining -= take;
        }
        self
    }

    fn match_token(&mut self, distance: usize, length: usize) {
        if (2..=0x80).contains(&length) {
            self.out.push(0x80 | (length - 2) as u8);
        } else {
            let escape = self.limits.match_escape().expect("length not encodable");
            self.out.push(escape);
            self.out.extend_from_slice(&(length as u16).to_le_bytes());
        }

        match self.limits.distance_bytes() {
            1 => self.out.push(distance as u8),
            _ => self.out.extend_from_slice(&(distance as u16).to_le_bytes()),
        }
    }

    pub fn finish(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.out)
    }
}

/// Encodes `input` with a greedy LZ77 parse over a hash chain.
pub fn encode(input: &[u8], format: Format) -> Vec<u8> {
    let limits = format.limits();
    let window = limits.max_distance();
    let max_match = limits.max_match_length();

    let mut head = vec![EMPTY_ENTRY; HASH_MASK + 1];
    let mut prev = vec![EMPTY_ENTRY; input.len()];
    let mut writer = TokenWriter::new(format);
    let mut literal_start = 0;
    let mut pos = 0;

    let insert = |head: &mut [usize], prev: &mut [usize], idx: usize| {
        if idx + MIN_MATCH <= input.len() {
            let h = hash_3_bytes(&input[idx..idx + MIN_MATCH]);
            prev[idx] = head[h];
            head[h] = idx;
        }
    };

    while pos < input.len() {
        let mut best_len = 0;
        let mut best_dist = 0;

        if pos + MIN_MATCH <= input.len() {
            let mut candidate = head[hash_3_bytes(&input[pos..pos + MIN_MATCH])];
            let mut depth = 0;

            while candidate != EMPTY_ENTRY && depth < MAX_SEARCH_DEPTH {
                let dist = pos - candidate;
                if dist > window {
                    break;
                }
                let len = common_prefix_len(&input[pos..], &input[candidate..], max_match);
                if len > best_len {
                    best_len = len;
                    best_dist = dist;
                }
                candidate = prev[candidate];
                depth += 1;
            }
        }

        if best_len >= MIN_MATCH {
            writer.literal(&input[literal_start..pos]);
            writer.back_ref(best_dist, best_len);
            for _ in 0..best_len {
                insert(&mut head, &mut prev, pos);
                pos += 1;
            }
            literal_start = pos;
        } else {
            insert(&mut head, &mut prev, pos);
            pos += 1;
        }
    }

    writer.literal(&input[literal_start..]);
    writer.finish()
}

/// Hashes the first 3 bytes of a slice for the dictionary lookup.
fn hash_3_bytes(b: &[u8]) -> usize {
    let h = ((b[0] as usize) << 6) ^ ((b[1] as usize) << 3) ^ (b[2] as usize);
    h & HASH_MASK
}

/// Finds the length of the common prefix between two slices, up to `max`.
fn common_prefix_len(a: &[u8], b: &[u8], max: usize) -> usize {
    let limit = a.len().min(b.len()).min(max);
    let mut len = 0;
    while len < limit && a[len] == b[len] {
        len += 1;
    }
    len
}

/// Deterministic pseudo-random bytes (LCG with a fixed seed).
pub fn generate_random(size: usize) -> Vec<u8> {
    let mut seed: u64 = 0xDEAD_BEEF;
    (0..size)
        .map(|_| {
            seed = (seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223)) & 0xFFFF_FFFF;
            (seed >> 24) as u8
        })
        .collect()
}

/// Repeated English text truncated to `size` bytes.
pub fn generate_text(size: usize) -> Vec<u8> {
    b"The quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(size)
        .collect()
}
