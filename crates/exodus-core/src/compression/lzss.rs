//! LZSS codec used by the map banks.
//!
//! The stream is a sequence of frames. Each frame starts with a flag byte whose
//! bits (LSB first) classify up to eight following units:
//!
//! - `1`: a literal byte, copied verbatim.
//! - `0`: a two-byte back-reference `[distance - 1, length - 3]` into the
//!   already decoded output.
//!
//! The 6502 decompressor in the ROM only understands a 256-byte window and
//! one-byte length fields, so the encoder is bound to those limits. Output of
//! [`encode`] is byte-for-byte what the editor has always produced: match
//! candidates are visited in ascending position order and the first longest
//! match wins, even when a closer candidate of the same length exists.

use thiserror::Error;
use tracing::{debug, error};

/// Size of the look-back window a back-reference may point into.
pub const WINDOW_SIZE: usize = 256;
/// Longest match that is still emitted as literals.
pub const MAX_UNENCODED: usize = 2;
/// Longest match a single back-reference can describe.
pub const MAX_CODED: usize = MAX_UNENCODED + 256;
/// Number of hash buckets used by the match finder.
pub const HASH_SIZE: usize = 1024;
/// Hard cap on decoded output.
pub const DECODE_LIMIT: usize = 4096;

/// Bytes hashed per match-finder key (the shortest match worth coding).
const KEY_LEN: usize = MAX_UNENCODED + 1;
/// Units carried by one flag byte.
const UNITS_PER_FRAME: usize = 8;

/// Encoder invariant violations. These are defects, never expected input errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzssError {
    #[error("match offset {offset} at position {position} does not fit in a byte")]
    OffsetOutOfRange { position: usize, offset: isize },
    #[error("match length {length} at position {position} does not fit in a byte")]
    LengthOutOfRange { position: usize, length: usize },
}

/// A back-reference candidate: absolute source position and match length.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub offset: usize,
    pub length: usize,
}

fn hash_key(data: &[u8], position: usize) -> usize {
    data[position..position + KEY_LEN]
        .iter()
        .fold(0, |key, &byte| ((key << 5) ^ byte as usize) % HASH_SIZE)
}

/// Positions of every 3-byte key in the input, bucketed by hash.
///
/// Built once per [`encode`] call; buckets keep ascending position order.
struct HashChains {
    buckets: Vec<Vec<usize>>,
}

impl HashChains {
    fn build(data: &[u8]) -> Self {
        let mut buckets = vec![Vec::new(); HASH_SIZE];
        for position in 0..data.len().saturating_sub(MAX_UNENCODED) {
            buckets[hash_key(data, position)].push(position);
        }
        Self { buckets }
    }

    fn find_match(&self, data: &[u8], position: usize) -> Match {
        let mut best = Match::default();
        if position + KEY_LEN > data.len() {
            return best;
        }

        let bucket = &self.buckets[hash_key(data, position)];
        let window_start = position.saturating_sub(WINDOW_SIZE);
        let first = bucket.partition_point(|&candidate| candidate < window_start);

        for &candidate in &bucket[first..] {
            if candidate >= position {
                break;
            }
            // Buckets also hold hash collisions.
            if data[candidate] != data[position] {
                continue;
            }

            let mut length = 1;
            while position + length < data.len()
                && length < MAX_CODED
                && data[candidate + length] == data[position + length]
            {
                length += 1;
            }

            if length > best.length {
                best = Match {
                    offset: candidate,
                    length,
                };
            }
            if length >= MAX_CODED {
                best.length = MAX_CODED;
                break;
            }
        }

        best
    }
}

/// Turns a match found at `position` into its two-byte code.
fn encode_code(position: usize, found: Match) -> Result<[u8; 2], LzssError> {
    let offset = position as isize - 1 - found.offset as isize;
    let offset_byte =
        u8::try_from(offset).map_err(|_| LzssError::OffsetOutOfRange { position, offset })?;
    let length_byte = found
        .length
        .checked_sub(KEY_LEN)
        .and_then(|length| u8::try_from(length).ok())
        .ok_or(LzssError::LengthOutOfRange {
            position,
            length: found.length,
        })?;
    Ok([offset_byte, length_byte])
}

/// Flag byte under construction plus the units it describes.
#[derive(Debug)]
struct FlagFrame {
    flags: u8,
    bit: u8,
    pending: [u8; 2 * UNITS_PER_FRAME],
    pending_len: usize,
}

impl FlagFrame {
    fn new() -> Self {
        Self {
            flags: 0,
            bit: 1,
            pending: [0; 2 * UNITS_PER_FRAME],
            pending_len: 0,
        }
    }

    fn push_literal(&mut self, byte: u8, out: &mut Vec<u8>) {
        self.flags |= self.bit;
        self.pending[self.pending_len] = byte;
        self.pending_len += 1;
        self.advance(out);
    }

    fn push_code(&mut self, code: [u8; 2], out: &mut Vec<u8>) {
        self.pending[self.pending_len..self.pending_len + 2].copy_from_slice(&code);
        self.pending_len += 2;
        self.advance(out);
    }

    fn advance(&mut self, out: &mut Vec<u8>) {
        if self.bit == 0x80 {
            self.flush(out);
        } else {
            self.bit <<= 1;
        }
    }

    fn flush(&mut self, out: &mut Vec<u8>) {
        if self.pending_len == 0 {
            return;
        }
        out.push(self.flags);
        out.extend_from_slice(&self.pending[..self.pending_len]);
        self.flags = 0;
        self.bit = 1;
        self.pending_len = 0;
    }
}

/// Compresses `data`, reporting encoder invariant violations as errors.
pub fn try_encode(data: &[u8]) -> Result<Vec<u8>, LzssError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let chains = HashChains::build(data);
    let mut out = Vec::with_capacity(data.len() + data.len() / UNITS_PER_FRAME + 1);
    let mut frame = FlagFrame::new();
    let mut position = 0;

    while position < data.len() {
        let mut found = chains.find_match(data, position);
        found.length = found.length.min(data.len() - position);

        if found.length <= MAX_UNENCODED {
            frame.push_literal(data[position], &mut out);
            position += 1;
        } else {
            frame.push_code(encode_code(position, found)?, &mut out);
            position += found.length;
        }
    }
    frame.flush(&mut out);

    debug!(input = data.len(), output = out.len(), "lzss encoded");
    Ok(out)
}

/// Compresses `data`.
///
/// Returns an empty buffer (and logs the defect) if an internal invariant is
/// violated.
pub fn encode(data: &[u8]) -> Vec<u8> {
    try_encode(data).unwrap_or_else(|err| {
        error!(%err, "lzss encode aborted");
        Vec::new()
    })
}

/// Decompresses an LZSS stream.
///
/// Never fails: decoding stops when the input runs out (a truncated trailing
/// unit is treated as end of stream), when a back-reference points before the
/// start of the output, or once [`DECODE_LIMIT`] bytes have been produced.
pub fn decode(data: &[u8]) -> Vec<u8> {
    let mut input = data.iter().copied();
    let mut out = Vec::new();
    let mut flags: u8 = 0;
    let mut flags_used = UNITS_PER_FRAME - 1;

    while out.len() < DECODE_LIMIT {
        flags >>= 1;
        flags_used += 1;

        if flags_used == UNITS_PER_FRAME {
            let Some(next) = input.next() else { break };
            flags = next;
            flags_used = 0;
        }

        if flags & 1 != 0 {
            let Some(byte) = input.next() else { break };
            out.push(byte);
            continue;
        }

        let Some(offset) = input.next() else { break };
        let Some(raw_length) = input.next() else { break };

        let distance = offset as usize + 1;
        if distance > out.len() {
            debug!(distance, produced = out.len(), "lzss back-reference before start");
            break;
        }

        // Source and destination may overlap, so copy one byte at a time.
        for _ in 0..raw_length as usize + KEY_LEN {
            if out.len() == DECODE_LIMIT {
                break;
            }
            let byte = out[out.len() - distance];
            out.push(byte);
        }
    }

    out
}
