//! Run-length codec used by the RLE map banks.
//!
//! | Control       | Action                                         |
//! |---------------|------------------------------------------------|
//! | `$00-$7F`     | read one byte, write it `control` times        |
//! | `$80`         | copy the next 256 bytes                        |
//! | `$81-$FE`     | copy the next `control - $80` bytes            |
//! | `$FF`         | end of stream                                  |

/// Terminates every encoded stream.
pub const END_OF_STREAM: u8 = 0xFF;

const MAX_RUN: usize = 0x7F;
const MAX_LITERALS: usize = 0x7E;
const LITERAL_BASE: u8 = 0x80;
const LONG_LITERAL_LEN: usize = 256;

fn flush_literals(literals: &mut Vec<u8>, out: &mut Vec<u8>) {
    if literals.is_empty() {
        return;
    }
    out.push(LITERAL_BASE + literals.len() as u8);
    out.append(literals);
}

/// Encodes `data`. Runs longer than two bytes become `(count, value)` pairs,
/// everything else is grouped into literal blocks.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() + 2);
    let mut literals = Vec::with_capacity(MAX_LITERALS);
    let mut position = 0;

    while position < data.len() {
        let value = data[position];
        let run = data[position..]
            .iter()
            .take_while(|&&byte| byte == value)
            .count();

        if run > 2 {
            flush_literals(&mut literals, &mut out);
            let mut remaining = run;
            while remaining > MAX_RUN {
                out.extend_from_slice(&[MAX_RUN as u8, value]);
                remaining -= MAX_RUN;
            }
            out.extend_from_slice(&[remaining as u8, value]);
        } else {
            if literals.len() + run > MAX_LITERALS {
                flush_literals(&mut literals, &mut out);
            }
            literals.extend_from_slice(&data[position..position + run]);
        }

        position += run;
    }

    flush_literals(&mut literals, &mut out);
    out.push(END_OF_STREAM);
    out
}

/// Decodes an RLE stream up to its terminator.
///
/// Truncated input ends decoding with whatever has been produced so far.
pub fn decode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut input = data;

    while let Some((&control, rest)) = input.split_first() {
        input = rest;
        match control {
            END_OF_STREAM => break,
            0x00..=0x7F => {
                let Some((&value, rest)) = input.split_first() else {
                    break;
                };
                input = rest;
                out.resize(out.len() + control as usize, value);
            }
            _ => {
                let count = match control {
                    LITERAL_BASE => LONG_LITERAL_LEN,
                    _ => (control - LITERAL_BASE) as usize,
                };
                let (block, rest) = input.split_at(count.min(input.len()));
                out.extend_from_slice(block);
                input = rest;
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_just_a_terminator() {
        assert_eq!(encode(&[]), [END_OF_STREAM]);
        assert!(decode(&[END_OF_STREAM]).is_empty());
        assert!(decode(&[]).is_empty());
    }

    #[test]
    fn runs_and_literals() {
        let data = [5, 5, 5, 5, 1, 2, 3];
        let packed = encode(&data);
        assert_eq!(packed, [4, 5, 0x83, 1, 2, 3, END_OF_STREAM]);
        assert_eq!(decode(&packed), data);
    }

    #[test]
    fn pairs_stay_literal() {
        let data = [9, 9, 4, 4, 4];
        let packed = encode(&data);
        assert_eq!(packed, [0x82, 9, 9, 3, 4, END_OF_STREAM]);
        assert_eq!(decode(&packed), data);
    }

    #[test]
    fn long_runs_are_split() {
        let data = vec![7u8; 300];
        let packed = encode(&data);
        assert_eq!(packed, [0x7F, 7, 0x7F, 7, 46, 7, END_OF_STREAM]);
        assert_eq!(decode(&packed), data);
    }

    #[test]
    fn literal_blocks_are_capped() {
        let data: Vec<u8> = (0..200).map(|i| i as u8).collect();
        let packed = encode(&data);

        assert_eq!(packed[0], 0xFE);
        assert_eq!(&packed[1..127], &data[..126]);
        assert_eq!(packed[127], 0x80 + 74);
        assert_eq!(&packed[128..202], &data[126..]);
        assert_eq!(packed[202], END_OF_STREAM);
        assert_eq!(decode(&packed), data);
    }

    #[test]
    fn flush_keeps_the_triggering_bytes() {
        // 125 singles followed by a pair overflows the block on the pair.
        let mut data: Vec<u8> = (0..125).map(|i| i as u8).collect();
        data.extend_from_slice(&[200, 200, 201]);
        assert_eq!(decode(&encode(&data)), data);
    }

    #[test]
    fn long_literal_control_copies_256_bytes() {
        let mut stream = vec![0x80];
        stream.extend((0..=255).map(|i| i as u8));
        stream.extend_from_slice(&[2, 0xAA, END_OF_STREAM]);

        let out = decode(&stream);
        assert_eq!(out.len(), 258);
        assert_eq!(&out[256..], &[0xAA, 0xAA]);
    }

    #[test]
    fn decode_stops_at_terminator_and_tolerates_truncation() {
        assert_eq!(decode(&[3, 1, END_OF_STREAM, 3, 2]), [1, 1, 1]);
        assert!(decode(&[5]).is_empty());
        assert_eq!(decode(&[0x84, 1, 2]), [1, 2]);
    }
}
