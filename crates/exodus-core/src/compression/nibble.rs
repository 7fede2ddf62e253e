//! 4-bit tile packing used by overworld and town maps.
//!
//! Tile ids in those maps never exceed 15, so the game stores two per byte
//! (left tile in the high nibble) before the bank compressor runs.

use crate::error::{Error, Result};

fn checked(index: usize, value: u8) -> Result<u8> {
    if value > 0x0F {
        return Err(Error::NibbleOutOfRange { index, value });
    }
    Ok(value)
}

/// Packs tile ids two per byte. An odd trailing tile is paired with 0.
pub fn pack(tiles: &[u8]) -> Result<Vec<u8>> {
    tiles
        .chunks(2)
        .enumerate()
        .map(|(pair, chunk)| {
            let left = checked(pair * 2, chunk[0])?;
            let right = match chunk.get(1) {
                Some(&value) => checked(pair * 2 + 1, value)?,
                None => 0,
            };
            Ok((left << 4) | right)
        })
        .collect()
}

/// Expands each byte into its high and low nibble.
pub fn unpack(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&byte| [byte >> 4, byte & 0x0F])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_high_nibble_first() {
        assert_eq!(pack(&[0x1, 0x2, 0xF, 0x0]).ok(), Some(vec![0x12, 0xF0]));
        assert_eq!(unpack(&[0x12, 0xF0]), [0x1, 0x2, 0xF, 0x0]);
    }

    #[test]
    fn odd_length_is_padded() {
        assert_eq!(pack(&[0x3, 0x4, 0x5]).ok(), Some(vec![0x34, 0x50]));
    }

    #[test]
    fn rejects_wide_tiles() {
        let err = pack(&[0x1, 0x2, 0x3, 0x10]).unwrap_err();
        assert!(matches!(
            err,
            Error::NibbleOutOfRange {
                index: 3,
                value: 0x10
            }
        ));
    }
}
