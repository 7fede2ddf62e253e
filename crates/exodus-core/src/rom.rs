//! Flat ROM buffer interface.
//!
//! The editor owns the ROM image and its bank/address layout. The codecs only
//! need random-access reads and bounded writes over a byte buffer.

use tracing::debug;

use crate::{
    compression::Compression,
    error::{Error, Result},
};

pub trait RomBuffer {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads up to `count` bytes at `offset`, clamped to the end of the buffer.
    fn read_range(&self, offset: usize, count: usize) -> &[u8];

    /// Overwrites bytes at `offset`. Never grows the buffer.
    fn write_range(&mut self, offset: usize, data: &[u8]) -> Result<()>;
}

impl RomBuffer for [u8] {
    fn len(&self) -> usize {
        <[u8]>::len(self)
    }

    fn read_range(&self, offset: usize, count: usize) -> &[u8] {
        let size = <[u8]>::len(self);
        let start = offset.min(size);
        let end = offset.saturating_add(count).min(size);
        &self[start..end]
    }

    fn write_range(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        let size = <[u8]>::len(self);
        let end = offset
            .checked_add(data.len())
            .filter(|&end| end <= size)
            .ok_or(Error::OutOfBounds {
                offset,
                len: data.len(),
                size,
            })?;
        self[offset..end].copy_from_slice(data);
        Ok(())
    }
}

impl RomBuffer for Vec<u8> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn read_range(&self, offset: usize, count: usize) -> &[u8] {
        self.as_slice().read_range(offset, count)
    }

    fn write_range(&mut self, offset: usize, data: &[u8]) -> Result<()> {
        self.as_mut_slice().write_range(offset, data)
    }
}

/// Compresses `data` and writes it at `offset`, provided the result fits in the
/// `capacity` bytes reserved there. Returns the packed length.
pub fn store_packed<R: RomBuffer + ?Sized>(
    rom: &mut R,
    offset: usize,
    capacity: usize,
    compression: Compression,
    data: &[u8],
) -> Result<usize> {
    let packed = compression.compress(data)?;
    if packed.len() > capacity {
        return Err(Error::DoesNotFit {
            needed: packed.len(),
            capacity,
        });
    }
    rom.write_range(offset, &packed)?;
    debug!(
        %compression,
        offset,
        packed = packed.len(),
        capacity,
        "stored packed data"
    );
    Ok(packed.len())
}

/// Reads the `capacity`-byte region at `offset` and unpacks it.
pub fn load_packed<R: RomBuffer + ?Sized>(
    rom: &R,
    offset: usize,
    capacity: usize,
    compression: Compression,
) -> Vec<u8> {
    compression.decompress(rom.read_range(offset, capacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_clamped() {
        let rom: Vec<u8> = (0..16).collect();
        assert_eq!(rom.read_range(14, 8), &[14, 15]);
        assert!(rom.read_range(32, 4).is_empty());
        assert!(rom.read_range(usize::MAX, 4).is_empty());
    }

    #[test]
    fn writes_never_grow_the_buffer() {
        let mut rom = vec![0u8; 8];
        rom.write_range(6, &[1, 2]).expect("fits");
        assert_eq!(rom, [0, 0, 0, 0, 0, 0, 1, 2]);

        let err = rom.write_range(7, &[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfBounds {
                offset: 7,
                len: 2,
                size: 8
            }
        ));
        assert_eq!(rom.len(), 8);
    }

    #[test]
    fn oversized_data_is_not_written() {
        let mut rom = vec![0xEEu8; 32];
        let data: Vec<u8> = (0..64).collect();

        let err = store_packed(&mut rom, 4, 16, Compression::Rle, &data).unwrap_err();
        assert!(matches!(err, Error::DoesNotFit { capacity: 16, .. }));
        assert!(rom.iter().all(|&b| b == 0xEE));
    }

    #[test]
    fn store_then_load() {
        let mut rom = vec![0u8; 64];
        let data = vec![3u8; 200];

        let written = store_packed(rom.as_mut_slice(), 10, 20, Compression::Lzss, &data)
            .expect("fits in 20 bytes");
        assert!(written <= 20);
        assert_eq!(load_packed(rom.as_slice(), 10, written, Compression::Lzss), data);
    }
}
