mod common;

use anyhow::Result;
use exodus_core::rom::{load_packed, store_packed};
use exodus_core::{Compression, Error, RomBuffer, nibble};

const BANK_SIZE: usize = 0x4000;
const MAP_OFFSET: usize = 0x0100;

fn bank_with_prologue(prologue: &[u8]) -> Vec<u8> {
    let mut bank = vec![0xEA; BANK_SIZE];
    bank[..prologue.len()].copy_from_slice(prologue);
    bank
}

#[test]
fn map_round_trips_through_a_detected_bank() -> Result<()> {
    let tiles = common::overworld_map();
    let packed_tiles = nibble::pack(&tiles)?;

    for format in [Compression::Lzss, Compression::Rle] {
        let mut bank = bank_with_prologue(format.prologue());
        let detected = Compression::detect(bank.read_range(0, 16));
        assert_eq!(detected, format);

        let capacity = BANK_SIZE - MAP_OFFSET;
        let written = store_packed(&mut bank, MAP_OFFSET, capacity, detected, &packed_tiles)?;
        assert_eq!(bank.len(), BANK_SIZE);

        let loaded = load_packed(&bank, MAP_OFFSET, written, detected);
        assert_eq!(nibble::unpack(&loaded), tiles);
    }
    Ok(())
}

#[test]
fn rle_region_can_be_read_past_the_payload() -> Result<()> {
    let mut bank = vec![0u8; 256];
    let data = b"shop inventory: 0000000000 potions".to_vec();

    store_packed(&mut bank, 16, 128, Compression::Rle, &data)?;
    // The terminator stops decoding, so the whole reserved region can be read.
    assert_eq!(load_packed(&bank, 16, 128, Compression::Rle), data);
    Ok(())
}

#[test]
fn payload_larger_than_the_region_is_rejected() {
    let mut bank = vec![0u8; 64];
    let data = common::noise_bytes(200, 7);

    let err = store_packed(&mut bank, 0, 64, Compression::None, &data).unwrap_err();
    assert!(matches!(
        err,
        Error::DoesNotFit {
            needed: 200,
            capacity: 64
        }
    ));

    let err = store_packed(&mut bank, 32, 64, Compression::None, &data[..40]).unwrap_err();
    assert!(matches!(err, Error::OutOfBounds { offset: 32, .. }));
}
