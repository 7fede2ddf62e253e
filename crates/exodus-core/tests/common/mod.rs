#![allow(dead_code)]

use ctor::ctor;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Side of a square overworld map, in tiles.
pub const MAP_SIDE: usize = 64;

#[ctor]
fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_file(true)
        .with_line_number(true)
        .with_max_level(Level::DEBUG)
        .pretty()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

/// A 64x64 map of 4-bit tiles: ocean with a few rectangular islands and a
/// diagonal river, so it compresses like real map data.
pub fn overworld_map() -> Vec<u8> {
    const OCEAN: u8 = 0x0;
    const GRASS: u8 = 0x4;
    const FOREST: u8 = 0x5;
    const RIVER: u8 = 0x1;

    let mut tiles = vec![OCEAN; MAP_SIDE * MAP_SIDE];
    for (x0, y0, w, h, tile) in [(4, 4, 20, 12, GRASS), (30, 10, 25, 30, GRASS), (34, 14, 8, 6, FOREST)] {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                tiles[y * MAP_SIDE + x] = tile;
            }
        }
    }
    for i in 10..50 {
        tiles[i * MAP_SIDE + i] = RIVER;
    }
    tiles
}

/// Deterministic pseudo-random bytes (xorshift), for inputs with few repeats.
pub fn noise_bytes(len: usize, mut seed: u32) -> Vec<u8> {
    (0..len)
        .map(|_| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            (seed >> 24) as u8
        })
        .collect()
}
