//! Map data compression.
//!
//! Each ROM bank holding map data is unpacked by one of two 6502 routines
//! (LZSS or RLE), or stores maps uncompressed. [`Compression`] names the format
//! and dispatches to the matching codec.

pub mod lzss;
pub mod nibble;
pub mod rle;

use core::fmt;
use std::{path::Path, str::FromStr};

use crate::error::{Error, Result};

/// First bytes of the LZSS decompressor when it sits at the start of a bank.
const LZSS_PROLOGUE: [u8; 12] = [
    0xA9, 0x78, 0x85, 0x2A, 0xA9, 0x00, 0x85, 0x29, 0xA9, 0x00, 0x85, 0xB4,
];
/// First bytes of the RLE decompressor when it sits at the start of a bank.
const RLE_PROLOGUE: [u8; 12] = [
    0xA0, 0x00, 0xB1, 0x29, 0xE6, 0x29, 0xD0, 0x02, 0xE6, 0x2A, 0xC9, 0x81,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compression {
    #[default]
    None,
    Rle,
    Lzss,
}

impl Compression {
    /// Picks the format from a file extension (`.lzss`, `.rle`); anything else
    /// is treated as raw data.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("lzss") => Self::Lzss,
            Some("rle") => Self::Rle,
            _ => Self::None,
        }
    }

    /// Guesses a bank's format from the code found at the start of the bank.
    pub fn detect(bank_prologue: &[u8]) -> Self {
        if bank_prologue.starts_with(&LZSS_PROLOGUE) {
            Self::Lzss
        } else if bank_prologue.starts_with(&RLE_PROLOGUE) {
            Self::Rle
        } else {
            Self::None
        }
    }

    /// Decompressor code that [`detect`](Self::detect) looks for. Empty for raw banks.
    pub const fn prologue(self) -> &'static [u8] {
        match self {
            Self::None => &[],
            Self::Rle => &RLE_PROLOGUE,
            Self::Lzss => &LZSS_PROLOGUE,
        }
    }

    pub fn compress(self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::None => Ok(data.to_vec()),
            Self::Rle => Ok(rle::encode(data)),
            Self::Lzss => Ok(lzss::try_encode(data)?),
        }
    }

    pub fn decompress(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::None => data.to_vec(),
            Self::Rle => rle::decode(data),
            Self::Lzss => lzss::decode(data),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Rle => "rle",
            Self::Lzss => "lzss",
        };
        f.write_str(s)
    }
}

impl FromStr for Compression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "raw" => Ok(Self::None),
            "rle" => Ok(Self::Rle),
            "lzss" => Ok(Self::Lzss),
            _ => Err(Error::UnknownCompression(s.to_string())),
        }
    }
}
