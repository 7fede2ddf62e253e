use thiserror::Error;

use crate::compression::lzss::LzssError;

#[derive(Error, Debug)]
pub enum Error {
    /// The LZSS encoder hit one of its internal invariants.
    #[error("LZSS encoder invariant violated: {0}")]
    Lzss(#[from] LzssError),

    /// A tile id does not fit in four bits.
    #[error("tile {value:#04X} at index {index} does not fit in a nibble")]
    NibbleOutOfRange { index: usize, value: u8 },

    /// A write would run past the end of the ROM buffer.
    #[error("write of {len} bytes at {offset:#X} exceeds ROM buffer of {size} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        size: usize,
    },

    /// Packed data is larger than the region reserved for it.
    #[error("packed data needs {needed} bytes but only {capacity} are reserved")]
    DoesNotFit { needed: usize, capacity: usize },

    #[error("unknown compression format: {0}")]
    UnknownCompression(String),
}

pub type Result<T> = std::result::Result<T, Error>;
