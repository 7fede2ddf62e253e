//! Map codecs and sound channel model for the Ultima: Exodus editor.
//!
//! - [`compression`]: the LZSS and RLE codecs the ROM's map banks use, plus
//!   4-bit tile packing.
//! - [`apu`]: register-level model of the pulse, triangle, and noise channels
//!   used to preview music and sound effects.
//! - [`rom`]: the byte-buffer interface the codecs read from and write to.

pub mod apu;
pub mod compression;
pub mod config;
pub mod error;
pub mod rom;

pub use apu::{Apu, ApuSnapshot, Channel, ChannelParams};
pub use compression::{Compression, lzss, nibble, rle};
pub use config::{ApuConfig, CLOCK_INTERVAL};
pub use error::{Error, Result};
pub use rom::RomBuffer;

#[cfg(test)]
mod tests {
    use ctor::ctor;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

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
}
