use std::{num::ParseIntError, path::PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use exodus_core::Compression;
use tracing::Level;

/// Map data packer and sound channel probe
#[derive(Parser, Debug)]
#[command(name = "exodus-cli")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: Level,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compress raw tile data into a bank payload
    Pack(PackArgs),
    /// Decompress a bank payload back to raw tile data
    Unpack(UnpackArgs),
    /// Apply channel register writes and print the resulting wave parameters
    Probe(ProbeArgs),
}

#[derive(ClapArgs, Debug)]
pub struct PackArgs {
    /// Raw tile data, one byte per tile
    pub input: PathBuf,

    /// Packed output; `.lzss` and `.rle` select the format
    pub output: PathBuf,

    /// Override the format inferred from the output extension (none, rle, lzss)
    #[arg(short, long)]
    pub compression: Option<Compression>,

    /// Pack two 4-bit tiles per byte before compressing
    #[arg(long)]
    pub nibbles: bool,

    /// Fail if the packed data is larger than this many bytes
    #[arg(long)]
    pub capacity: Option<usize>,
}

#[derive(ClapArgs, Debug)]
pub struct UnpackArgs {
    /// Packed payload; `.lzss` and `.rle` select the format
    pub input: PathBuf,

    /// Raw tile data output
    pub output: PathBuf,

    /// Override the format inferred from the input extension (none, rle, lzss)
    #[arg(short, long)]
    pub compression: Option<Compression>,

    /// Split every byte into two 4-bit tiles after decompressing
    #[arg(long)]
    pub nibbles: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ProbeArgs {
    /// Register writes as `ADDR=VALUE` in hex, e.g. `4000=9F` or `$4003=08`
    #[arg(value_parser = parse_write, required = true)]
    pub writes: Vec<(u16, u8)>,

    /// Sequencer ticks to run after the writes
    #[arg(short, long, default_value_t = 0)]
    pub ticks: u32,
}

fn parse_hex<T>(text: &str, parse: fn(&str, u32) -> Result<T, ParseIntError>) -> Result<T, String> {
    let digits = text
        .trim()
        .trim_start_matches('$')
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    parse(digits, 16).map_err(|err| format!("`{text}` is not a hex number: {err}"))
}

/// Parses one `ADDR=VALUE` register write.
pub fn parse_write(text: &str) -> Result<(u16, u8), String> {
    let (addr, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected ADDR=VALUE, got `{text}`"))?;
    Ok((parse_hex(addr, u16::from_str_radix)?, parse_hex(value, u8::from_str_radix)?))
}
