use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use exodus_core::{Apu, ChannelParams, Compression, nibble};
use tracing::{info, warn};

use crate::args::{PackArgs, ProbeArgs, UnpackArgs};

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn write(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("writing {}", path.display()))
}

pub fn pack(args: PackArgs) -> Result<()> {
    let compression = args
        .compression
        .unwrap_or_else(|| Compression::from_path(&args.output));
    let raw = read(&args.input)?;

    let data = if args.nibbles {
        nibble::pack(&raw).with_context(|| format!("packing tiles of {}", args.input.display()))?
    } else {
        raw
    };
    let packed = compression.compress(&data)?;

    if let Some(capacity) = args.capacity
        && packed.len() > capacity
    {
        bail!(
            "{compression} output is {} bytes, {} over the {capacity}-byte limit",
            packed.len(),
            packed.len() - capacity
        );
    }

    write(&args.output, &packed)?;
    info!(
        %compression,
        input = data.len(),
        output = packed.len(),
        "packed {}",
        args.output.display()
    );
    Ok(())
}

pub fn unpack(args: UnpackArgs) -> Result<()> {
    let compression = args
        .compression
        .unwrap_or_else(|| Compression::from_path(&args.input));
    let packed = read(&args.input)?;

    let mut data = compression.decompress(&packed);
    if data.is_empty() && !packed.is_empty() {
        warn!(%compression, "{} decoded to nothing", args.input.display());
    }
    if args.nibbles {
        data = nibble::unpack(&data);
    }

    write(&args.output, &data)?;
    info!(
        %compression,
        input = packed.len(),
        output = data.len(),
        "unpacked {}",
        args.output.display()
    );
    Ok(())
}

fn describe(name: &str, params: &ChannelParams) -> String {
    let mut line = format!(
        "{name:<9} {:>10.3} Hz  volume {:.3}",
        params.frequency, params.volume
    );
    if let Some(duty) = params.duty {
        line.push_str(&format!("  duty {:.1} %", duty.ratio() * 100.0));
    }
    line
}

pub fn probe(args: ProbeArgs) -> Result<()> {
    let mut apu = Apu::new();
    apu.reset();

    for &(addr, value) in &args.writes {
        if !apu.write(addr, value) {
            bail!("${addr:04X} is not a channel register");
        }
    }
    for _ in 0..args.ticks {
        apu.clock();
    }

    let snapshot = apu.snapshot();
    println!("{}", describe("pulse 1", &snapshot.pulse[0]));
    println!("{}", describe("pulse 2", &snapshot.pulse[1]));
    println!("{}", describe("triangle", &snapshot.triangle));
    println!("{}", describe("noise", &snapshot.noise));
    Ok(())
}
