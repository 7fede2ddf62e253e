mod args;
mod commands;

use clap::Parser;
use tracing_subscriber::FmtSubscriber;

use crate::args::{Args, Command};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Pack(pack) => commands::pack(pack),
        Command::Unpack(unpack) => commands::unpack(unpack),
        Command::Probe(probe) => commands::probe(probe),
    }
}
