#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::needless_pass_by_value, clippy::module_name_repetitions)]

mod commands;
mod format;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use icy_rom::{Anchor, CharacterSetMetadata};

use crate::format::{FormatArgs, TargetFormatArgs};

#[derive(Parser)]
#[command(version, about = "Inspects, packs and converts character ROM images.")]
pub struct Cli {
    #[arg(help = "Enables debug logging.", short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Shows layout numbers, glyph count and checksum of a ROM")]
    Info {
        rom: PathBuf,
        #[command(flatten)]
        format: FormatArgs,
    },

    #[command(about = "Prints glyphs as text")]
    Dump {
        rom: PathBuf,
        #[command(flatten)]
        format: FormatArgs,
        #[arg(help = "Only print this glyph.", long)]
        glyph: Option<usize>,
    },

    #[command(about = "Stores a raw ROM as character set record (JSON)")]
    Pack {
        rom: PathBuf,
        #[command(flatten)]
        format: FormatArgs,
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        metadata: MetadataArgs,
    },

    #[command(about = "Extracts the raw ROM from a character set record")]
    Unpack {
        record: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },

    #[command(about = "Changes the glyph size of a ROM")]
    Resize {
        rom: PathBuf,
        #[command(flatten)]
        format: FormatArgs,
        #[arg(id = "to_width", long = "to-width")]
        width: usize,
        #[arg(id = "to_height", long = "to-height")]
        height: usize,
        #[arg(help = "Corner that stays fixed: top-left, top-right, bottom-left or bottom-right", long, default_value_t = Anchor::TopLeft)]
        anchor: Anchor,
        #[arg(short, long)]
        output: PathBuf,
    },

    #[command(about = "Re-encodes a ROM with a different bit layout")]
    Reformat {
        rom: PathBuf,
        #[command(flatten)]
        format: FormatArgs,
        #[command(flatten)]
        target: TargetFormatArgs,
        #[arg(short, long)]
        output: PathBuf,
    },

    #[command(about = "Writes the given format as TOML preset")]
    Preset {
        #[command(flatten)]
        format: FormatArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Clone, Debug, Default)]
struct MetadataArgs {
    #[arg(help = "Name of the character set [default: file name]", long)]
    name: Option<String>,
    #[arg(long)]
    id: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    source: Option<String>,
    #[arg(long)]
    manufacturer: Option<String>,
    #[arg(long)]
    system: Option<String>,
    #[arg(long)]
    chip: Option<String>,
    #[arg(long)]
    locale: Option<String>,
    #[arg(long = "tag")]
    tags: Vec<String>,
}

impl From<MetadataArgs> for CharacterSetMetadata {
    fn from(args: MetadataArgs) -> Self {
        CharacterSetMetadata {
            id: args.id.unwrap_or_default(),
            name: args.name.unwrap_or_default(),
            description: args.description.unwrap_or_default(),
            source: args.source.unwrap_or_default(),
            manufacturer: args.manufacturer.unwrap_or_default(),
            system: args.system.unwrap_or_default(),
            chip: args.chip.unwrap_or_default(),
            locale: args.locale.unwrap_or_default(),
            tags: args.tags,
            ..Default::default()
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Info { rom, format } => commands::info(&rom, &format.resolve()?),
        Commands::Dump { rom, format, glyph } => commands::dump(&rom, &format.resolve()?, glyph),
        Commands::Pack { rom, format, output, metadata } => commands::pack(&rom, &format.resolve()?, metadata.into(), &output),
        Commands::Unpack { record, output } => commands::unpack(&record, &output),
        Commands::Resize {
            rom,
            format,
            width,
            height,
            anchor,
            output,
        } => commands::resize(&rom, &format.resolve()?, width, height, anchor, &output),
        Commands::Reformat { rom, format, target, output } => {
            let source = format.resolve()?;
            let target = target.resolve(&source)?;
            commands::reformat(&rom, &source, &target, &output)
        }
        Commands::Preset { format, output } => commands::preset(&format.resolve()?, output.as_deref()),
    }
}

fn main() {
    let args = Cli::parse();

    let level = if args.verbose { "debug" } else { "info" };
    let _logger = match Logger::try_with_env_or_str(level).and_then(|logger| logger.log_to_stderr().start()) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    };

    if let Err(err) = run(args.command) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
