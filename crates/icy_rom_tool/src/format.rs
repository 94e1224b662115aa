use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args;
use icy_rom::{BitDirection, ByteOrder, CharacterSetConfig, Padding};

/// Layout of the ROM that is read.
#[derive(Args, Clone, Debug, Default)]
pub struct FormatArgs {
    #[arg(help = "Format preset (TOML) to start from.", long = "format")]
    pub preset: Option<PathBuf>,

    #[arg(help = "Glyph width in pixels [default: 8]", long)]
    pub width: Option<usize>,

    #[arg(help = "Glyph height in pixels [default: 8]", long)]
    pub height: Option<usize>,

    #[arg(help = "Side of the unused bits: left or right [default: right]", long)]
    pub padding: Option<Padding>,

    #[arg(help = "Bit of pixel 0: msb or lsb [default: msb]", long)]
    pub bit_direction: Option<BitDirection>,

    #[arg(help = "Byte order of wide rows: big or little [default: big]", long)]
    pub byte_order: Option<ByteOrder>,
}

/// Layout the ROM is converted to. Anything not given is taken from the
/// source layout.
#[derive(Args, Clone, Debug, Default)]
pub struct TargetFormatArgs {
    #[arg(help = "Format preset (TOML) of the output.", id = "to_preset", long = "to-format")]
    pub preset: Option<PathBuf>,

    #[arg(id = "to_width", long = "to-width")]
    pub width: Option<usize>,

    #[arg(id = "to_height", long = "to-height")]
    pub height: Option<usize>,

    #[arg(id = "to_padding", long = "to-padding")]
    pub padding: Option<Padding>,

    #[arg(id = "to_bit_direction", long = "to-bit-direction")]
    pub bit_direction: Option<BitDirection>,

    #[arg(id = "to_byte_order", long = "to-byte-order")]
    pub byte_order: Option<ByteOrder>,
}

fn load_preset(path: &Path) -> Result<CharacterSetConfig> {
    let txt = fs::read_to_string(path).with_context(|| format!("Failed to read format preset {}", path.display()))?;
    CharacterSetConfig::from_toml(&txt).with_context(|| format!("Invalid format preset {}", path.display()))
}

fn apply(
    mut config: CharacterSetConfig,
    width: Option<usize>,
    height: Option<usize>,
    padding: Option<Padding>,
    bit_direction: Option<BitDirection>,
    byte_order: Option<ByteOrder>,
) -> Result<CharacterSetConfig> {
    if let Some(width) = width {
        config.width = width;
    }
    if let Some(height) = height {
        config.height = height;
    }
    if let Some(padding) = padding {
        config.padding = padding;
    }
    if let Some(bit_direction) = bit_direction {
        config.bit_direction = bit_direction;
    }
    if let Some(byte_order) = byte_order {
        config.byte_order = byte_order;
    }
    config.validate()?;
    Ok(config)
}

impl FormatArgs {
    pub fn resolve(&self) -> Result<CharacterSetConfig> {
        let base = match &self.preset {
            Some(path) => load_preset(path)?,
            None => CharacterSetConfig::default(),
        };
        apply(base, self.width, self.height, self.padding, self.bit_direction, self.byte_order)
    }
}

impl TargetFormatArgs {
    pub fn resolve(&self, source: &CharacterSetConfig) -> Result<CharacterSetConfig> {
        let base = match &self.preset {
            Some(path) => load_preset(path)?,
            None => *source,
        };
        apply(base, self.width, self.height, self.padding, self.bit_direction, self.byte_order)
    }
}
