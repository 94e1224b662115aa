use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Result, RomError};

/// Side of a byte-aligned row that holds the unused bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// Unused bits come before the pixel data.
    Left,
    /// Unused bits come after the pixel data.
    #[default]
    Right,
}

/// Which end of the row's data region holds pixel 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BitDirection {
    /// Pixel 0 is the most significant data bit.
    #[default]
    Msb,
    /// Pixel 0 is the least significant data bit.
    Lsb,
}

/// Byte order of rows spanning more than one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Byte 0 holds the first 8 pixels.
    #[default]
    Big,
    /// Byte 0 holds the last 8 pixels.
    Little,
}

/// Format descriptor shared by every glyph of a character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSetConfig {
    pub width: usize,
    pub height: usize,
    pub padding: Padding,
    pub bit_direction: BitDirection,
    #[serde(default)]
    pub byte_order: ByteOrder,
}

impl Default for CharacterSetConfig {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

/// Number of bytes one pixel row of `width` pixels occupies.
pub fn bytes_per_line(width: usize) -> usize {
    width.div_ceil(8)
}

/// Number of bytes a single glyph occupies in the ROM.
///
/// Saturates at `usize::MAX` for sizes no buffer can hold, so such a format
/// decodes to no glyphs.
pub fn bytes_per_character(config: &CharacterSetConfig) -> usize {
    bytes_per_line(config.width).saturating_mul(config.height)
}

impl CharacterSetConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            padding: Padding::default(),
            bit_direction: BitDirection::default(),
            byte_order: ByteOrder::default(),
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_bit_direction(mut self, bit_direction: BitDirection) -> Self {
        self.bit_direction = bit_direction;
        self
    }

    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    pub fn bytes_per_line(&self) -> usize {
        bytes_per_line(self.width)
    }

    pub fn bytes_per_character(&self) -> usize {
        bytes_per_character(self)
    }

    /// Unused bits in every row.
    pub fn padding_bits(&self) -> usize {
        self.bytes_per_line().saturating_mul(8) - self.width
    }

    /// Position of pixel column `col` inside a row's bit sequence, counted
    /// MSB-first from byte 0. Encoder and decoder share this mapping.
    pub fn bit_index(&self, col: usize) -> usize {
        let start = match self.padding {
            Padding::Left => self.padding_bits(),
            Padding::Right => 0,
        };
        match self.bit_direction {
            BitDirection::Msb => start + col,
            BitDirection::Lsb => start + (self.width - 1 - col),
        }
    }

    /// True if rows must be byte swapped between storage and bit order.
    pub(crate) fn swaps_row_bytes(&self) -> bool {
        self.byte_order == ByteOrder::Little && self.bytes_per_line() > 1
    }

    /// Checks that the format can hold at least one pixel.
    ///
    /// The codec accepts empty formats and produces empty output for them,
    /// this is for callers that need a usable format.
    ///
    /// # Errors
    ///
    /// Returns [`RomError::InvalidConfig`] if width or height is zero.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RomError::invalid_config(format!(
                "glyph size must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Reads a format preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid preset.
    pub fn from_toml(txt: &str) -> Result<Self> {
        Ok(toml::from_str(txt)?)
    }

    /// # Errors
    ///
    /// Returns an error if the preset can't be written.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Display for CharacterSetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} {} padding, {} first, {} endian",
            self.width, self.height, self.padding, self.bit_direction, self.byte_order
        )
    }
}

macro_rules! string_enum {
    ($ty:ident, $kind:expr, $( $variant:ident => $name:literal ),* $(,)?) => {
        impl FromStr for $ty {
            type Err = RomError;

            fn from_str(s: &str) -> Result<Self> {
                match s.to_ascii_lowercase().as_str() {
                    $( $name => Ok($ty::$variant), )*
                    _ => Err(RomError::unknown($kind, s)),
                }
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $( $ty::$variant => f.write_str($name), )*
                }
            }
        }
    };
}

string_enum!(Padding, "padding", Left => "left", Right => "right");
string_enum!(BitDirection, "bit direction", Msb => "msb", Lsb => "lsb");
string_enum!(ByteOrder, "byte order", Big => "big", Little => "little");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_per_line() {
        assert_eq!(bytes_per_line(0), 0);
        assert_eq!(bytes_per_line(1), 1);
        assert_eq!(bytes_per_line(8), 1);
        assert_eq!(bytes_per_line(9), 2);
        assert_eq!(bytes_per_line(12), 2);
        assert_eq!(bytes_per_line(16), 2);
        assert_eq!(bytes_per_line(17), 3);
    }

    #[test]
    fn test_bytes_per_character() {
        assert_eq!(bytes_per_character(&CharacterSetConfig::new(8, 8)), 8);
        assert_eq!(bytes_per_character(&CharacterSetConfig::new(12, 10)), 20);
        assert_eq!(bytes_per_character(&CharacterSetConfig::new(0, 10)), 0);
        assert_eq!(bytes_per_character(&CharacterSetConfig::new(8, 0)), 0);
    }

    #[test]
    fn test_huge_sizes_saturate() {
        assert_eq!(bytes_per_character(&CharacterSetConfig::new(1 << 40, 1 << 40)), usize::MAX);
        assert_eq!(bytes_per_character(&CharacterSetConfig::new(usize::MAX, 16)), usize::MAX);
        let config = CharacterSetConfig::new(usize::MAX, 1);
        assert_eq!(config.padding_bits(), 0);
        assert_eq!(config.bit_index(0), 0);
    }

    #[test]
    fn test_bit_index() {
        let config = CharacterSetConfig::new(7, 1);
        assert_eq!(config.padding_bits(), 1);
        assert_eq!(config.bit_index(0), 0);
        assert_eq!(config.with_padding(Padding::Left).bit_index(0), 1);
        assert_eq!(config.with_bit_direction(BitDirection::Lsb).bit_index(0), 6);
        assert_eq!(config.with_padding(Padding::Left).with_bit_direction(BitDirection::Lsb).bit_index(0), 7);
    }

    #[test]
    fn test_swaps_row_bytes() {
        assert!(!CharacterSetConfig::new(8, 8).with_byte_order(ByteOrder::Little).swaps_row_bytes());
        assert!(CharacterSetConfig::new(9, 8).with_byte_order(ByteOrder::Little).swaps_row_bytes());
        assert!(!CharacterSetConfig::new(16, 8).swaps_row_bytes());
    }

    #[test]
    fn test_validate() {
        assert!(CharacterSetConfig::new(8, 16).validate().is_ok());
        assert!(matches!(CharacterSetConfig::new(0, 16).validate(), Err(RomError::InvalidConfig { .. })));
        assert!(CharacterSetConfig::new(8, 0).validate().is_err());
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("left".parse::<Padding>().unwrap(), Padding::Left);
        assert_eq!("MSB".parse::<BitDirection>().unwrap(), BitDirection::Msb);
        assert_eq!("little".parse::<ByteOrder>().unwrap(), ByteOrder::Little);
        assert!("middle".parse::<Padding>().is_err());
        assert_eq!(ByteOrder::Little.to_string(), "little");
    }

    #[test]
    fn test_json_field_names() {
        let config = CharacterSetConfig::new(12, 10).with_padding(Padding::Left).with_byte_order(ByteOrder::Little);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"width":12,"height":10,"padding":"left","bitDirection":"msb","byteOrder":"little"}"#);
    }

    #[test]
    fn test_byte_order_defaults_to_big() {
        let config: CharacterSetConfig = serde_json::from_str(r#"{"width":8,"height":8,"padding":"right","bitDirection":"lsb"}"#).unwrap();
        assert_eq!(config.byte_order, ByteOrder::Big);
        assert_eq!(config.bit_direction, BitDirection::Lsb);
    }

    #[test]
    fn test_toml_preset() {
        let config = CharacterSetConfig::from_toml(
            r#"
width = 12
height = 16
padding = "left"
bitDirection = "lsb"
"#,
        )
        .unwrap();
        assert_eq!(
            config,
            CharacterSetConfig::new(12, 16).with_padding(Padding::Left).with_bit_direction(BitDirection::Lsb)
        );
        let txt = config.to_toml().unwrap();
        assert_eq!(CharacterSetConfig::from_toml(&txt).unwrap(), config);
    }
}
