//! Whole ROM conversion.
//!
//! A ROM is a flat run of fixed-size glyph chunks. Glyphs don't depend on each
//! other, so chunks are converted in parallel; output stays in storage order.

use base64::{engine::general_purpose, Engine};
use rayon::prelude::*;

use crate::{codec, convert::convert_glyph, Anchor, CharacterSetConfig, Glyph, Result};

/// Splits `buffer` into glyphs. A trailing partial glyph is dropped, a config
/// with zero sized glyphs yields no glyphs.
pub fn decode_rom(buffer: &[u8], config: &CharacterSetConfig) -> Vec<Glyph> {
    let bytes_per_character = config.bytes_per_character();
    if bytes_per_character == 0 {
        if !buffer.is_empty() {
            log::warn!("Zero sized glyph format ({config}), ignoring {} bytes", buffer.len());
        }
        return Vec::new();
    }

    let trailing = buffer.len() % bytes_per_character;
    if trailing != 0 {
        log::warn!(
            "ROM length {} is not a multiple of {bytes_per_character}, dropping {trailing} trailing bytes",
            buffer.len()
        );
    }

    let glyphs: Vec<Glyph> = buffer
        .par_chunks_exact(bytes_per_character)
        .map(|chunk| codec::decode_glyph(chunk, config))
        .collect();
    log::debug!("Decoded {} glyphs ({config})", glyphs.len());
    glyphs
}

/// Encodes all glyphs back to back, `glyphs.len() * bytes_per_character` bytes.
pub fn encode_rom(glyphs: &[Glyph], config: &CharacterSetConfig) -> Vec<u8> {
    let chunks: Vec<Vec<u8>> = glyphs.par_iter().map(|glyph| codec::encode_glyph(glyph, config)).collect();
    log::debug!("Encoded {} glyphs ({config})", chunks.len());
    chunks.concat()
}

/// Re-encodes a ROM from one layout into another.
///
/// Glyphs are anchored top-left when the dimensions differ.
pub fn reformat_rom(buffer: &[u8], source: &CharacterSetConfig, target: &CharacterSetConfig) -> Vec<u8> {
    let glyphs: Vec<Glyph> = decode_rom(buffer, source)
        .par_iter()
        .map(|glyph| convert_glyph(glyph, source, target, Anchor::TopLeft))
        .collect();
    encode_rom(&glyphs, target)
}

pub fn buffer_to_base64(buffer: &[u8]) -> String {
    general_purpose::STANDARD.encode(buffer)
}

/// # Errors
///
/// Returns [`crate::RomError::Base64`] if `data` isn't valid standard base64.
pub fn base64_to_buffer(data: &str) -> Result<Vec<u8>> {
    Ok(general_purpose::STANDARD.decode(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BitDirection, ByteOrder, Padding, RomError};
    use pretty_assertions::assert_eq;

    fn numbered_glyphs(count: usize, width: usize, height: usize) -> Vec<Glyph> {
        (0..count)
            .map(|i| {
                let mut glyph = Glyph::new(width, height);
                for y in 0..height {
                    for x in 0..width {
                        glyph.set_pixel(x, y, (i + x * 3 + y * 5) % 7 < 3);
                    }
                }
                glyph
            })
            .collect()
    }

    #[test]
    fn test_decode_rom_chunks() {
        let config = CharacterSetConfig::new(8, 2);
        let glyphs = decode_rom(&[0x80, 0x00, 0x00, 0x01], &config);
        assert_eq!(glyphs.len(), 2);
        assert!(glyphs[0].pixel(0, 0));
        assert!(glyphs[1].pixel(7, 1));
    }

    #[test]
    fn test_trailing_bytes_dropped() {
        let config = CharacterSetConfig::new(8, 8);
        let buffer = vec![0xAA; 8 * 3 + 5];
        let glyphs = decode_rom(&buffer, &config);
        assert_eq!(glyphs.len(), 3);
        assert_eq!(encode_rom(&glyphs, &config), vec![0xAA; 24]);
    }

    #[test]
    fn test_zero_sized_config_yields_nothing() {
        assert!(decode_rom(&[1, 2, 3], &CharacterSetConfig::new(0, 8)).is_empty());
        assert!(decode_rom(&[1, 2, 3], &CharacterSetConfig::new(8, 0)).is_empty());
        assert!(decode_rom(&[], &CharacterSetConfig::new(8, 8)).is_empty());
    }

    #[test]
    fn test_encode_rom_length() {
        let config = CharacterSetConfig::new(12, 10);
        let glyphs = numbered_glyphs(5, 12, 10);
        assert_eq!(encode_rom(&glyphs, &config).len(), 5 * 20);
        assert!(encode_rom(&[], &config).is_empty());
    }

    #[test]
    fn test_rom_roundtrip_preserves_order() {
        for config in [
            CharacterSetConfig::new(8, 8),
            CharacterSetConfig::new(5, 7).with_padding(Padding::Left),
            CharacterSetConfig::new(12, 16).with_bit_direction(BitDirection::Lsb).with_byte_order(ByteOrder::Little),
            CharacterSetConfig::new(20, 3).with_padding(Padding::Left).with_byte_order(ByteOrder::Little),
        ] {
            let glyphs = numbered_glyphs(64, config.width, config.height);
            let data = encode_rom(&glyphs, &config);
            assert_eq!(decode_rom(&data, &config), glyphs, "{config}");
        }
    }

    #[test]
    fn test_reformat_rom() {
        let source = CharacterSetConfig::new(7, 2);
        let target = source.with_padding(Padding::Left);
        // first pixel of row 0, last pixel of row 1, plus one trailing byte
        let data = reformat_rom(&[0x80, 0x02, 0x80], &source, &target);
        assert_eq!(data, vec![0x40, 0x01]);
    }

    #[test]
    fn test_reformat_rom_resizes_top_left() {
        let source = CharacterSetConfig::new(8, 2);
        let target = CharacterSetConfig::new(4, 1);
        assert_eq!(reformat_rom(&[0xF0, 0xFF, 0x0F, 0xFF], &source, &target), vec![0xF0, 0x00]);
    }

    #[test]
    fn test_base64_roundtrip() {
        assert_eq!(buffer_to_base64(&[]), "");
        assert_eq!(base64_to_buffer("").unwrap(), Vec::<u8>::new());
        assert_eq!(buffer_to_base64(b"ROM"), "Uk9N");
        assert_eq!(buffer_to_base64(&[0xFF]), "/w==");

        let data: Vec<u8> = (0..=255).collect();
        assert_eq!(base64_to_buffer(&buffer_to_base64(&data)).unwrap(), data);
    }

    #[test]
    fn test_malformed_base64() {
        assert!(matches!(base64_to_buffer("not base64!"), Err(RomError::Base64(_))));
    }
}
