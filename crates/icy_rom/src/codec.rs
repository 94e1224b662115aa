//! Single glyph conversion between ROM bytes and pixels.
//!
//! Each pixel row occupies `bytes_per_line` bytes. Within a row the bits are
//! addressed MSB-first across the bytes (bit 7 of byte 0 is position 0), and
//! [`CharacterSetConfig::bit_index`] maps a pixel column to its position.
//! Rows in little byte order are swapped before (decode) or after (encode)
//! that addressing.

use crate::{CharacterSetConfig, Glyph};

#[inline]
fn get_bit(row: &[u8], pos: usize) -> bool {
    row[pos / 8] & (0x80 >> (pos % 8)) != 0
}

#[inline]
fn set_bit(row: &mut [u8], pos: usize) {
    row[pos / 8] |= 0x80 >> (pos % 8);
}

/// Decodes one glyph.
///
/// `bytes` should hold `bytes_per_character(config)` bytes; missing bytes
/// read as zero. Bytes beyond that are ignored.
pub fn decode_glyph(bytes: &[u8], config: &CharacterSetConfig) -> Glyph {
    let bytes_per_line = config.bytes_per_line();
    let mut glyph = Glyph::new(config.width, config.height);
    let mut row = vec![0u8; bytes_per_line];

    for y in 0..config.height {
        let start = y * bytes_per_line;
        for (i, b) in row.iter_mut().enumerate() {
            *b = bytes.get(start + i).copied().unwrap_or(0);
        }
        if config.swaps_row_bytes() {
            row.reverse();
        }
        for x in 0..config.width {
            glyph.set_pixel(x, y, get_bit(&row, config.bit_index(x)));
        }
    }
    glyph
}

/// Encodes one glyph into exactly `bytes_per_character(config)` bytes.
///
/// Padding bits are always written as 0. Pixels the glyph doesn't have (it is
/// smaller than the config) are written as unset.
pub fn encode_glyph(glyph: &Glyph, config: &CharacterSetConfig) -> Vec<u8> {
    let bytes_per_line = config.bytes_per_line();
    let mut result = Vec::with_capacity(config.bytes_per_character());

    for y in 0..config.height {
        let mut row = vec![0u8; bytes_per_line];
        for x in 0..config.width {
            if glyph.pixel(x, y) {
                set_bit(&mut row, config.bit_index(x));
            }
        }
        if config.swaps_row_bytes() {
            row.reverse();
        }
        result.extend_from_slice(&row);
    }
    result
}
