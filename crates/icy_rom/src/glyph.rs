//! Pixel matrix of a single character.
//!
//! Pixels are stored flat and row-major, `pixels[y * width + x]`. A glyph is a
//! plain value: the codec always hands out new glyphs and never changes the
//! ones it is given.

use std::fmt::Display;

use crate::{Result, RomError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Glyph {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl Glyph {
    /// Creates a glyph with all pixels off.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    /// Builds a glyph from nested rows, the layout editors work with.
    ///
    /// # Errors
    ///
    /// Returns [`RomError::GlyphSizeMismatch`] if the rows differ in length.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        let mut pixels = Vec::with_capacity(width * rows.len());
        for row in rows {
            if row.len() != width {
                return Err(RomError::GlyphSizeMismatch {
                    expected: width,
                    actual: row.len(),
                });
            }
            pixels.extend_from_slice(row);
        }
        Ok(Self {
            width,
            height: rows.len(),
            pixels,
        })
    }

    /// Builds a `width` x `height` glyph from nested rows, padding missing
    /// pixels with `false` and cutting off everything outside.
    pub fn from_rows_lossy(rows: &[Vec<bool>], width: usize, height: usize) -> Self {
        let mut glyph = Self::new(width, height);
        for (y, row) in rows.iter().enumerate().take(height) {
            for (x, &pixel) in row.iter().enumerate().take(width) {
                glyph.pixels[y * width + x] = pixel;
            }
        }
        glyph
    }

    /// Parses glyph art: one line per row, `#`, `X` or `1` for set pixels and
    /// `-`, `.` or `0` for unset ones. Blank lines and surrounding whitespace
    /// are ignored, so the output of `Display` parses back.
    ///
    /// # Errors
    ///
    /// Returns [`RomError::InvalidGlyphText`] on unknown characters or ragged rows.
    pub fn from_text(txt: &str) -> Result<Self> {
        let mut rows: Vec<Vec<bool>> = Vec::new();
        for (i, line) in txt.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut row = Vec::with_capacity(line.len());
            for ch in line.chars() {
                match ch {
                    '#' | 'X' | 'x' | '1' => row.push(true),
                    '-' | '.' | '0' => row.push(false),
                    _ => {
                        return Err(RomError::InvalidGlyphText {
                            line: i + 1,
                            message: format!("unexpected character '{ch}'"),
                        })
                    }
                }
            }
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(RomError::InvalidGlyphText {
                        line: i + 1,
                        message: format!("row has {} pixels, expected {}", row.len(), first.len()),
                    });
                }
            }
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `false` for coordinates outside the glyph.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[y * self.width + x]
    }

    /// Does nothing for coordinates outside the glyph.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.pixels[y * self.width + x] = value;
    }

    /// Returns an empty slice for rows outside the glyph.
    pub fn row(&self, y: usize) -> &[bool] {
        if y >= self.height {
            return &[];
        }
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.height).map(|y| self.row(y).to_vec()).collect()
    }

    /// True if no pixel is set.
    pub fn is_empty(&self) -> bool {
        !self.pixels.iter().any(|&p| p)
    }

    pub fn count_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }
}

impl Display for Glyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                writeln!(f)?;
            }
            for &p in self.row(y) {
                write!(f, "{}", if p { '#' } else { '-' })?;
            }
        }
        Ok(())
    }
}
