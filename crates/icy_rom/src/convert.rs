//! Moving glyphs between differing dimensions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CharacterSet, CharacterSetConfig, Glyph, Result, RomError};

/// Corner that stays fixed when a glyph changes size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 4] = [Anchor::TopLeft, Anchor::TopRight, Anchor::BottomLeft, Anchor::BottomRight];

    /// Offset `(x, y)` of the source's origin inside the target. Negative
    /// when the target is smaller.
    pub fn offset(self, source: (usize, usize), target: (usize, usize)) -> (isize, isize) {
        let dx = target.0 as isize - source.0 as isize;
        let dy = target.1 as isize - source.1 as isize;
        match self {
            Anchor::TopLeft => (0, 0),
            Anchor::TopRight => (dx, 0),
            Anchor::BottomLeft => (0, dy),
            Anchor::BottomRight => (dx, dy),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopRight => "top-right",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomRight => "bottom-right",
        }
    }
}

impl Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anchor {
    type Err = RomError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.to_ascii_lowercase().replace('_', "-");
        Anchor::ALL
            .into_iter()
            .find(|anchor| anchor.name() == s)
            .ok_or_else(|| RomError::unknown("anchor", s))
    }
}

/// Places `glyph` (laid out as `source`) into a glyph of the `target`
/// dimensions, keeping the `anchor` corner fixed.
///
/// Pixels falling outside the target are dropped, target pixels without a
/// source pixel stay unset. Same dimensions give a plain copy.
pub fn convert_glyph(glyph: &Glyph, source: &CharacterSetConfig, target: &CharacterSetConfig, anchor: Anchor) -> Glyph {
    if source.width == target.width && source.height == target.height {
        return glyph.clone();
    }

    let mut result = Glyph::new(target.width, target.height);
    let (offset_x, offset_y) = anchor.offset((source.width, source.height), (target.width, target.height));

    for y in 0..source.height {
        let Some(new_y) = y.checked_add_signed(offset_y) else {
            continue;
        };
        if new_y >= target.height {
            continue;
        }
        for x in 0..source.width {
            let Some(new_x) = x.checked_add_signed(offset_x) else {
                continue;
            };
            if new_x < target.width {
                result.set_pixel(new_x, new_y, glyph.pixel(x, y));
            }
        }
    }
    result
}

/// Resizes every glyph of a set and switches it to the new dimensions. The
/// bit layout of the set is kept.
pub fn resize_character_set(set: &CharacterSet, width: usize, height: usize, anchor: Anchor) -> CharacterSet {
    let target = CharacterSetConfig { width, height, ..set.config };
    log::debug!(
        "Resizing '{}' from {}x{} to {width}x{height} ({anchor})",
        set.metadata.name,
        set.config.width,
        set.config.height
    );
    CharacterSet {
        metadata: set.metadata.clone(),
        config: target,
        glyphs: set.glyphs.iter().map(|glyph| convert_glyph(glyph, &set.config, &target, anchor)).collect(),
    }
}
