//! Codec for packed-bit character ROMs.
//!
//! A character ROM stores every glyph as `height` rows of
//! `ceil(width / 8)` bytes. How the pixels of a row sit inside those bytes is
//! described by a [`CharacterSetConfig`]: padding side, bit direction and,
//! for rows wider than one byte, byte order.
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::module_name_repetitions
)]

mod error;
pub use error::*;

mod layout;
pub use layout::*;

mod glyph;
pub use glyph::*;

pub mod codec;
pub use codec::{decode_glyph, encode_glyph};

pub mod rom;
pub use rom::{base64_to_buffer, buffer_to_base64, decode_rom, encode_rom, reformat_rom};

mod character_set;
pub use character_set::*;

pub mod convert;
pub use convert::{convert_glyph, resize_character_set, Anchor};
