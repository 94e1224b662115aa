use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{base64_to_buffer, buffer_to_base64, decode_rom, encode_rom, CharacterSetConfig, Glyph, Result};

/// Descriptive and provenance information of a character set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterSetMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Where the data came from (dump, datasheet, own work, ...).
    pub source: String,
    pub manufacturer: String,
    pub system: String,
    pub chip: String,
    pub locale: String,
    pub tags: Vec<String>,
    pub is_built_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CharacterSetMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A decoded character set, ready for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSet {
    pub metadata: CharacterSetMetadata,
    pub config: CharacterSetConfig,
    pub glyphs: Vec<Glyph>,
}

/// The persisted form of a [`CharacterSet`]: the raw ROM is kept as base64 in
/// `binaryData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedCharacterSet {
    pub metadata: CharacterSetMetadata,
    pub config: CharacterSetConfig,
    pub binary_data: String,
}

impl CharacterSet {
    pub fn new(metadata: CharacterSetMetadata, config: CharacterSetConfig) -> Self {
        Self {
            metadata,
            config,
            glyphs: Vec::new(),
        }
    }

    /// Decodes a raw ROM image.
    pub fn from_rom(metadata: CharacterSetMetadata, config: CharacterSetConfig, data: &[u8]) -> Self {
        Self {
            metadata,
            config,
            glyphs: decode_rom(data, &config),
        }
    }

    pub fn to_rom(&self) -> Vec<u8> {
        encode_rom(&self.glyphs, &self.config)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyph(&self, index: usize) -> Option<&Glyph> {
        self.glyphs.get(index)
    }

    /// CRC-32 of the encoded ROM. Two sets with the same layout and pixels
    /// have the same checksum regardless of their metadata.
    pub fn checksum(&self) -> u32 {
        crc32fast::hash(&self.to_rom())
    }

    pub fn serialize(&self) -> SerializedCharacterSet {
        serialize(self)
    }
}

impl SerializedCharacterSet {
    /// # Errors
    ///
    /// Returns [`crate::RomError::Base64`] if `binaryData` is corrupted.
    pub fn deserialize(&self) -> Result<CharacterSet> {
        deserialize(self)
    }

    /// # Errors
    ///
    /// Returns [`crate::RomError::Base64`] if `binaryData` is corrupted.
    pub fn glyph_count(&self) -> Result<usize> {
        glyph_count(self)
    }

    /// # Errors
    ///
    /// Returns an error if the text is not a valid record.
    pub fn from_json(txt: &str) -> Result<Self> {
        Ok(serde_json::from_str(txt)?)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Encodes the glyphs of `set` into its storage form. Metadata and config are
/// carried over unchanged.
pub fn serialize(set: &CharacterSet) -> SerializedCharacterSet {
    SerializedCharacterSet {
        metadata: set.metadata.clone(),
        config: set.config,
        binary_data: buffer_to_base64(&set.to_rom()),
    }
}

/// # Errors
///
/// Returns [`crate::RomError::Base64`] if `binaryData` is corrupted. Callers
/// report that as a corrupted record.
pub fn deserialize(serialized: &SerializedCharacterSet) -> Result<CharacterSet> {
    let data = base64_to_buffer(&serialized.binary_data)?;
    Ok(CharacterSet::from_rom(serialized.metadata.clone(), serialized.config, &data))
}

/// Number of glyphs a stored set holds.
///
/// Counted on the decoded bytes, the length of the base64 text depends on its
/// padding characters.
///
/// # Errors
///
/// Returns [`crate::RomError::Base64`] if `binaryData` is corrupted.
pub fn glyph_count(serialized: &SerializedCharacterSet) -> Result<usize> {
    let bytes_per_character = serialized.config.bytes_per_character();
    let data = base64_to_buffer(&serialized.binary_data)?;
    if bytes_per_character == 0 {
        return Ok(0);
    }
    Ok(data.len() / bytes_per_character)
}
