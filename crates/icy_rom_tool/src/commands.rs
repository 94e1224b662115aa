use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use icy_rom::{decode_rom, reformat_rom, resize_character_set, Anchor, CharacterSet, CharacterSetConfig, CharacterSetMetadata, SerializedCharacterSet};

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn write_file(path: &Path, data: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default()
}

pub fn info(path: &Path, config: &CharacterSetConfig) -> Result<()> {
    let data = read_file(path)?;
    let set = CharacterSet::from_rom(CharacterSetMetadata::new(file_stem(path)), *config, &data);
    let bytes_per_character = config.bytes_per_character();

    println!("File:           {}", path.display());
    println!("Size:           {} bytes", data.len());
    println!("Format:         {config}");
    println!("Bytes per line: {}", config.bytes_per_line());
    println!("Bytes per char: {bytes_per_character}");
    println!("Glyphs:         {}", set.glyph_count());
    println!("Trailing bytes: {}", data.len() % bytes_per_character);
    println!("Empty glyphs:   {}", set.glyphs.iter().filter(|g| g.is_empty()).count());
    println!("Checksum:       {:08X}", set.checksum());
    Ok(())
}

pub fn dump(path: &Path, config: &CharacterSetConfig, glyph: Option<usize>) -> Result<()> {
    let glyphs = decode_rom(&read_file(path)?, config);
    let range = match glyph {
        Some(index) if index >= glyphs.len() => bail!("Glyph {index} out of range, the ROM has {} glyphs", glyphs.len()),
        Some(index) => index..index + 1,
        None => 0..glyphs.len(),
    };
    for index in range {
        println!("{index:3} (0x{index:02X})");
        println!("{}", glyphs[index]);
        println!();
    }
    Ok(())
}

pub fn pack(path: &Path, config: &CharacterSetConfig, mut metadata: CharacterSetMetadata, output: &Path) -> Result<()> {
    if metadata.name.is_empty() {
        metadata.name = file_stem(path);
    }
    let now = Utc::now();
    metadata.created_at = Some(now);
    metadata.updated_at = Some(now);

    let set = CharacterSet::from_rom(metadata, *config, &read_file(path)?);
    log::info!("Packing {} glyphs of '{}'", set.glyph_count(), set.metadata.name);
    write_file(output, set.serialize().to_json_pretty()?)
}

pub fn unpack(path: &Path, output: &Path) -> Result<()> {
    let txt = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let serialized = SerializedCharacterSet::from_json(&txt).with_context(|| format!("{} is not a character set record", path.display()))?;
    let set = serialized
        .deserialize()
        .with_context(|| format!("Corrupted binary data in {}", path.display()))?;
    log::info!("Unpacking {} glyphs of '{}' ({})", set.glyph_count(), set.metadata.name, set.config);
    write_file(output, set.to_rom())
}

pub fn resize(path: &Path, config: &CharacterSetConfig, width: usize, height: usize, anchor: Anchor, output: &Path) -> Result<()> {
    let target = CharacterSetConfig { width, height, ..*config };
    target.validate()?;
    let set = CharacterSet::from_rom(CharacterSetMetadata::new(file_stem(path)), *config, &read_file(path)?);
    let resized = resize_character_set(&set, width, height, anchor);
    write_file(output, resized.to_rom())
}

pub fn reformat(path: &Path, source: &CharacterSetConfig, target: &CharacterSetConfig, output: &Path) -> Result<()> {
    if source == target {
        log::warn!("Source and target format are identical, copying glyph data");
    }
    write_file(output, reformat_rom(&read_file(path)?, source, target))
}

pub fn preset(config: &CharacterSetConfig, output: Option<&Path>) -> Result<()> {
    let txt = config.to_toml()?;
    match output {
        Some(path) => write_file(path, txt),
        None => {
            print!("{txt}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("icy_rom_tool_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_pack_unpack_roundtrip() {
        let rom = temp_path("pack.bin");
        let record = temp_path("pack.json");
        let restored = temp_path("pack_restored.bin");
        let data: Vec<u8> = (0..=255).collect();
        fs::write(&rom, &data).unwrap();

        let config = CharacterSetConfig::new(8, 16);
        pack(&rom, &config, CharacterSetMetadata::default(), &record).unwrap();

        let serialized = SerializedCharacterSet::from_json(&fs::read_to_string(&record).unwrap()).unwrap();
        assert_eq!(serialized.metadata.name, file_stem(&rom));
        assert!(serialized.metadata.created_at.is_some());
        assert_eq!(serialized.glyph_count().unwrap(), 16);

        unpack(&record, &restored).unwrap();
        assert_eq!(fs::read(&restored).unwrap(), data);

        for path in [rom, record, restored] {
            let _ = fs::remove_file(path);
        }
    }

    #[test]
    fn test_resize_writes_target_size() {
        let rom = temp_path("resize.bin");
        let output = temp_path("resize_out.bin");
        fs::write(&rom, [0xFFu8; 32]).unwrap();

        resize(&rom, &CharacterSetConfig::new(8, 8), 12, 10, Anchor::BottomRight, &output).unwrap();
        let data = fs::read(&output).unwrap();
        assert_eq!(data.len(), 4 * 20);
        // two new rows on top, then the old top row shifted right by 4
        assert_eq!(&data[..6], &[0x00, 0x00, 0x00, 0x00, 0x0F, 0xF0]);

        for path in [rom, output] {
            let _ = fs::remove_file(path);
        }
    }

    #[test]
    fn test_missing_file() {
        let err = info(&temp_path("does_not_exist.bin"), &CharacterSetConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
