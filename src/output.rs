use std::{fs, path::Path};

use anyhow::Context;
use log::info;

use crate::{encoder::Encoder, pixel::PixelSource};

/// Encodes one icon and stores it at `dest`, creating parent directories as needed.
///
/// The PNG is written next to `dest` under a temporary name, then renamed into place.
pub fn write_icon<S>(
    dest: &Path,
    width: u32,
    height: u32,
    source: &S,
    encoder: &Encoder,
) -> anyhow::Result<()>
where
    S: PixelSource + ?Sized,
{
    let png = encoder
        .encode(width, height, source)
        .with_context(|| format!("Failed to encode {}", dest.display()))?;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file_name = dest
        .file_name()
        .with_context(|| format!("{} has no file name", dest.display()))?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(".tmp");
    let temp_path = dest.with_file_name(temp_name);

    if let Err(e) = fs::write(&temp_path, &png) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to write {}", temp_path.display()));
    }
    if let Err(e) = fs::rename(&temp_path, dest) {
        let _ = fs::remove_file(&temp_path);
        return Err(e).with_context(|| format!("Failed to move icon into {}", dest.display()));
    }

    info!("wrote {} ({width}x{height})", dest.display());
    Ok(())
}
