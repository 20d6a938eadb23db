use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::catalog::CakeItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Materialized {
    /// The item has no image.
    Skipped,
    /// Destination directory exists; nothing was copied.
    Ready(PathBuf),
    Copied { source: PathBuf, dest: PathBuf },
}

/// Makes sure the directory for an item's image exists and, when the item names
/// a `source_image`, copies it into place unless the destination is already there.
pub fn ensure_image_present(item: &CakeItem, images_dir: &Path) -> Result<Materialized> {
    let Some(image) = item.image.as_deref().filter(|image| !image.is_empty()) else {
        return Ok(Materialized::Skipped);
    };

    let dest = images_dir.join(image);
    if let Some(parent) = dest.parent()
        && !parent.is_dir()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    match item.source_image.as_deref() {
        Some(source) if source.exists() && !dest.exists() => {
            fs::copy(source, &dest).with_context(|| {
                format!("failed to copy {} to {}", source.display(), dest.display())
            })?;
            Ok(Materialized::Copied {
                source: source.to_path_buf(),
                dest,
            })
        }
        _ => Ok(Materialized::Ready(dest)),
    }
}
