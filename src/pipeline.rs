use std::path::PathBuf;

use anyhow::Result;

use crate::catalog::{CakeItem, load_items};
use crate::config::Config;
use crate::document::update_html_file;
use crate::images::{Materialized, ensure_image_present};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// At least one target was rewritten.
    Updated(Vec<PathBuf>),
    NothingUpdated,
    LoadFailed,
}

impl RunOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::Updated(_) => 0,
            RunOutcome::NothingUpdated => 1,
            RunOutcome::LoadFailed => 2,
        }
    }
}

pub fn run(config: &Config) -> Result<RunOutcome> {
    let items = match load_items(&config.data_path) {
        Ok(items) => items,
        Err(err) => {
            eprintln!("Failed to load data: {err}");
            return Ok(RunOutcome::LoadFailed);
        }
    };

    if config.copy_images {
        materialize_images(config, &items);
    }

    let mut updated = Vec::new();
    for html_path in &config.html_paths {
        if !html_path.exists() {
            println!("Skipped (not found): {}", html_path.display());
            continue;
        }
        if update_html_file(html_path, &items, &config.images_web_dir)? {
            println!("Updated: {}", html_path.display());
            updated.push(html_path.clone());
        }
    }

    if updated.is_empty() {
        eprintln!("No HTML files were updated.");
        return Ok(RunOutcome::NothingUpdated);
    }
    Ok(RunOutcome::Updated(updated))
}

fn materialize_images(config: &Config, items: &[CakeItem]) {
    for item in items {
        match ensure_image_present(item, &config.images_dir) {
            Ok(Materialized::Copied { source, dest }) => {
                println!("Copied: {} -> {}", source.display(), dest.display());
            }
            Ok(Materialized::Ready(_) | Materialized::Skipped) => {}
            Err(err) => eprintln!("Warning: {err:#}"),
        }
    }
}
