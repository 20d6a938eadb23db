use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_CATEGORY: &str = "other-cakes";

/// One product record from the data file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CakeItem {
    pub category: Option<String>,
    pub image: Option<String>,
    pub title: Option<String>,
    pub price: Option<Price>,
    pub source_image: Option<PathBuf>,
}

impl CakeItem {
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .filter(|category| !category.is_empty())
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Price as it should be printed, `None` when absent or blank.
    pub fn display_price(&self) -> Option<String> {
        let price = self.price.as_ref()?.to_string();
        (!price.is_empty()).then_some(price)
    }
}

/// Prices are written either as bare numbers or as preformatted strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(serde_json::Number),
    Label(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(amount) => write!(f, "{amount}"),
            Price::Label(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("data must be a list of items or an object with an 'items' array")]
    InvalidShape,
    #[error("the 'items' field must be a list")]
    ItemsNotList,
    #[error("item #{index} is invalid: {reason}")]
    InvalidItem { index: usize, reason: String },
}

pub fn load_items(path: &Path) -> Result<Vec<CakeItem>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_items(&raw)
}

pub fn parse_items(raw: &str) -> Result<Vec<CakeItem>, LoadError> {
    let data: Value = serde_json::from_str(raw)?;
    let items = match data {
        Value::Object(mut object) if object.contains_key("items") => {
            match object.remove("items") {
                Some(Value::Array(items)) => items,
                _ => return Err(LoadError::ItemsNotList),
            }
        }
        Value::Array(items) => items,
        _ => return Err(LoadError::InvalidShape),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, value)| item_from_value(index, value))
        .collect()
}

fn item_from_value(index: usize, value: Value) -> Result<CakeItem, LoadError> {
    if !value.is_object() {
        return Err(LoadError::InvalidItem {
            index,
            reason: "expected an object".into(),
        });
    }
    serde_json::from_value(value).map_err(|err| LoadError::InvalidItem {
        index,
        reason: err.to_string(),
    })
}
