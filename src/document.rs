use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use anyhow::{Context, Result};
use lol_html::errors::RewritingError;
use lol_html::html_content::{ContentType, EndTag};
use lol_html::{EndTagHandler, HandlerResult, RewriteStrSettings, element, rewrite_str};
use thiserror::Error;

use crate::catalog::CakeItem;
use crate::render::{RenderError, render_item};

const GRID_SELECTOR: &str = "div.row.featured__filter";
const GRID_CHILD_SELECTOR: &str = "div.row.featured__filter > *";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("failed to rewrite HTML: {0}")]
    Rewrite(#[from] RewritingError),
}

/// Where the rewriter is relative to the first featured grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GridState {
    Pending,
    Open,
    Closed,
}

/// Swaps the element children of the first featured grid for freshly rendered
/// items and returns the updated document.
///
/// Returns `Ok(None)` when the document has no grid. Bytes outside the grid are
/// passed through untouched. Text, whitespace and comment nodes inside the grid
/// are kept in place; rendered items go after them, right before `</div>`.
pub fn replace_featured_items(
    source: &str,
    items: &[CakeItem],
    images_web_dir: &str,
) -> Result<Option<String>, DocumentError> {
    let rendered = items
        .iter()
        .map(|item| render_item(item, images_web_dir))
        .collect::<Result<String, _>>();
    let cells = rendered.as_deref().unwrap_or_default();

    let state = Rc::new(Cell::new(GridState::Pending));
    let grid_state = Rc::clone(&state);
    let child_state = Rc::clone(&state);

    let output = rewrite_str(
        source,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!(GRID_SELECTOR, move |el| {
                    if grid_state.get() != GridState::Pending {
                        return Ok(());
                    }
                    let Some(handlers) = el.end_tag_handlers() else {
                        return Ok(());
                    };
                    let cells = cells.to_owned();
                    let end_state = Rc::clone(&grid_state);
                    handlers.push(Box::new(move |end: &mut EndTag<'_>| -> HandlerResult {
                        end.before(&cells, ContentType::Html);
                        end_state.set(GridState::Closed);
                        Ok(())
                    }) as EndTagHandler<'static>);
                    grid_state.set(GridState::Open);
                    Ok(())
                }),
                element!(GRID_CHILD_SELECTOR, move |el| {
                    if child_state.get() == GridState::Open {
                        el.remove();
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )?;

    // A grid whose end tag never shows up is treated as missing.
    if state.get() != GridState::Closed {
        return Ok(None);
    }
    rendered?;
    Ok(Some(output))
}

/// Rewrites the featured grid of the HTML file at `path` in place.
///
/// Returns `Ok(false)` without touching the file when it does not exist or has no
/// grid. Render failures leave the file unwritten.
pub fn update_html_file(path: &Path, items: &[CakeItem], images_web_dir: &str) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let updated = replace_featured_items(&source, items, images_web_dir)
        .with_context(|| format!("failed to render items for {}", path.display()))?;
    let Some(updated) = updated else {
        eprintln!(
            "Could not find 'div.row.featured__filter' in {}",
            path.display()
        );
        return Ok(false);
    };

    fs::write(path, updated).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}
