use html_escape::{decode_html_entities, encode_double_quoted_attribute, encode_text};
use thiserror::Error;

use crate::catalog::CakeItem;

const CURRENCY: &str = "৳";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("item missing 'image' (title: {title:?})")]
    MissingImage { title: Option<String> },
    #[error("item missing 'title' (image: {image:?})")]
    MissingTitle { image: Option<String> },
}

/// Joins the web-facing image directory and an item's relative image path.
pub fn image_web_path(images_web_dir: &str, image: &str) -> String {
    format!("{}/{}", images_web_dir.trim_end_matches('/'), image)
}

/// Renders one grid cell in the same shape as the hand-authored site markup.
pub fn render_item(item: &CakeItem, images_web_dir: &str) -> Result<String, RenderError> {
    let image = non_empty(&item.image).ok_or_else(|| RenderError::MissingImage {
        title: item.title.clone(),
    })?;
    let title = non_empty(&item.title).ok_or_else(|| RenderError::MissingTitle {
        image: item.image.clone(),
    })?;

    let category = attribute(item.category_or_default());
    let web_path = image_web_path(images_web_dir, image);
    let img_path = attribute(&web_path);
    let modal_path = attribute(&js_single_quoted(&decode_html_entities(&web_path)));
    let title = text(title);
    let price_html = item
        .display_price()
        .map(|price| format!("\n\t\t\t\t\t\t\t<h5>{CURRENCY}{}</h5>", text(&price)))
        .unwrap_or_default();

    Ok(format!(
        "<div class=\"col-lg-3 col-md-4 col-sm-6 mix {category}\">\n\
         \t<div class=\"featured__item\">\n\
         \t\t<div class=\"featured__item__pic set-bg\" data-setbg=\"{img_path}\">\n\
         \t\t\t<ul class=\"featured__item__pic__hover\">\n\
         \t\t\t\t<li><a href=\"{img_path}\" download><i class=\"fa fa-download\"></i></a></li>\n\
         \t\t\t\t<li><a href=\"#\" onclick=\"openImageModal('{modal_path}')\"><i class=\"fa fa-search-plus\"></i></a></li>\n\
         \t\t\t</ul>\n\
         \t\t</div>\n\
         \t\t<div class=\"featured__item__text\">\n\
         \t\t\t<h6><a href=\"#\">{title}</a></h6>{price_html}\n\
         \t\t</div>\n\
         \t</div>\n\
         </div>"
    ))
}

// Values may already carry entities (`&amp;`); decoding first keeps them from
// being escaped twice.
fn text(value: &str) -> String {
    encode_text(&decode_html_entities(value)).into_owned()
}

fn attribute(value: &str) -> String {
    encode_double_quoted_attribute(&decode_html_entities(value)).into_owned()
}

fn js_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
