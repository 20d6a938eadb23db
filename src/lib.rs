pub mod catalog;
pub mod config;
pub mod document;
pub mod images;
pub mod pipeline;
pub mod render;

pub use config::Config;
