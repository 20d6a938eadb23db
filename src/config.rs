use std::path::PathBuf;

use clap::Parser;

const DEFAULT_DATA_PATH: &str = "cakes.json";
const DEFAULT_IMAGES_DIR: &str = "img/featured";
const DEFAULT_IMAGES_WEB_DIR: &str = "img/featured";
const DEFAULT_HTML_PATHS: [&str; 2] = ["index.html", "public/index.html"];

#[derive(Debug, Parser)]
#[command(
    name = "featured-cakes",
    version,
    about = "Update the Featured Cakes grid in index.html from a JSON data file."
)]
pub struct Cli {
    /// Path to JSON file with cake items.
    #[arg(long = "data", env = "FEATURED_CAKES_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// Destination images directory on disk (for optional copying).
    #[arg(long, env = "FEATURED_CAKES_IMAGES_DIR", default_value = DEFAULT_IMAGES_DIR)]
    pub images_dir: PathBuf,

    /// Images directory as referenced in HTML.
    #[arg(
        long,
        env = "FEATURED_CAKES_IMAGES_WEB_DIR",
        default_value = DEFAULT_IMAGES_WEB_DIR
    )]
    pub images_web_dir: String,

    /// One or more HTML files to update.
    #[arg(long = "html", num_args = 0.., default_values = DEFAULT_HTML_PATHS)]
    pub html_paths: Vec<PathBuf>,

    /// Do not attempt to copy images from 'source_image' to images-dir.
    #[arg(long, env = "FEATURED_CAKES_NO_COPY")]
    pub no_copy: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub images_dir: PathBuf,
    pub images_web_dir: String,
    pub html_paths: Vec<PathBuf>,
    pub copy_images: bool,
}

impl Config {
    pub fn from_cli() -> Self {
        Config::from_parts(Cli::parse())
    }

    pub fn from_parts(cli: Cli) -> Self {
        Self {
            data_path: cli.data_path,
            images_dir: cli.images_dir,
            images_web_dir: cli.images_web_dir,
            html_paths: cli.html_paths,
            copy_images: !cli.no_copy,
        }
    }
}
