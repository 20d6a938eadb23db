use std::fs;
use std::path::{Path, PathBuf};

use scraper::{Html, Selector};

use featured_cakes::config::Config;
use featured_cakes::pipeline::{RunOutcome, run};

const DATA: &str = r#"{
    "items": [
        {"category": "chocolate-cakes", "image": "red-velvet.jpg", "title": "Red Velvet", "price": 450, "source_image": "__SOURCE__"},
        {"category": "wedding-cakes", "image": "tiers/three.jpg", "title": "Three Tier"}
    ]
}"#;

const PAGE: &str = "<!DOCTYPE html>\n<html>\n<head><title>Featured</title></head>\n<body>\n\
    <div class=\"container\">\n\
    <div class=\"row featured__filter\">\n\
    <div class=\"col-lg-3 mix stale\"><h6><a href=\"#\">Stale</a></h6></div>\n\
    </div>\n\
    </div>\n\
    </body>\n</html>\n";

fn test_config(root: &Path, html_paths: Vec<PathBuf>) -> Config {
    Config {
        data_path: root.join("cakes.json"),
        images_dir: root.join("img/featured"),
        images_web_dir: "img/featured".into(),
        html_paths,
        copy_images: true,
    }
}

fn write_data(root: &Path) -> PathBuf {
    let source = root.join("uploads/red-velvet.jpg");
    fs::create_dir_all(source.parent().unwrap()).unwrap();
    fs::write(&source, b"jpeg bytes").unwrap();
    let data = DATA.replace("__SOURCE__", &source.display().to_string().replace('\\', "\\\\"));
    fs::write(root.join("cakes.json"), data).unwrap();
    source
}

fn grid_titles(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let cells = Selector::parse("div.row.featured__filter > div h6").unwrap();
    document
        .select(&cells)
        .map(|h6| h6.text().collect::<String>())
        .collect()
}

#[test]
fn updates_existing_targets_and_copies_images() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    write_data(root);
    let index = root.join("index.html");
    fs::write(&index, PAGE).unwrap();
    let missing = root.join("public/index.html");

    let config = test_config(root, vec![index.clone(), missing]);
    let outcome = run(&config).unwrap();

    assert_eq!(outcome, RunOutcome::Updated(vec![index.clone()]));
    assert_eq!(outcome.exit_code(), 0);

    let written = fs::read_to_string(&index).unwrap();
    assert_eq!(grid_titles(&written), vec!["Red Velvet", "Three Tier"]);
    assert!(written.contains("img/featured/tiers/three.jpg"));
    assert!(written.contains("৳450"));
    assert!(written.starts_with("<!DOCTYPE html>\n<html>\n<head><title>Featured</title></head>\n"));
    assert!(written.ends_with("</div></div>\n</div>\n</body>\n</html>\n"));

    assert_eq!(
        fs::read(root.join("img/featured/red-velvet.jpg")).unwrap(),
        b"jpeg bytes"
    );
    assert!(root.join("img/featured/tiers").is_dir());
}

#[test]
fn no_copy_leaves_image_dir_alone() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    write_data(root);
    let index = root.join("index.html");
    fs::write(&index, PAGE).unwrap();

    let config = Config {
        copy_images: false,
        ..test_config(root, vec![index])
    };
    assert_eq!(run(&config).unwrap().exit_code(), 0);
    assert!(!root.join("img").exists());
}

#[test]
fn missing_data_file_exits_with_two_and_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    let index = root.join("index.html");
    fs::write(&index, PAGE).unwrap();

    let outcome = run(&test_config(root, vec![index.clone()])).unwrap();

    assert_eq!(outcome, RunOutcome::LoadFailed);
    assert_eq!(outcome.exit_code(), 2);
    assert_eq!(fs::read_to_string(&index).unwrap(), PAGE);
    assert!(!root.join("img").exists());
}

#[test]
fn malformed_data_exits_with_two() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    fs::write(root.join("cakes.json"), r#""not a list""#).unwrap();

    let outcome = run(&test_config(root, vec![])).unwrap();
    assert_eq!(outcome.exit_code(), 2);
}

#[test]
fn all_targets_missing_exits_with_one() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    write_data(root);

    let config = test_config(
        root,
        vec![root.join("index.html"), root.join("public/index.html")],
    );
    let outcome = run(&config).unwrap();
    assert_eq!(outcome, RunOutcome::NothingUpdated);
    assert_eq!(outcome.exit_code(), 1);
}

#[test]
fn target_without_grid_is_skipped_but_others_update() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    write_data(root);
    let about = root.join("about.html");
    let about_html = "<html><body><p>About us</p></body></html>";
    fs::write(&about, about_html).unwrap();
    let index = root.join("index.html");
    fs::write(&index, PAGE).unwrap();

    let outcome = run(&test_config(root, vec![about.clone(), index.clone()])).unwrap();

    assert_eq!(outcome, RunOutcome::Updated(vec![index]));
    assert_eq!(fs::read_to_string(&about).unwrap(), about_html);
}

#[test]
fn invalid_item_aborts_update() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    fs::write(
        root.join("cakes.json"),
        r#"[{"image": "a.jpg", "title": "Fine"}, {"image": "b.jpg"}]"#,
    )
    .unwrap();
    let index = root.join("index.html");
    fs::write(&index, PAGE).unwrap();

    let err = run(&test_config(root, vec![index.clone()])).unwrap_err();
    assert!(format!("{err:#}").contains("missing 'title'"));
    assert_eq!(fs::read_to_string(&index).unwrap(), PAGE);
}
