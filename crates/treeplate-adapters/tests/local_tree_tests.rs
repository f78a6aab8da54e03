//! Parse and render passes over real directories.

use std::fs;
use std::path::{MAIN_SEPARATOR, Path};

use serde_json::json;
use tempfile::TempDir;
use treeplate_adapters::{LocalFilesystem, MemoryFilesystem, MiniJinjaEngine};
use treeplate_core::{
    application::{ParseService, RenderService},
    domain::ParserConfig,
    error::TreeplateError,
};

fn write(root: &Path, rel: &str, body: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "title.md.tmpl", b"Hello {{ Name }}");
    write(dir.path(), "a/foo.tmpl", b"a {{ Name }}");
    write(dir.path(), "b/foo.tmpl", b"b {{ Name }}");
    write(dir.path(), "img/logo.png", &[0x89, b'P', b'N', b'G', 0, 0xff]);
    dir
}

fn root_of(dir: &TempDir) -> String {
    dir.path().to_string_lossy().into_owned()
}

fn local_renderer(config: ParserConfig) -> RenderService {
    RenderService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(MiniJinjaEngine::new()),
        Box::new(LocalFilesystem::new()),
        config,
    )
}

#[test]
fn native_names_use_the_os_separator() {
    let dir = site();
    let root = root_of(&dir);
    let service = ParseService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(MiniJinjaEngine::new()),
        ParserConfig::new(root.clone()).unwrap(),
    );

    let map = service.parse_map().unwrap();
    let a = format!("{root}{MAIN_SEPARATOR}a{MAIN_SEPARATOR}foo.tmpl");
    let b = format!("{root}{MAIN_SEPARATOR}b{MAIN_SEPARATOR}foo.tmpl");

    assert_eq!(map.len(), 3);
    assert_eq!(map[&a].render(&json!({ "Name": "x" })).unwrap(), "a x");
    assert_eq!(map[&b].render(&json!({ "Name": "x" })).unwrap(), "b x");
}

#[test]
fn renders_into_fresh_output_directory() {
    let src = site();
    let out = TempDir::new().unwrap();
    let out_root = out.path().join("nested/output");

    let report = local_renderer(ParserConfig::new(root_of(&src)).unwrap())
        .render(&out_root, &json!({ "Name": "Frank" }))
        .unwrap();

    assert_eq!(
        fs::read_to_string(out_root.join("title.md")).unwrap(),
        "Hello Frank"
    );
    assert_eq!(fs::read_to_string(out_root.join("a/foo")).unwrap(), "a Frank");
    assert_eq!(
        fs::read(out_root.join("img/logo.png")).unwrap(),
        vec![0x89, b'P', b'N', b'G', 0, 0xff]
    );
    assert_eq!(report.rendered(), 3);
    assert_eq!(report.copied(), 1);
}

#[test]
fn execution_error_stops_the_pass() {
    let src = site();
    let out = TempDir::new().unwrap();

    let err = local_renderer(ParserConfig::new(root_of(&src)).unwrap())
        .render(out.path(), &json!({}))
        .unwrap_err();

    // walk order: a/foo.tmpl comes first
    match err {
        TreeplateError::Execution { name, .. } => assert!(name.ends_with("foo.tmpl")),
        other => panic!("expected execution error, got {other:?}"),
    }
    assert!(!out.path().join("b").exists());
    assert!(!out.path().join("title.md").exists());
}

#[test]
fn missing_source_directory_is_reported() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope").to_string_lossy().into_owned();

    let err = local_renderer(ParserConfig::new(missing.clone()).unwrap())
        .render(dir.path().join("out"), &json!({}))
        .unwrap_err();
    assert!(matches!(err, TreeplateError::NotFound { ref path } if *path == missing));
}

#[test]
fn non_utf8_template_is_a_decode_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.tmpl", &[0xff, 0xfe, 0xfd]);

    let service = ParseService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(MiniJinjaEngine::new()),
        ParserConfig::new(root_of(&dir)).unwrap(),
    );
    assert!(matches!(
        service.parse().unwrap_err(),
        TreeplateError::Decode { .. }
    ));
}

#[test]
fn embedded_tree_renders_to_disk() {
    static EMBEDDED: &[(&str, &[u8])] = &[
        ("site/index.html.tmpl", b"<h1>{{ Title }}</h1>\n"),
        ("site/css/main.css", b"body { margin: 0 }\n"),
    ];

    let out = TempDir::new().unwrap();
    RenderService::new(
        Box::new(MemoryFilesystem::from_entries(EMBEDDED)),
        Box::new(MiniJinjaEngine::new()),
        Box::new(LocalFilesystem::new()),
        ParserConfig::new("site").unwrap(),
    )
    .render(out.path(), &json!({ "Title": "Fish & Chips" }))
    .unwrap();

    assert_eq!(
        fs::read_to_string(out.path().join("index.html")).unwrap(),
        "<h1>Fish & Chips</h1>\n"
    );
    assert_eq!(
        fs::read_to_string(out.path().join("css/main.css")).unwrap(),
        "body { margin: 0 }\n"
    );
}
