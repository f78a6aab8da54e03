//! Integration tests for treeplate-core through its public API only.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

use serde_json::json;
use treeplate_core::prelude::*;

/// Flat `/`-separated source with one directory level.
struct FlatSource(BTreeMap<&'static str, &'static str>);

impl FileSource for FlatSource {
    fn path_style(&self) -> PathStyle {
        PathStyle::Slash
    }

    fn is_dir(&self, path: &str) -> TreeplateResult<bool> {
        Ok(!self.0.contains_key(path))
    }

    fn read_dir(&self, path: &str) -> TreeplateResult<Vec<DirEntry>> {
        let prefix = format!("{path}/");
        Ok(self
            .0
            .keys()
            .filter_map(|k| k.strip_prefix(prefix.as_str()))
            .map(|name| DirEntry::new(name, false))
            .collect())
    }

    fn read_file(&self, path: &str) -> TreeplateResult<Vec<u8>> {
        Ok(self.0[path].as_bytes().to_vec())
    }

    fn open(&self, path: &str) -> TreeplateResult<Box<dyn Read>> {
        Ok(Box::new(Cursor::new(self.read_file(path)?)))
    }
}

/// Uppercases the body; ignores data.
struct Shout;

struct ShoutTemplate(String);

impl CompiledTemplate for ShoutTemplate {
    fn execute(&self, _data: &serde_json::Value, out: &mut dyn Write) -> TreeplateResult<()> {
        out.write_all(self.0.to_uppercase().as_bytes())
            .map_err(|e| TreeplateError::Internal {
                message: e.to_string(),
            })
    }
}

impl TemplateEngine for Shout {
    fn compile(
        &self,
        _name: &str,
        source: String,
        _delimiters: Option<&Delimiters>,
    ) -> TreeplateResult<Box<dyn CompiledTemplate>> {
        Ok(Box::new(ShoutTemplate(source)))
    }
}

fn source() -> FlatSource {
    FlatSource(BTreeMap::from([
        ("docs/readme.md.tmpl", "read me"),
        ("docs/notes.txt", "notes"),
    ]))
}

#[test]
fn downstream_ports_drive_parse_service() {
    let service = ParseService::new(
        Box::new(source()),
        Box::new(Shout),
        ParserConfig::new("docs").unwrap(),
    );

    let templates = service.parse().unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].name(), "docs/readme.md.tmpl");
    assert_eq!(templates[0].render(&json!(null)).unwrap(), "READ ME");
}

#[test]
fn plan_classifies_templates_and_assets() {
    struct NoSink;
    impl OutputSink for NoSink {
        fn create_dir_all(&self, _: &std::path::Path) -> TreeplateResult<()> {
            unreachable!("plan never writes")
        }
        fn create_file(&self, _: &std::path::Path) -> TreeplateResult<Box<dyn Write>> {
            unreachable!("plan never writes")
        }
    }

    let report = RenderService::new(
        Box::new(source()),
        Box::new(Shout),
        Box::new(NoSink),
        ParserConfig::new("docs").unwrap(),
    )
    .plan("site")
    .unwrap();

    let jobs: Vec<_> = report
        .jobs
        .iter()
        .map(|j| (j.source.as_str(), j.destination.to_string_lossy().into_owned(), j.is_template))
        .collect();
    assert_eq!(
        jobs,
        vec![
            ("docs/notes.txt", format!("site{}notes.txt", std::path::MAIN_SEPARATOR), false),
            ("docs/readme.md.tmpl", format!("site{}readme.md", std::path::MAIN_SEPARATOR), true),
        ]
    );
}

#[test]
fn config_validation_surfaces_domain_errors() {
    let err = ParserConfig::builder("docs")
        .delimiters("<<", "")
        .build()
        .unwrap_err();
    let err: TreeplateError = err.into();
    assert!(err.to_string().contains("Configuration"));
    assert!(!err.suggestions().is_empty());
}
