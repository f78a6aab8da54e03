//! Depth-first entry walker over a [`FileSource`].
//!
//! The walk is an explicit worklist: each directory is listed once, its
//! children are sorted by name and pushed in reverse so they pop in order.
//! The first error ends the walk.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::trace;

use crate::{
    application::ports::FileSource,
    domain::FileEntry,
    error::{TreeplateError, TreeplateResult},
};

/// Cooperative cancellation flag shared between a caller and a pass.
///
/// Checked before each directory is listed; a read or write already in
/// progress always completes.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Iterator over every entry below a root.
///
/// Yields directories (`is_dir = true`) and files in depth-first pre-order.
/// The root itself is yielded only when it is a file.
pub struct Walk<'a> {
    source: &'a dyn FileSource,
    cancel: Option<&'a CancelToken>,
    root: Option<String>,
    stack: Vec<FileEntry>,
    done: bool,
}

impl<'a> Walk<'a> {
    pub fn new(source: &'a dyn FileSource, root: impl Into<String>) -> Self {
        Self {
            source,
            cancel: None,
            root: Some(root.into()),
            stack: Vec::new(),
            done: false,
        }
    }

    pub fn with_cancel(mut self, cancel: Option<&'a CancelToken>) -> Self {
        self.cancel = cancel;
        self
    }

    fn check_cancelled(&self) -> TreeplateResult<()> {
        match self.cancel {
            Some(token) if token.is_cancelled() => Err(TreeplateError::Cancelled),
            _ => Ok(()),
        }
    }

    /// List `dir` and queue its children.
    fn expand(&mut self, dir: &str) -> TreeplateResult<()> {
        self.check_cancelled()?;

        let mut children = self.source.read_dir(dir)?;
        children.sort_by(|a, b| a.name.cmp(&b.name));
        trace!(dir, count = children.len(), "listed directory");

        let style = self.source.path_style();
        self.stack.extend(children.into_iter().rev().map(|child| FileEntry {
            path: style.join(dir, &child.name),
            is_dir: child.is_dir,
        }));
        Ok(())
    }

    fn fail(&mut self, err: TreeplateError) -> Option<TreeplateResult<FileEntry>> {
        self.done = true;
        self.stack.clear();
        Some(Err(err))
    }
}

impl Iterator for Walk<'_> {
    type Item = TreeplateResult<FileEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(root) = self.root.take() {
            if let Err(e) = self.check_cancelled() {
                return self.fail(e);
            }
            match self.source.is_dir(&root) {
                Ok(true) => {
                    if let Err(e) = self.expand(&root) {
                        return self.fail(e);
                    }
                }
                Ok(false) => return Some(Ok(FileEntry::file(root))),
                Err(e) => return self.fail(e),
            }
        }

        let entry = self.stack.pop()?;
        if entry.is_dir {
            if let Err(e) = self.expand(&entry.path) {
                return self.fail(e);
            }
        }
        Some(Ok(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{DirEntry, MockFileSource};
    use crate::domain::PathStyle;

    fn tree_source() -> MockFileSource {
        let mut fs = MockFileSource::new();
        fs.expect_path_style().return_const(PathStyle::Slash);
        fs.expect_is_dir().returning(|p: &str| Ok(p == "t"));
        fs.expect_read_dir().returning(|p: &str| match p {
            // deliberately unsorted
            "t" => Ok(vec![
                DirEntry::new("title.md.tmpl", false),
                DirEntry::new("chapters", true),
                DirEntry::new("logo.png", false),
            ]),
            "t/chapters" => Ok(vec![
                DirEntry::new("01-install.md.tmpl", false),
                DirEntry::new("00-about.md.tmpl", false),
            ]),
            other => Err(TreeplateError::Traversal {
                path: other.into(),
                reason: "unexpected".into(),
            }),
        });
        fs
    }

    #[test]
    fn walks_depth_first_in_name_order() {
        let fs = tree_source();
        let entries: Vec<_> = Walk::new(&fs, "t").collect::<Result<_, _>>().unwrap();

        assert_eq!(
            entries,
            vec![
                FileEntry::dir("t/chapters"),
                FileEntry::file("t/chapters/00-about.md.tmpl"),
                FileEntry::file("t/chapters/01-install.md.tmpl"),
                FileEntry::file("t/logo.png"),
                FileEntry::file("t/title.md.tmpl"),
            ]
        );
    }

    #[test]
    fn root_file_is_yielded() {
        let mut fs = MockFileSource::new();
        fs.expect_is_dir().returning(|_| Ok(false));
        fs.expect_read_dir().never();

        let entries: Vec<_> = Walk::new(&fs, "single.tmpl")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(entries, vec![FileEntry::file("single.tmpl")]);
    }

    #[test]
    fn listing_error_ends_the_walk() {
        let mut fs = MockFileSource::new();
        fs.expect_path_style().return_const(PathStyle::Slash);
        fs.expect_is_dir().returning(|_| Ok(true));
        fs.expect_read_dir().returning(|p: &str| match p {
            "t" => Ok(vec![DirEntry::new("a", true), DirEntry::new("b.tmpl", false)]),
            other => Err(TreeplateError::Traversal {
                path: other.into(),
                reason: "permission denied".into(),
            }),
        });

        let mut walk = Walk::new(&fs, "t");
        let err = walk.next().unwrap().unwrap_err();
        assert!(matches!(err, TreeplateError::Traversal { ref path, .. } if path == "t/a"));
        assert!(walk.next().is_none());
    }

    #[test]
    fn missing_root_is_an_error() {
        let mut fs = MockFileSource::new();
        fs.expect_is_dir()
            .returning(|p: &str| Err(TreeplateError::NotFound { path: p.into() }));

        let result: Result<Vec<_>, _> = Walk::new(&fs, "nope").collect();
        assert!(matches!(result, Err(TreeplateError::NotFound { .. })));
    }

    #[test]
    fn cancelled_token_stops_before_any_listing() {
        let mut fs = MockFileSource::new();
        fs.expect_is_dir().never();
        fs.expect_read_dir().never();

        let token = CancelToken::new();
        token.cancel();

        let result: Result<Vec<_>, _> = Walk::new(&fs, "t").with_cancel(Some(&token)).collect();
        assert!(matches!(result, Err(TreeplateError::Cancelled)));
    }

    #[test]
    fn cancel_mid_walk_stops_at_next_directory() {
        let mut fs = MockFileSource::new();
        fs.expect_path_style().return_const(PathStyle::Slash);
        fs.expect_is_dir().returning(|_| Ok(true));
        fs.expect_read_dir().returning(|p: &str| match p {
            "t" => Ok(vec![DirEntry::new("a", true), DirEntry::new("b", true)]),
            _ => Ok(Vec::new()),
        });

        let token = CancelToken::new();
        let mut walk = Walk::new(&fs, "t").with_cancel(Some(&token));

        assert_eq!(walk.next().unwrap().unwrap(), FileEntry::dir("t/a"));
        token.cancel();
        assert!(matches!(walk.next(), Some(Err(TreeplateError::Cancelled))));
        assert!(walk.next().is_none());
    }
}
