//! Naming rules: extension matching, template names, output destinations.
//!
//! Everything here is pure string/path arithmetic; no I/O.

use std::path::{Path, PathBuf};

/// Separator convention of a file source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStyle {
    /// The host OS convention (`std::path`).
    Native,
    /// Always `/`, whatever the host OS (virtual and embedded sources).
    Slash,
}

impl PathStyle {
    pub fn is_separator(self, c: char) -> bool {
        match self {
            Self::Native => std::path::is_separator(c),
            Self::Slash => c == '/',
        }
    }

    /// Join a directory path and an entry name.
    ///
    /// This is how template names are built: walk root plus every segment
    /// down to the file, so `a/foo.tmpl` and `b/foo.tmpl` never collide.
    pub fn join(self, parent: &str, child: &str) -> String {
        match self {
            Self::Native => Path::new(parent).join(child).to_string_lossy().into_owned(),
            Self::Slash => {
                if parent.is_empty() || parent == "." {
                    child.to_string()
                } else {
                    format!("{}/{}", parent.trim_end_matches('/'), child)
                }
            }
        }
    }

    /// Final segment of `path`.
    pub fn file_name(self, path: &str) -> &str {
        match path.rfind(|c| self.is_separator(c)) {
            Some(idx) => &path[idx + 1..],
            None => path,
        }
    }
}

/// Suffix of a file name starting at its last `.`, or `""`.
///
/// `page.md.tmpl` → `.tmpl`; `Makefile` → `""`.
pub fn extension_of(file_name: &str) -> &str {
    file_name.rfind('.').map_or("", |idx| &file_name[idx..])
}

/// Case-insensitive comparison of a file's final suffix with `extension`.
pub fn matches_extension(file_name: &str, extension: &str) -> bool {
    extension_of(file_name).to_lowercase() == extension.to_lowercase()
}

/// Remainder of `path` below `root`, leading separators trimmed.
///
/// When `root` is not a prefix of `path` the whole path is kept.
pub fn relative_to_root<'a>(path: &'a str, root: &str, style: PathStyle) -> &'a str {
    let remainder = if style == PathStyle::Slash && (root.is_empty() || root == ".") {
        path
    } else {
        path.strip_prefix(root).unwrap_or(path)
    };
    remainder.trim_start_matches(|c| style.is_separator(c))
}

/// Destination of `path` inside `output_root`.
///
/// `strip_extension` is set for template files: the matched final suffix is
/// removed (`page.md.tmpl` → `page.md`). Assets keep their name.
///
/// ```
/// use std::path::Path;
/// use treeplate_core::domain::{destination_for, PathStyle};
///
/// let dest = destination_for(
///     "/src/a/b/page.tex.tmpl",
///     "/src",
///     Some(".tmpl"),
///     Path::new("/out"),
///     PathStyle::Slash,
/// );
/// assert_eq!(dest, Path::new("/out/a/b/page.tex"));
/// ```
pub fn destination_for(
    path: &str,
    root: &str,
    strip_extension: Option<&str>,
    output_root: &Path,
    style: PathStyle,
) -> PathBuf {
    let mut relative = relative_to_root(path, root, style);

    if let Some(ext) = strip_extension {
        let name = style.file_name(relative);
        if matches_extension(name, ext) {
            let suffix = extension_of(name).len();
            relative = &relative[..relative.len() - suffix];
        }
    }

    let mut dest = output_root.to_path_buf();
    for segment in relative
        .split(|c| style.is_separator(c))
        .filter(|s| !s.is_empty() && *s != ".")
    {
        dest.push(segment);
    }
    dest
}
