//! Entry list resolution
//!
//! Expands the patterns of an [`EntrySpec`] against the filesystem and
//! produces a deduplicated, order-stable list of files.
//!
//! ## Pattern rules
//!
//! - A pattern without `*`, `?`, `[` or `{` is a literal path and matches
//!   only if it names an existing file.
//! - Otherwise the leading components without metacharacters form the walk
//!   root, and the remainder is matched with `globset` against paths relative
//!   to that root. Directory entries are visited in file-name order.
//! - Results are absolute: relative patterns are joined to the working
//!   directory and cleaned.

use globset::{GlobBuilder, GlobMatcher};
use path_clean::PathClean;
use rustc_hash::FxHashSet;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{EmptyMatchPolicy, EntrySpec};
use crate::error::{MultiEntryError, Result};

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Expands entry patterns into concrete files
#[derive(Debug, Clone)]
pub struct EntryListResolver {
    cwd: PathBuf,
    on_empty_match: EmptyMatchPolicy,
}

impl EntryListResolver {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            on_empty_match: EmptyMatchPolicy::default(),
        }
    }

    pub fn with_empty_match(mut self, policy: EmptyMatchPolicy) -> Self {
        self.on_empty_match = policy;
        self
    }

    /// Resolve a spec into its file list
    ///
    /// Include patterns are expanded in order and duplicates keep their first
    /// position. Any file matched by an exclude pattern is dropped. Exclude
    /// patterns matching nothing are not an error.
    pub fn resolve(&self, spec: &EntrySpec) -> Result<Vec<PathBuf>> {
        let cwd = self.absolute_cwd()?;
        let mut seen = FxHashSet::default();
        let mut files = Vec::new();

        for pattern in spec.include_patterns() {
            let matches = expand_pattern(&cwd, pattern)?;
            if matches.is_empty() {
                match self.on_empty_match {
                    EmptyMatchPolicy::Error => return Err(MultiEntryError::no_matches(pattern)),
                    EmptyMatchPolicy::Ignore => {
                        tracing::warn!(pattern = %pattern, "entry pattern matched no files");
                    }
                }
            }

            for path in matches {
                if seen.insert(path.clone()) {
                    files.push(path);
                }
            }
        }

        let mut excluded = FxHashSet::default();
        for pattern in spec.exclude_patterns() {
            excluded.extend(expand_pattern(&cwd, pattern)?);
        }
        if !excluded.is_empty() {
            files.retain(|path| !excluded.contains(path));
        }

        Ok(files)
    }

    /// Expand a single pattern, in match order
    pub fn expand(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let cwd = self.absolute_cwd()?;
        expand_pattern(&cwd, pattern)
    }

    /// Working directory as an absolute, cleaned path
    ///
    /// Literal and glob matches are only comparable (for dedup and exclusion)
    /// when both are built from the same absolute base.
    fn absolute_cwd(&self) -> Result<PathBuf> {
        std::path::absolute(&self.cwd)
            .map(|cwd| cwd.clean())
            .map_err(|e| MultiEntryError::io(&self.cwd, e))
    }
}

fn expand_pattern(cwd: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matches = if has_glob_meta(pattern) {
        expand_glob(cwd, pattern)?
    } else {
        expand_literal(cwd, pattern)
    };

    // Generated imports must name the file exactly
    if let Some(path) = matches.iter().find(|path| path.to_str().is_none()) {
        return Err(MultiEntryError::non_utf8_path(path));
    }

    tracing::debug!(pattern = %pattern, matches = matches.len(), "expanded entry pattern");
    Ok(matches)
}

fn expand_literal(cwd: &Path, pattern: &str) -> Vec<PathBuf> {
    let path = cwd.join(pattern).clean();
    if path.is_file() {
        vec![path]
    } else {
        Vec::new()
    }
}

fn expand_glob(cwd: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let (base, rest) = split_pattern(pattern);
    let root = cwd.join(base).clean();

    let matcher = compile(pattern, &rest)?;

    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut walker = WalkDir::new(&root)
        .min_depth(1)
        .sort_by_file_name()
        .follow_links(true);
    if !rest.contains("**") {
        walker = walker.max_depth(rest.split('/').count());
    }

    let mut matches = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            MultiEntryError::io(path, source)
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(&root) else {
            continue;
        };
        if matcher.is_match(to_slash(relative)) {
            matches.push(entry.into_path().clean());
        }
    }

    Ok(matches)
}

fn has_glob_meta(pattern: &str) -> bool {
    pattern.contains(GLOB_META)
}

/// Split a pattern into its literal directory prefix and the glob remainder
fn split_pattern(pattern: &str) -> (PathBuf, String) {
    let mut base = PathBuf::new();
    let mut segments = pattern.split('/').peekable();

    if pattern.starts_with('/') {
        base.push("/");
        segments.next();
    }

    while let Some(segment) = segments.next_if(|segment| !has_glob_meta(segment)) {
        base.push(segment);
    }

    (base, segments.collect::<Vec<_>>().join("/"))
}

fn compile(pattern: &str, rest: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(rest)
        .literal_separator(true)
        .empty_alternates(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| MultiEntryError::invalid_pattern(pattern, e))
}

fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
