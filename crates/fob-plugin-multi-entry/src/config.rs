//! Multi-entry configuration types
//!
//! The plugin historically accepted several configuration shapes (a single
//! pattern, a list of patterns, an `{ include, exclude, exports }` object, or
//! only flags while the patterns lived in the bundler's own `input`). Those
//! shapes are resolved once, at construction time, into [`MultiEntryConfig`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::MultiEntryError;

/// Which files make up the combined entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySpec {
    /// One path or glob pattern
    Single(String),
    /// Paths or glob patterns, expanded in order
    List(Vec<String>),
    /// Expansion of `include` minus every file matched by `exclude`
    IncludeExclude {
        include: Vec<String>,
        exclude: Vec<String>,
    },
}

impl EntrySpec {
    pub fn include_exclude<I, E, S, T>(include: I, exclude: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::IncludeExclude {
            include: include.into_iter().map(Into::into).collect(),
            exclude: exclude.into_iter().map(Into::into).collect(),
        }
    }

    /// Patterns contributing files, in declaration order
    pub fn include_patterns(&self) -> &[String] {
        match self {
            EntrySpec::Single(pattern) => std::slice::from_ref(pattern),
            EntrySpec::List(patterns) => patterns,
            EntrySpec::IncludeExclude { include, .. } => include,
        }
    }

    /// Patterns removing files from the result
    pub fn exclude_patterns(&self) -> &[String] {
        match self {
            EntrySpec::IncludeExclude { exclude, .. } => exclude,
            _ => &[],
        }
    }
}

impl From<&str> for EntrySpec {
    fn from(pattern: &str) -> Self {
        EntrySpec::Single(pattern.to_string())
    }
}

impl From<String> for EntrySpec {
    fn from(pattern: String) -> Self {
        EntrySpec::Single(pattern)
    }
}

impl From<Vec<String>> for EntrySpec {
    fn from(patterns: Vec<String>) -> Self {
        EntrySpec::List(patterns)
    }
}

impl From<Vec<&str>> for EntrySpec {
    fn from(patterns: Vec<&str>) -> Self {
        EntrySpec::List(patterns.into_iter().map(str::to_string).collect())
    }
}

/// What to do when an include pattern matches no files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyMatchPolicy {
    /// Fail resolution with [`MultiEntryError::NoMatches`]
    #[default]
    Error,
    /// Log a warning and contribute nothing
    Ignore,
}

/// Flags shared by both integration modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiEntryOptions {
    /// Re-export every named binding of every entry file
    pub exports: bool,

    /// Behavior for include patterns that match nothing
    pub on_empty_match: EmptyMatchPolicy,

    /// Directory relative patterns are expanded against
    ///
    /// Falls back to the process working directory at resolution time.
    pub cwd: Option<PathBuf>,
}

impl Default for MultiEntryOptions {
    fn default() -> Self {
        Self {
            exports: true,
            on_empty_match: EmptyMatchPolicy::default(),
            cwd: None,
        }
    }
}

impl MultiEntryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exports(mut self, enabled: bool) -> Self {
        self.exports = enabled;
        self
    }

    pub fn with_empty_match(mut self, policy: EmptyMatchPolicy) -> Self {
        self.on_empty_match = policy;
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Where the entry patterns come from
///
/// # Example
///
/// ```rust
/// use fob_plugin_multi_entry::{EntrySpec, MultiEntryConfig};
///
/// let config: MultiEntryConfig =
///     serde_json::from_str(r#"{ "include": ["src/*.js"], "exports": false }"#).unwrap();
///
/// match config {
///     MultiEntryConfig::Current { spec, options } => {
///         assert_eq!(spec, EntrySpec::include_exclude(["src/*.js"], Vec::<String>::new()));
///         assert!(!options.exports);
///     }
///     MultiEntryConfig::Legacy { .. } => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Option<RawConfig>")]
pub enum MultiEntryConfig {
    /// Patterns are part of the plugin configuration
    Current {
        spec: EntrySpec,
        options: MultiEntryOptions,
    },
    /// Patterns are read from the bundler's `input`, which is then replaced
    /// by the virtual entry
    Legacy { options: MultiEntryOptions },
}

impl Default for MultiEntryConfig {
    fn default() -> Self {
        MultiEntryConfig::Legacy {
            options: MultiEntryOptions::default(),
        }
    }
}

impl MultiEntryConfig {
    pub fn current(spec: impl Into<EntrySpec>, options: MultiEntryOptions) -> Self {
        MultiEntryConfig::Current {
            spec: spec.into(),
            options,
        }
    }

    pub fn legacy(options: MultiEntryOptions) -> Self {
        MultiEntryConfig::Legacy { options }
    }

    pub fn options(&self) -> &MultiEntryOptions {
        match self {
            MultiEntryConfig::Current { options, .. } | MultiEntryConfig::Legacy { options } => {
                options
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawConfig {
    Pattern(String),
    Patterns(Vec<String>),
    Object(RawConfigObject),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfigObject {
    include: Option<Vec<String>>,
    #[serde(default)]
    exclude: Vec<String>,
    exports: Option<bool>,
    on_empty_match: Option<EmptyMatchPolicy>,
    cwd: Option<PathBuf>,
}

impl TryFrom<Option<RawConfig>> for MultiEntryConfig {
    type Error = MultiEntryError;

    fn try_from(raw: Option<RawConfig>) -> Result<Self, Self::Error> {
        let Some(raw) = raw else {
            return Ok(MultiEntryConfig::default());
        };

        match raw {
            RawConfig::Pattern(pattern) => Ok(MultiEntryConfig::current(
                EntrySpec::Single(pattern),
                MultiEntryOptions::default(),
            )),
            RawConfig::Patterns(patterns) => Ok(MultiEntryConfig::current(
                EntrySpec::List(patterns),
                MultiEntryOptions::default(),
            )),
            RawConfig::Object(object) => {
                let mut options = MultiEntryOptions::default();
                if let Some(exports) = object.exports {
                    options.exports = exports;
                }
                if let Some(policy) = object.on_empty_match {
                    options.on_empty_match = policy;
                }
                options.cwd = object.cwd;

                match object.include {
                    Some(include) => Ok(MultiEntryConfig::Current {
                        spec: EntrySpec::IncludeExclude {
                            include,
                            exclude: object.exclude,
                        },
                        options,
                    }),
                    None if !object.exclude.is_empty() => Err(MultiEntryError::InvalidConfig(
                        "`exclude` requires an `include` list".to_string(),
                    )),
                    None => Ok(MultiEntryConfig::Legacy { options }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> MultiEntryConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_default_options() {
        let options = MultiEntryOptions::default();
        assert!(options.exports);
        assert_eq!(options.on_empty_match, EmptyMatchPolicy::Error);
        assert!(options.cwd.is_none());
    }

    #[test]
    fn test_options_builder() {
        let options = MultiEntryOptions::new()
            .with_exports(false)
            .with_empty_match(EmptyMatchPolicy::Ignore)
            .with_cwd("/project");

        assert!(!options.exports);
        assert_eq!(options.on_empty_match, EmptyMatchPolicy::Ignore);
        assert_eq!(options.cwd, Some(PathBuf::from("/project")));
    }

    #[test]
    fn test_parse_single_pattern() {
        assert_eq!(
            parse(r#""src/index.js""#),
            MultiEntryConfig::current("src/index.js", MultiEntryOptions::default())
        );
    }

    #[test]
    fn test_parse_pattern_list() {
        assert_eq!(
            parse(r#"["a.js", "lib/*.js"]"#),
            MultiEntryConfig::current(vec!["a.js", "lib/*.js"], MultiEntryOptions::default())
        );
    }

    #[test]
    fn test_parse_include_exclude_with_flags() {
        let config = parse(
            r#"{ "include": ["src/*.js"], "exclude": ["src/skip.js"], "exports": false, "onEmptyMatch": "ignore" }"#,
        );

        let MultiEntryConfig::Current { spec, options } = config else {
            panic!("expected current mode");
        };
        assert_eq!(spec.include_patterns(), ["src/*.js"]);
        assert_eq!(spec.exclude_patterns(), ["src/skip.js"]);
        assert!(!options.exports);
        assert_eq!(options.on_empty_match, EmptyMatchPolicy::Ignore);
    }

    #[test]
    fn test_parse_flags_only_is_legacy() {
        let config = parse(r#"{ "exports": false }"#);
        assert_eq!(
            config,
            MultiEntryConfig::legacy(MultiEntryOptions::new().with_exports(false))
        );
    }

    #[test]
    fn test_parse_null_is_legacy_default() {
        assert_eq!(parse("null"), MultiEntryConfig::default());
    }

    #[test]
    fn test_parse_exclude_without_include_fails() {
        let result = serde_json::from_str::<MultiEntryConfig>(r#"{ "exclude": ["a.js"] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_unknown_field_fails() {
        let result = serde_json::from_str::<MultiEntryConfig>(r#"{ "entries": ["a.js"] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_spec_patterns() {
        let single = EntrySpec::from("a.js");
        assert_eq!(single.include_patterns(), ["a.js"]);
        assert!(single.exclude_patterns().is_empty());

        let spec = EntrySpec::include_exclude(["*.js"], ["b.js"]);
        assert_eq!(spec.include_patterns(), ["*.js"]);
        assert_eq!(spec.exclude_patterns(), ["b.js"]);
    }
}
