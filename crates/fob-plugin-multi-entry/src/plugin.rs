//! Rolldown plugin serving the combined entry module
//!
//! The plugin owns a single virtual module, [`VIRTUAL_ENTRY_ID`]. Rolldown
//! asks for it through the `resolve_id` hook (which the plugin claims) and
//! then the `load` hook, where the entry patterns are expanded and the
//! module source is generated. Nothing is cached between builds.
//!
//! ## Integration modes
//!
//! - **Current**: patterns are given to the plugin. The bundler's `input`
//!   must point at the virtual entry (see [`MultiEntryPlugin::input_item`]);
//!   [`MultiEntryPlugin::from_config`] sets it when no input is configured.
//! - **Legacy**: patterns are the bundler's own `input` items.
//!   [`MultiEntryPlugin::from_config`] reads them and rewrites `input` to the
//!   virtual entry. An item prefixed with `!` is an exclude pattern.

use anyhow::Context;
use rolldown::{BundlerOptions, InputItem};
use rolldown_common::ModuleType;
use rolldown_plugin::{
    HookLoadArgs, HookLoadOutput, HookLoadReturn, HookResolveIdArgs, HookResolveIdOutput,
    HookResolveIdReturn, Plugin, PluginContext,
};
use std::borrow::Cow;
use std::path::PathBuf;

use crate::config::{EntrySpec, MultiEntryConfig, MultiEntryOptions};
use crate::error::{MultiEntryError, Result};
use crate::generator::generate;
use crate::resolver::EntryListResolver;

/// Module id of the combined entry
///
/// The `\0` prefix keeps it from colliding with a real path and tells other
/// plugins not to touch it.
pub const VIRTUAL_ENTRY_ID: &str = "\0fob-plugin-multi-entry:entry-point";

/// Chunk name used for the combined entry
pub const VIRTUAL_ENTRY_NAME: &str = "multi-entry";

/// Rolldown plugin that turns many files into one entry module
///
/// # Example
///
/// ```rust,no_run
/// use fob_plugin_multi_entry::{MultiEntryConfig, MultiEntryOptions, MultiEntryPlugin};
/// use rolldown::BundlerOptions;
/// use std::sync::Arc;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut options = BundlerOptions::default();
/// let config = MultiEntryConfig::current(vec!["src/*.js"], MultiEntryOptions::default());
/// let plugin = Arc::new(MultiEntryPlugin::from_config(config, &mut options)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MultiEntryPlugin {
    spec: EntrySpec,
    options: MultiEntryOptions,
}

impl MultiEntryPlugin {
    /// Create a plugin for the given patterns with default options
    pub fn new(spec: impl Into<EntrySpec>) -> Self {
        Self::with_options(spec, MultiEntryOptions::default())
    }

    pub fn with_options(spec: impl Into<EntrySpec>, options: MultiEntryOptions) -> Self {
        Self {
            spec: spec.into(),
            options,
        }
    }

    /// Create the plugin and normalize the bundler input for it
    ///
    /// # Errors
    ///
    /// In legacy mode:
    /// - [`MultiEntryError::MissingInput`] if the bundler has no `input`
    /// - [`MultiEntryError::MalformedInput`] if an input item is empty, a bare
    ///   `!`, or the virtual entry itself
    pub fn from_config(config: MultiEntryConfig, bundler: &mut BundlerOptions) -> Result<Self> {
        match config {
            MultiEntryConfig::Current { spec, options } => {
                if bundler.input.is_none() {
                    bundler.input = Some(vec![Self::input_item()]);
                } else if !bundler
                    .input
                    .iter()
                    .flatten()
                    .any(|item| item.import == VIRTUAL_ENTRY_ID)
                {
                    tracing::warn!(
                        "bundler input does not include the multi-entry module; \
                         the multi-entry patterns will not be bundled"
                    );
                }
                Ok(Self::with_options(spec, options))
            }
            MultiEntryConfig::Legacy { options } => {
                let input = bundler.input.as_ref().ok_or(MultiEntryError::MissingInput)?;
                let spec = spec_from_input(input)?;

                tracing::debug!(
                    include = spec.include_patterns().len(),
                    exclude = spec.exclude_patterns().len(),
                    "replacing bundler input with multi-entry module"
                );
                bundler.input = Some(vec![Self::input_item()]);

                Ok(Self::with_options(spec, options))
            }
        }
    }

    /// Bundler input item pointing at the virtual entry
    pub fn input_item() -> InputItem {
        InputItem {
            name: Some(VIRTUAL_ENTRY_NAME.to_string()),
            import: VIRTUAL_ENTRY_ID.to_string(),
        }
    }

    pub fn spec(&self) -> &EntrySpec {
        &self.spec
    }

    pub fn options(&self) -> &MultiEntryOptions {
        &self.options
    }

    /// Claim a module request if it is the virtual entry
    pub fn resolve_virtual_id(&self, specifier: &str) -> Option<&'static str> {
        (specifier == VIRTUAL_ENTRY_ID).then_some(VIRTUAL_ENTRY_ID)
    }

    /// Expand the configured patterns against the filesystem
    pub fn resolve_files(&self) -> Result<Vec<PathBuf>> {
        let cwd = match &self.options.cwd {
            Some(cwd) => cwd.clone(),
            None => std::env::current_dir().map_err(|e| MultiEntryError::io(".", e))?,
        };

        EntryListResolver::new(cwd)
            .with_empty_match(self.options.on_empty_match)
            .resolve(&self.spec)
    }

    /// Resolve the patterns and build the virtual module source
    pub fn generate_source(&self) -> Result<String> {
        let files = self.resolve_files()?;
        Ok(generate(&files, self.options.exports))
    }
}

/// Split bundler input items into include and `!`-prefixed exclude patterns
fn spec_from_input(input: &[InputItem]) -> Result<EntrySpec> {
    let mut include = Vec::new();
    let mut exclude = Vec::new();

    for item in input {
        let import = item.import.as_str();
        match import.strip_prefix('!') {
            _ if import == VIRTUAL_ENTRY_ID => {
                return Err(MultiEntryError::malformed_input(import));
            }
            Some(pattern) if !pattern.is_empty() => exclude.push(pattern.to_string()),
            None if !import.is_empty() => include.push(import.to_string()),
            _ => return Err(MultiEntryError::malformed_input(import)),
        }
    }

    if exclude.is_empty() {
        Ok(EntrySpec::List(include))
    } else {
        Ok(EntrySpec::IncludeExclude { include, exclude })
    }
}

impl Plugin for MultiEntryPlugin {
    fn name(&self) -> Cow<'static, str> {
        "fob-multi-entry".into()
    }

    fn register_hook_usage(&self) -> rolldown_plugin::HookUsage {
        use rolldown_plugin::HookUsage;
        HookUsage::ResolveId | HookUsage::Load
    }

    fn resolve_id(
        &self,
        _ctx: &PluginContext,
        args: &HookResolveIdArgs,
    ) -> impl std::future::Future<Output = HookResolveIdReturn> + Send {
        let specifier = args.specifier.to_string();
        let resolved = self.resolve_virtual_id(&specifier);

        async move {
            let Some(id) = resolved else {
                return Ok(None);
            };

            tracing::trace!("claimed multi-entry module");
            Ok(Some(HookResolveIdOutput {
                id: id.into(),
                ..Default::default()
            }))
        }
    }

    /// Load hook - generates the combined entry
    ///
    /// Patterns are expanded on every call so each build sees the current
    /// filesystem. Resolution errors abort the build.
    fn load(
        &self,
        _ctx: &PluginContext,
        args: &HookLoadArgs<'_>,
    ) -> impl std::future::Future<Output = HookLoadReturn> + Send {
        let id = args.id.to_string();
        let plugin = self.clone();

        async move {
            if id != VIRTUAL_ENTRY_ID {
                return Ok(None);
            }

            let code = plugin
                .generate_source()
                .context("Failed to generate multi-entry module")?;

            Ok(Some(HookLoadOutput {
                code: code.into(),
                module_type: Some(ModuleType::Js),
                ..Default::default()
            }))
        }
    }
}
