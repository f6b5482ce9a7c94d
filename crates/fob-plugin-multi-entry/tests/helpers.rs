//! Shared test utilities for fob-plugin-multi-entry tests

#![allow(dead_code)]

use fob_plugin_multi_entry::{MultiEntryConfig, MultiEntryPlugin};
use rolldown::{BundlerBuilder, BundlerOptions, InputItem, OutputFormat};
use rolldown_common::Output;
use rolldown_plugin::__inner::SharedPluginable;
use std::path::PathBuf;
use std::sync::Arc;

/// Crate root; fixture patterns are written relative to it
pub fn crate_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

pub fn fixture_path(relative: &str) -> PathBuf {
    crate_dir().join("tests").join("fixtures").join(relative)
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Bundler input items for a list of patterns, as a legacy-mode user would write them
pub fn input_items(patterns: &[&str]) -> Vec<InputItem> {
    patterns
        .iter()
        .map(|pattern| InputItem {
            name: None,
            import: pattern.to_string(),
        })
        .collect()
}

/// Run a full Rolldown build with the plugin and return the joined chunk code
pub async fn bundle(
    config: MultiEntryConfig,
    input: Option<Vec<InputItem>>,
) -> Result<String, String> {
    init_tracing();

    let mut options = BundlerOptions {
        input,
        cwd: Some(crate_dir()),
        format: Some(OutputFormat::Esm),
        ..Default::default()
    };

    let plugin = MultiEntryPlugin::from_config(config, &mut options).map_err(|e| e.to_string())?;
    let plugin: SharedPluginable = Arc::new(plugin);

    let Ok(mut bundler) = BundlerBuilder::default()
        .with_options(options)
        .with_plugins(vec![plugin])
        .build()
    else {
        return Err("invalid bundler options".to_string());
    };

    let Ok(output) = bundler.generate().await else {
        return Err("build failed".to_string());
    };

    Ok(output
        .assets
        .iter()
        .filter_map(|asset| match asset {
            Output::Chunk(chunk) => Some(chunk.code.clone()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Names listed in `export { ... }` statements of an ESM chunk
pub fn exported_names(code: &str) -> Vec<String> {
    code.lines()
        .filter_map(|line| line.trim().strip_prefix("export {"))
        .filter_map(|rest| rest.split('}').next())
        .flat_map(|names| names.split(','))
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| name.rsplit(" as ").next().unwrap_or(name).to_string())
        .collect()
}
