//! Rolldown plugin that bundles several files as one entry
//!
//! `fob-plugin-multi-entry` synthesizes a virtual module that imports every
//! file matched by a set of paths or glob patterns, optionally re-exporting
//! their named bindings, and hands it to Rolldown as the build entry.
//!
//! ## Pipeline
//!
//! ```text
//! MultiEntryConfig → EntryListResolver → generate() → load() hook → Rolldown
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fob_plugin_multi_entry::{EntrySpec, MultiEntryConfig, MultiEntryOptions, MultiEntryPlugin};
//! use rolldown::{BundlerBuilder, BundlerOptions};
//! use rolldown_plugin::__inner::SharedPluginable;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut options = BundlerOptions::default();
//! let config = MultiEntryConfig::current(
//!     EntrySpec::include_exclude(["src/**/*.js"], ["src/**/*.test.js"]),
//!     MultiEntryOptions::new().with_exports(true),
//! );
//! let plugin: SharedPluginable = Arc::new(MultiEntryPlugin::from_config(config, &mut options)?);
//!
//! let _bundler = BundlerBuilder::default()
//!     .with_options(options)
//!     .with_plugins(vec![plugin])
//!     .build()
//!     .map_err(|_| "invalid bundler options")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod plugin;
pub mod resolver;

pub use config::{EmptyMatchPolicy, EntrySpec, MultiEntryConfig, MultiEntryOptions};
pub use error::{MultiEntryError, Result};
pub use generator::generate;
pub use plugin::{MultiEntryPlugin, VIRTUAL_ENTRY_ID, VIRTUAL_ENTRY_NAME};
pub use resolver::EntryListResolver;
