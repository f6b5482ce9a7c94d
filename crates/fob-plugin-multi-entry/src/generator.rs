//! Virtual module source generation

use std::fmt::Write;
use std::path::Path;

/// Build the source text of the combined entry module
///
/// Every file gets a side-effect import. With `exports` enabled, a
/// `export * from` statement follows each import so the named bindings of
/// every file are re-exported under their original names. Conflicting names
/// are left for the bundler to report.
///
/// # Example
///
/// ```rust
/// use fob_plugin_multi_entry::generate;
///
/// let code = generate(&["/src/a.js"], true);
/// assert_eq!(code, "import \"/src/a.js\";\nexport * from \"/src/a.js\";\n");
/// ```
pub fn generate<P: AsRef<Path>>(files: &[P], exports: bool) -> String {
    let mut code = String::new();

    for file in files {
        let specifier = js_string(file.as_ref());
        // Writing into a String cannot fail
        let _ = writeln!(code, "import {specifier};");
        if exports {
            let _ = writeln!(code, "export * from {specifier};");
        }
    }

    tracing::debug!(files = files.len(), exports, "generated multi-entry module");
    code
}

/// Quote a path as a JavaScript string literal
fn js_string(path: &Path) -> String {
    let path = path.to_string_lossy();
    // JSON string syntax is a subset of JavaScript string literal syntax
    serde_json::to_string(path.as_ref()).unwrap_or_else(|_| format!("\"{path}\""))
}
