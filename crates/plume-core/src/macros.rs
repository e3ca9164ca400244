//! Project macro collection.
//!
//! Macros are plain Jinja SQL files under the manifest's macro-paths.
//! Their concatenated text is prepended to every cell before rendering,
//! so cell templates can call project macros directly.

use crate::error::{CoreError, CoreResult};
use crate::manifest::ProjectManifest;
use crate::registry::{dir_entry_paths, file_extension};
use std::path::Path;

/// Concatenate every `.sql` file under the project's macro-paths, in
/// traversal order.
pub fn collect_macro_sql(project_root: &Path, manifest: &ProjectManifest) -> CoreResult<String> {
    let mut out = String::new();
    for macro_path in &manifest.macro_paths {
        let root = project_root.join(macro_path);
        if !root.exists() {
            continue;
        }
        append_macros(&root, &mut out)?;
    }
    Ok(out)
}

fn append_macros(dir: &Path, out: &mut String) -> CoreResult<()> {
    for path in dir_entry_paths(dir)? {
        if path.is_dir() {
            append_macros(&path, out)?;
            continue;
        }
        if file_extension(&path) != "sql" {
            continue;
        }
        let content = std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        out.push_str(&content);
        out.push('\n');
    }
    Ok(())
}
