//! Source file discovery.

use crate::config::DiscoveryConfig;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// A TypeScript file that registers configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path below `src/` without extension, e.g. `vs/platform/update/common/update.config.contribution`.
    pub module_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    #[error("source directory {0} does not exist")]
    MissingSourceDir(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Every `.ts` file under the source subtree containing the marker text,
/// sorted by path.
pub fn discover_sources(
    root: &Path,
    config: &DiscoveryConfig,
) -> Result<Vec<SourceFile>, DiscoverError> {
    let source_root = root.join(config.source_dir());
    if !source_root.is_dir() {
        return Err(DiscoverError::MissingSourceDir(source_root));
    }
    let module_root = source_root.parent().unwrap_or(&source_root).to_path_buf();

    let exclude = config.exclude_dirs();
    let walker = WalkBuilder::new(&source_root)
        .hidden(false)
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !(is_dir && exclude.iter().any(|name| entry.file_name() == name.as_str()))
        })
        .build();

    let marker = config.marker();
    let mut files = Vec::new();
    for entry in walker.flatten() {
        let path = entry.path();
        if !entry.file_type().is_some_and(|t| t.is_file()) || !is_typescript(path) {
            continue;
        }

        let text = std::fs::read_to_string(path).map_err(|source| DiscoverError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if !text.contains(marker) {
            continue;
        }

        let Some(module_name) = module_name(&module_root, path) else {
            continue;
        };
        files.push(SourceFile {
            path: path.to_path_buf(),
            module_name,
        });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(count = files.len(), root = %source_root.display(), "discovered sources");
    Ok(files)
}

fn is_typescript(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    name.ends_with(".ts") && !name.ends_with(".d.ts")
}

fn module_name(module_root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(module_root).ok()?.with_extension("");
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(parts.join("/"))
}
