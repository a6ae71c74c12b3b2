//! Writing rendered documents to disk.

use policygen_policies::PolicySet;
use policygen_render::RenderedDocuments;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize policies: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `<out>/<key>.admx` and `<out>/<locale>/<key>.adml` for every
/// language. Returns the written paths in order.
pub fn write_documents(
    out_dir: &Path,
    registry_key: &str,
    documents: &RenderedDocuments,
) -> Result<Vec<PathBuf>, OutputError> {
    let mut written = Vec::new();

    let admx = out_dir.join(format!("{registry_key}.admx"));
    write_file(&admx, &documents.admx)?;
    written.push(admx);

    for document in &documents.adml {
        let adml = out_dir
            .join(&document.locale)
            .join(format!("{registry_key}.adml"));
        write_file(&adml, &document.body)?;
        written.push(adml);
    }

    Ok(written)
}

/// Dump the extracted policies as pretty JSON.
pub fn write_json(path: &Path, set: &PolicySet) -> Result<(), OutputError> {
    let mut json = serde_json::to_string_pretty(set)?;
    json.push('\n');
    write_file(path, &json)
}

fn write_file(path: &Path, contents: &str) -> Result<(), OutputError> {
    let result = match path.parent() {
        Some(parent) => std::fs::create_dir_all(parent),
        None => Ok(()),
    }
    .and_then(|()| std::fs::write(path, contents));

    result.map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "wrote");
    Ok(())
}
