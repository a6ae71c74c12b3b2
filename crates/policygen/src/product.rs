//! Product metadata from `product.json` and `package.json`.

use policygen_render::Product;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductJson {
    name_long: Option<String>,
    win32_reg_value_name: Option<String>,
    extensions_gallery: Option<ExtensionsGallery>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtensionsGallery {
    resource_url_template: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    version: String,
}

/// Everything the pipeline needs to know about the product being built.
#[derive(Debug, Clone)]
pub struct ProductInfo {
    pub product: Product,
    /// URL template for language packs; translations are skipped without it.
    pub resource_url_template: Option<String>,
    /// Language-pack version, `<major>.<minor>.0`.
    pub version: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("product.json is missing '{0}'")]
    MissingField(&'static str),
    #[error("package.json version '{0}' is not <major>.<minor>[.<patch>]")]
    Version(String),
}

/// Read `product.json` and `package.json` at the project root.
pub fn load_product(root: &Path) -> Result<ProductInfo, ProductError> {
    let product: ProductJson = read_json(&root.join("product.json"))?;
    let package: PackageJson = read_json(&root.join("package.json"))?;

    let app_name = product
        .name_long
        .ok_or(ProductError::MissingField("nameLong"))?;
    let registry_key = product
        .win32_reg_value_name
        .ok_or(ProductError::MissingField("win32RegValueName"))?;

    Ok(ProductInfo {
        product: Product {
            app_name,
            registry_key,
        },
        resource_url_template: product
            .extensions_gallery
            .and_then(|gallery| gallery.resource_url_template),
        version: language_pack_version(&package.version)?,
    })
}

/// `1.95.3` and `1.95.0-insider` both become `1.95.0`.
pub fn language_pack_version(version: &str) -> Result<String, ProductError> {
    let mut parts = version.split('.');
    match (parts.next(), parts.next()) {
        (Some(major), Some(minor)) if !major.is_empty() && !minor.is_empty() => {
            Ok(format!("{major}.{minor}.0"))
        }
        _ => Err(ProductError::Version(version.to_string())),
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, ProductError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProductError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ProductError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
