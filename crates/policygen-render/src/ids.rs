//! Cross-reference identifiers shared by the ADMX and ADML documents.

use policygen_policies::{Category, LocalizedString, Policy};

/// Name of the category every policy category hangs under.
pub const ROOT_CATEGORY: &str = "Application";

/// `Supported_1_80` for version `1.80`.
pub fn version_id(version: &str) -> String {
    format!("Supported_{}", version.replace('.', "_"))
}

/// Also the category's ADMX name; `PolicySet` keeps keys unique.
pub(crate) fn category_name(category: &Category) -> &str {
    &category.name.key
}

pub(crate) fn category_string_id(category: &Category) -> String {
    format!("Category_{}", category.name.key)
}

/// String id of a localized string shown by `policy`.
pub(crate) fn policy_string_id(policy: &Policy, text: &LocalizedString) -> String {
    format!("{}_{}", policy.name, text.key.replace('.', "_"))
}

/// `$(string.id)`
pub(crate) fn string_ref(id: &str) -> String {
    format!("$(string.{id})")
}

/// `$(presentation.id)`
pub(crate) fn presentation_ref(id: &str) -> String {
    format!("$(presentation.{id})")
}
