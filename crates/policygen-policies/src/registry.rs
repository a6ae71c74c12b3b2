use crate::Category;
use policygen_syntax::LocalizedString;
use std::collections::HashMap;
use std::sync::Arc;

/// Deduplicates categories by localized name for one extraction run.
///
/// Categories are kept in first-seen order so rendered documents are stable.
#[derive(Debug, Default)]
pub struct CategoryRegistry {
    categories: Vec<Arc<Category>>,
    index: HashMap<(String, String), usize>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The category named `name`, created on first use.
    pub fn get_or_create(&mut self, name: LocalizedString, module_name: &str) -> Arc<Category> {
        let identity = (name.key.clone(), name.value.clone());
        if let Some(existing) = self.index.get(&identity).and_then(|&i| self.categories.get(i)) {
            return Arc::clone(existing);
        }

        tracing::debug!(key = %name.key, module = module_name, "new category");
        let category = Arc::new(Category {
            name,
            module_name: module_name.to_string(),
        });
        self.index.insert(identity, self.categories.len());
        self.categories.push(Arc::clone(&category));
        category
    }

    pub fn categories(&self) -> &[Arc<Category>] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn into_categories(self) -> Vec<Arc<Category>> {
        self.categories
    }
}
