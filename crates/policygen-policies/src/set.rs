use crate::{Category, CategoryRegistry, Policy, PolicyError};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// All policies of one run together with their categories.
///
/// Policy names and category keys are unique within a set; rendered
/// identifiers are built from them and would otherwise collide.
#[derive(Debug, Serialize)]
pub struct PolicySet {
    policies: Vec<Policy>,
    categories: Vec<Arc<Category>>,
}

impl PolicySet {
    pub fn new(policies: Vec<Policy>, registry: CategoryRegistry) -> Result<Self, PolicyError> {
        let mut modules: HashMap<&str, &str> = HashMap::new();
        for policy in &policies {
            if let Some(first) = modules.insert(&policy.name, &policy.module_name) {
                return Err(PolicyError::DuplicateName {
                    name: policy.name.clone(),
                    first: first.to_string(),
                    second: policy.module_name.clone(),
                });
            }
        }

        let categories = registry.into_categories();
        let mut labels: HashMap<&str, &str> = HashMap::new();
        for category in &categories {
            if let Some(first) = labels.insert(&category.name.key, &category.name.value) {
                return Err(PolicyError::DuplicateCategoryKey {
                    key: category.name.key.clone(),
                    first: first.to_string(),
                    second: category.name.value.clone(),
                    module: category.module_name.clone(),
                });
            }
        }

        Ok(Self {
            policies,
            categories,
        })
    }

    /// Policies in discovery order.
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> &[Arc<Category>] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
