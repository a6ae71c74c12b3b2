//! Configuration policies declared in TypeScript sources.
//!
//! Settings registered through `registerConfiguration({ properties: { ... } })`
//! may carry a nested `policy` object. [`PolicyExtractor`] finds those sites,
//! validates them strictly, and builds [`Policy`] values whose categories are
//! shared through a [`CategoryRegistry`].
//!
//! ```text
//! file text ──> PolicyExtractor::declarations ──> PolicyDeclaration ──┐
//!              (parallel, no shared state)                            │
//!                                    CategoryRegistry <── into_policy ┘
//!                                                          │
//!                                               PolicySet::new (unique names and category keys)
//! ```

mod error;
mod extract;
mod model;
mod registry;
mod set;

pub use error::PolicyError;
pub use extract::{PolicyDeclaration, PolicyExtractor};
pub use model::{Category, Policy, PolicyKind, StringEnumPolicy};
pub use policygen_syntax::LocalizedString;
pub use registry::CategoryRegistry;
pub use set::PolicySet;
