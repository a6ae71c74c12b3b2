//! Group Policy template generation for configuration policies.
//!
//! Scans a source tree for settings that declare a `policy`, validates them,
//! and writes an ADMX definition document plus one ADML presentation document
//! per language.
//!
//! # Architecture
//!
//! ```text
//! discover_sources ──> extract_policies ──> fetch_translations ──> render_documents ──> write_documents
//!  (config, ignore)     (rayon, per file)    (rayon, per language)   (policygen-render)
//! ```
//!
//! Every structural error aborts the run before anything is written; failed
//! translation fetches only degrade that language to the source strings.

pub mod config;
pub mod discover;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod product;

pub use config::PolicygenConfig;
pub use fetch::{FetchError, LanguagePackSource, TranslationSource};
pub use pipeline::{Summary, extract_policies, run};
