//! Core Module - Document Loading & Catalog Views

pub mod catalog;
pub mod loader;

pub use catalog::DocCatalog;
pub use loader::{load_docs, DocumentMap};
