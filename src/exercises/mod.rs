//! Exercise reference catalog.

pub mod repo;
pub mod repo_types;
pub mod services;

pub use services::{import_catalog, ImportReport};
