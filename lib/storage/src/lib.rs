//! # solrtype Storage
//!
//! Loads field type configurations from disk and writes the auxiliary text
//! files (stopwords, synonyms, ...) they ship with.

pub mod config;
pub mod error;
pub mod store;

pub use config::FieldTypeConfig;
pub use error::{Error, Result};
pub use store::FieldTypeStore;
