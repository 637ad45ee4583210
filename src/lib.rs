//! # solrtype
//!
//! Tooling for Solr field types: normalize field type definitions, render
//! them as `schema.xml` fragments or Schema API JSON, and derive the dynamic
//! field declarations that go with each language.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! cargo install solrtype
//! solrtype --config ./field_types xml text_en
//! solrtype --config ./field_types dynamic-fields text_en --solr-major-version 8
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use solrtype::prelude::*;
//!
//! let store = FieldTypeStore::open("./field_types").unwrap();
//! let field_type = store.require("text_en").unwrap();
//!
//! let xml = field_type.as_xml(true).unwrap();
//! for field in field_type.dynamic_fields(Some(8)).unwrap() {
//!     println!("{}", field.to_xml());
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`solrtype-core`](https://docs.rs/solrtype-core) - Field type model, JSON/XML rendering, dynamic fields
//! - [`solrtype-storage`](https://docs.rs/solrtype-storage) - Loading field type configs from disk

// Re-export core types
pub use solrtype_core::{
    AnalysisComponent, Analyzer, AnalyzerKind, FieldTypeDefinition,
    SolrFieldType, SolrFieldTypeBuilder, Variant,
    DynamicField, derive_dynamic_fields,
    available_custom_codes, available_domains,
    Error, Result,
};

// Re-export storage
pub use solrtype_storage::{FieldTypeConfig, FieldTypeStore};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnalysisComponent, Analyzer, AnalyzerKind, FieldTypeDefinition,
        SolrFieldType, SolrFieldTypeBuilder, Variant,
        DynamicField,
        Error, Result,
        FieldTypeConfig, FieldTypeStore,
    };
}

/// Name encoding and output helpers
pub mod format {
    pub use solrtype_core::{build_xml, decode_solr_name, encode_solr_name, to_safe_json};
    pub use solrtype_core::{from_legacy_json, from_legacy_json_str, to_legacy_json};
}
