//! # solrtype Core
//!
//! Core library for generating Solr schema artifacts from field type
//! configurations.
//!
//! This crate provides:
//!
//! - [`FieldTypeDefinition`] - Normalized field type with typed analyzer stages
//! - [`SolrFieldType`] - A field type with its spellcheck, unstemmed and collated variants
//! - [`to_legacy_json`] / [`from_legacy_json`] - Solr's JSON field type format
//! - [`build_xml`] - `schema.xml` / `solrconfig.xml` fragments
//! - [`DynamicField`] - Derived dynamic field declarations
//! - [`encode_solr_name`] - Solr-safe field names
//!
//! ## Example
//!
//! ```rust
//! use solrtype_core::{AnalysisComponent, Analyzer, AnalyzerKind, FieldTypeDefinition, SolrFieldType};
//!
//! let text_en = FieldTypeDefinition::new("text_en", "solr.TextField").with_analyzer(
//!     Analyzer::new(AnalyzerKind::Plain, AnalysisComponent::new("solr.StandardTokenizerFactory"))
//!         .with_filter(AnalysisComponent::new("solr.LowerCaseFilterFactory")),
//! );
//!
//! let field_type = SolrFieldType::builder()
//!     .label("English Text Field")
//!     .minimum_solr_version("7.0.0")
//!     .language_code("en")
//!     .field_type(text_en)
//!     .build()
//!     .unwrap();
//!
//! let xml = field_type.as_xml(true).unwrap();
//! assert!(xml.contains("<fieldType name=\"text_en\" class=\"solr.TextField\">"));
//!
//! let dynamic_fields = field_type.dynamic_fields(Some(8)).unwrap();
//! assert_eq!(dynamic_fields[0].name, "ts_X3b_en_*");
//! ```

pub mod catalog;
pub mod dynamic_field;
pub mod encoding;
pub mod error;
pub mod field_type;
pub mod json;
pub mod legacy;
pub mod model;
pub mod xml;

pub use catalog::{available_custom_codes, available_domains};
pub use dynamic_field::{derive_dynamic_fields, DynamicField};
pub use encoding::{decode_solr_name, encode_solr_name, LANGUAGE_SEPARATOR};
pub use error::{Error, Result};
pub use field_type::{SolrFieldType, SolrFieldTypeBuilder, Variant, DEFAULT_DOMAIN, LANGUAGE_UNDEFINED};
pub use json::to_safe_json;
pub use legacy::{from_legacy_json, from_legacy_json_str, to_legacy_json};
pub use model::{AnalysisComponent, Analyzer, AnalyzerKind, FieldTypeDefinition, MANAGED_CLASS_PREFIX};
pub use xml::build_xml;
