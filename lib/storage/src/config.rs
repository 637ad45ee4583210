//! Field type configuration records
//!
//! One record per field type, using the keys field type configs are exported
//! with (`field_type_language_code`, `spellcheck_field_type`, ...). The
//! definitions inside are stored in their internal shape, with an
//! `analyzers` list.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use solrtype_core::{FieldTypeDefinition, SolrFieldType, LANGUAGE_UNDEFINED};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldTypeConfig {
    pub id: String,

    #[serde(default)]
    pub label: String,

    #[serde(default)]
    pub minimum_solr_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<String>,

    #[serde(default = "default_language_code")]
    pub field_type_language_code: String,

    #[serde(default)]
    pub domains: Vec<String>,

    /// Required; checked when the record is turned into a [`SolrFieldType`]
    #[serde(default)]
    pub field_type: Option<FieldTypeDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unstemmed_field_type: Option<FieldTypeDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spellcheck_field_type: Option<FieldTypeDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collated_field_type: Option<FieldTypeDefinition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solr_configs: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_files: Option<BTreeMap<String, String>>,
}

fn default_language_code() -> String {
    LANGUAGE_UNDEFINED.to_string()
}

impl FieldTypeConfig {
    pub fn into_field_type(self) -> solrtype_core::Result<SolrFieldType> {
        let mut builder = SolrFieldType::builder()
            .id(self.id)
            .label(self.label)
            .minimum_solr_version(self.minimum_solr_version)
            .language_code(self.field_type_language_code)
            .domains(self.domains)
            .solr_configs(self.solr_configs.unwrap_or_default())
            .text_files(self.text_files.unwrap_or_default());

        if let Some(custom_code) = self.custom_code {
            builder = builder.custom_code(custom_code);
        }
        if let Some(field_type) = self.field_type {
            builder = builder.field_type(field_type);
        }
        if let Some(unstemmed) = self.unstemmed_field_type {
            builder = builder.unstemmed_field_type(unstemmed);
        }
        if let Some(spellcheck) = self.spellcheck_field_type {
            builder = builder.spellcheck_field_type(spellcheck);
        }
        if let Some(collated) = self.collated_field_type {
            builder = builder.collated_field_type(collated);
        }

        builder.build()
    }
}
