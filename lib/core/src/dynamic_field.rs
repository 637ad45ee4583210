//! Dynamic field derivation
//!
//! Every field type contributes a family of `<dynamicField>` declarations to
//! `schema.xml`. Solr resolves incoming field names against these patterns at
//! index time, so both the names and their order are load-bearing: when two
//! patterns overlap, the first declaration wins.
//!
//! ```text
//! prefix   cardinality  separator  language       declaration
//! t|to|tu  s|m          ;          und            ts_X3b_und_*   (+ ts_* fallback)
//! tc<code> s|m          ;          ar             tcars_X3b_ar_*
//! ```
//!
//! - `t`: stemmed full text, `to`: same without norms, `tu`: unstemmed
//! - the language separator `;` is encoded as `_X3b_`
//! - field types for the undefined language also declare a fallback without
//!   the language segment, used for languages without a dedicated field type

use crate::encoding::{encode_solr_name, LANGUAGE_SEPARATOR};
use crate::field_type::SolrFieldType;
use crate::xml::build_xml;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// A `<dynamicField>` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub stored: bool,
    pub indexed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_valued: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_vectors: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub omit_norms: Option<bool>,
    /// Only declared for sort fields on Solr 5 and later
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_values: Option<bool>,
}

impl DynamicField {
    /// Attributes in declaration order, absent flags omitted
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map.insert("type".to_string(), Value::String(self.field_type.clone()));
        map.insert("stored".to_string(), Value::Bool(self.stored));
        map.insert("indexed".to_string(), Value::Bool(self.indexed));
        let flags = [
            ("multiValued", self.multi_valued),
            ("termVectors", self.term_vectors),
            ("omitNorms", self.omit_norms),
            ("docValues", self.doc_values),
        ];
        for (key, flag) in flags {
            if let Some(flag) = flag {
                map.insert(key.to_string(), Value::Bool(flag));
            }
        }
        Value::Object(map)
    }

    /// The declaration as a `<dynamicField .../>` element
    pub fn to_xml(&self) -> String {
        build_xml("dynamicField", &self.to_value())
    }

    fn with_name(&self, name: String) -> Self {
        Self { name, ..self.clone() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cardinality {
    Single,
    Multi,
}

impl Cardinality {
    const ALL: [Cardinality; 2] = [Cardinality::Single, Cardinality::Multi];

    fn tag(&self) -> &'static str {
        match self {
            Cardinality::Single => "s",
            Cardinality::Multi => "m",
        }
    }
}

/// Full-text prefixes without cardinality: stemmed, omit-norms, unstemmed
fn text_prefixes(custom_code: Option<&str>) -> [String; 3] {
    match custom_code {
        Some(code) => [format!("tc{}", code), format!("toc{}", code), format!("tuc{}", code)],
        None => ["t".to_string(), "to".to_string(), "tu".to_string()],
    }
}

/// Derive all dynamic field declarations of a field type.
///
/// Absent variants suppress their group. `docValues` is only declared on sort
/// fields when the Solr major version is known to be 5 or later. Fails if the
/// base field type or a present variant has no name.
pub fn derive_dynamic_fields(field_type: &SolrFieldType, solr_major_version: Option<u32>) -> Result<Vec<DynamicField>> {
    let language = field_type.language_code();
    let with_fallback = field_type.is_language_undefined();
    let base_name = field_type.name()?;
    let unstemmed_name = field_type
        .unstemmed_field_type()
        .map(|d| d.require_name("unstemmed_field_type.name"))
        .transpose()?;
    let spellcheck_name = field_type
        .spellcheck_field_type()
        .map(|d| d.require_name("spellcheck_field_type.name"))
        .transpose()?;
    let collated_name = field_type
        .collated_field_type()
        .map(|d| d.require_name("collated_field_type.name"))
        .transpose()?;

    let mut fields = Vec::with_capacity(16);

    for prefix in text_prefixes(field_type.custom_code()) {
        for cardinality in Cardinality::ALL {
            let prefix = format!("{}{}", prefix, cardinality.tag());
            let type_name = match unstemmed_name {
                Some(name) if prefix.starts_with("tu") => name,
                _ => base_name,
            };

            let field = DynamicField {
                name: format!(
                    "{}*",
                    encode_solr_name(&format!("{}{}{}_", prefix, LANGUAGE_SEPARATOR, language))
                ),
                field_type: type_name.to_string(),
                stored: true,
                indexed: true,
                multi_valued: Some(cardinality == Cardinality::Multi),
                term_vectors: Some(true),
                omit_norms: Some(prefix.starts_with("to")),
                doc_values: None,
            };

            let fallback = with_fallback.then(|| field.with_name(format!("{}_*", encode_solr_name(&prefix))));
            fields.push(field);
            fields.extend(fallback);
        }
    }

    if let Some(field) = spellcheck_name.map(|name| spellcheck_field(name, language)) {
        let fallback = with_fallback.then(|| field.with_name("spellcheck_*".to_string()));
        fields.push(field);
        fields.extend(fallback);
    }

    if let Some(field) = collated_name.map(|name| collated_field(name, language, solr_major_version)) {
        let fallback = with_fallback.then(|| field.with_name("sort_*".to_string()));
        fields.push(field);
        fields.extend(fallback);
    }

    debug!(
        field_type = %base_name,
        language,
        count = fields.len(),
        "derived dynamic fields"
    );

    Ok(fields)
}

/// Spellcheck fields are dynamic to get a language fallback (`de-at` → `de`).
///
/// The name has no language separator since solrconfig.xml refers to
/// it verbatim. It ends with `*`, not `_*`, because no field name is ever
/// appended.
fn spellcheck_field(type_name: &str, language: &str) -> DynamicField {
    DynamicField {
        name: format!("spellcheck_{}*", language),
        field_type: type_name.to_string(),
        stored: true,
        indexed: true,
        multi_valued: Some(true),
        term_vectors: Some(true),
        omit_norms: Some(true),
        doc_values: None,
    }
}

/// Sort field backed by the collated variant.
fn collated_field(type_name: &str, language: &str, solr_major_version: Option<u32>) -> DynamicField {
    let name = encode_solr_name(&format!("sort{}{}", LANGUAGE_SEPARATOR, language));
    DynamicField {
        name: format!("{}_*", name),
        field_type: type_name.to_string(),
        stored: false,
        indexed: true,
        multi_valued: None,
        term_vectors: None,
        omit_norms: None,
        // Solr 3 and 4 need the sort field indexed and without docValues.
        doc_values: solr_major_version.filter(|v| *v >= 5).map(|_| false),
    }
}
