//! Field type definitions
//!
//! The normalized, internal representation of a Solr field type: a name,
//! passthrough attributes and an ordered list of analyzer stages. Serializing
//! these types with serde yields the internal JSON shape
//! (`{"name": .., "class": .., "analyzers": [..]}`), which is also the shape
//! the XML builder renders from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Filter classes with this prefix are backed by Solr's managed resources.
pub const MANAGED_CLASS_PREFIX: &str = "solr.Managed";

/// A named description of how Solr tokenizes and indexes text for one field type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldTypeDefinition {
    pub name: String,

    /// Everything Solr accepts on `<fieldType>` besides the name, in the order
    /// it was configured (`class`, `positionIncrementGap`, similarity, ...)
    #[serde(flatten)]
    pub attributes: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub analyzers: Vec<Analyzer>,
}

impl FieldTypeDefinition {
    pub fn new(name: impl Into<String>, class: impl Into<String>) -> Self {
        let mut attributes = Map::new();
        attributes.insert("class".to_string(), Value::String(class.into()));
        Self {
            name: name.into(),
            attributes,
            analyzers: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzers.push(analyzer);
        self
    }

    pub fn class(&self) -> Option<&str> {
        self.attributes.get("class").and_then(Value::as_str)
    }

    /// First analyzer stage of the given kind
    pub fn analyzer(&self, kind: AnalyzerKind) -> Option<&Analyzer> {
        self.analyzers.iter().find(|a| a.kind == kind)
    }

    /// True if any filter of any stage is a managed resource filter
    /// (managed stopwords, managed synonyms, ...)
    pub fn uses_managed_resources(&self) -> bool {
        self.analyzers
            .iter()
            .flat_map(|a| a.filters.iter())
            .any(|f| f.class.starts_with(MANAGED_CLASS_PREFIX))
    }

    /// The name, or [`MissingField`](crate::Error::MissingField) if it is
    /// empty. Unnamed definitions never reach a schema.
    pub fn require_name(&self, field: &'static str) -> crate::Result<&str> {
        if self.name.is_empty() {
            return Err(crate::Error::missing(field));
        }
        Ok(&self.name)
    }

    /// Internal JSON shape as a [`Value`]
    pub fn to_value(&self) -> crate::Result<Value> {
        serde_json::to_value(self).map_err(|e| crate::Error::Encode(e.to_string()))
    }
}

/// When an analyzer stage applies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    Index,
    Query,
    MultiTerm,
    /// Unqualified analyzer used for both indexing and querying
    #[default]
    Plain,
}

impl AnalyzerKind {
    pub const ALL: [AnalyzerKind; 4] = [
        AnalyzerKind::Index,
        AnalyzerKind::Query,
        AnalyzerKind::MultiTerm,
        AnalyzerKind::Plain,
    ];

    pub fn is_plain(&self) -> bool {
        matches!(self, AnalyzerKind::Plain)
    }

    /// Key holding a stage of this kind in Solr's JSON field type format
    pub fn legacy_key(&self) -> &'static str {
        match self {
            AnalyzerKind::Index => "indexAnalyzer",
            AnalyzerKind::Query => "queryAnalyzer",
            AnalyzerKind::MultiTerm => "multiTermAnalyzer",
            AnalyzerKind::Plain => "analyzer",
        }
    }

    pub fn from_legacy_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.legacy_key() == key)
    }
}

/// One stage of a field type's processing pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Analyzer {
    #[serde(rename = "type", default, skip_serializing_if = "AnalyzerKind::is_plain")]
    pub kind: AnalyzerKind,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,

    #[serde(rename = "charFilters", default, skip_serializing_if = "Vec::is_empty")]
    pub char_filters: Vec<AnalysisComponent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenizer: Option<AnalysisComponent>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<AnalysisComponent>,
}

impl Analyzer {
    pub fn new(kind: AnalyzerKind, tokenizer: AnalysisComponent) -> Self {
        Self {
            kind,
            tokenizer: Some(tokenizer),
            ..Default::default()
        }
    }

    pub fn with_char_filter(mut self, char_filter: AnalysisComponent) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    pub fn with_filter(mut self, filter: AnalysisComponent) -> Self {
        self.filters.push(filter);
        self
    }
}

/// A tokenizer, filter or char filter: a factory class plus its arguments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisComponent {
    pub class: String,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl AnalysisComponent {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            attributes: Map::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
