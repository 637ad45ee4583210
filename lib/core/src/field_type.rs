//! The Solr field type entity
//!
//! A [`SolrFieldType`] bundles the base field type definition with its
//! optional spellcheck, unstemmed and collated variants plus the metadata
//! needed to generate schema artifacts: custom code, language, content
//! domains, minimum Solr version, solrconfig snippets and auxiliary text
//! files (stopwords, synonyms, ...).
//!
//! Entities are created through [`SolrFieldTypeBuilder`], which refuses to
//! finish without a base field type.

use crate::dynamic_field::{derive_dynamic_fields, DynamicField};
use crate::json::to_safe_json;
use crate::legacy::{from_legacy_json_str, to_legacy_json};
use crate::model::FieldTypeDefinition;
use crate::xml::{build_xml, singular};
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Language code of field types that apply to any language.
pub const LANGUAGE_UNDEFINED: &str = "und";

/// Domain reported for field types without explicit domains.
pub const DEFAULT_DOMAIN: &str = "generic";

/// Which of the four definitions of an entity to work with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Base,
    Spellcheck,
    Unstemmed,
    Collated,
}

impl Variant {
    /// Key of the variant's name in error reports
    fn name_field(&self) -> &'static str {
        match self {
            Variant::Base => "field_type.name",
            Variant::Spellcheck => "spellcheck_field_type.name",
            Variant::Unstemmed => "unstemmed_field_type.name",
            Variant::Collated => "collated_field_type.name",
        }
    }

    /// Qualifier appended to the label in generated XML comments
    fn comment_qualifier(&self) -> &'static str {
        match self {
            Variant::Base => "",
            Variant::Spellcheck => " spellcheck",
            Variant::Unstemmed => " unstemmed",
            Variant::Collated => " collated",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolrFieldType {
    id: String,
    label: String,
    minimum_solr_version: String,
    custom_code: Option<String>,
    language_code: String,
    domains: Vec<String>,
    field_type: FieldTypeDefinition,
    spellcheck_field_type: Option<FieldTypeDefinition>,
    unstemmed_field_type: Option<FieldTypeDefinition>,
    collated_field_type: Option<FieldTypeDefinition>,
    solr_configs: Map<String, Value>,
    text_files: BTreeMap<String, String>,
}

impl SolrFieldType {
    pub fn builder() -> SolrFieldTypeBuilder {
        SolrFieldTypeBuilder::default()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn minimum_solr_version(&self) -> &str {
        &self.minimum_solr_version
    }

    pub fn custom_code(&self) -> Option<&str> {
        self.custom_code.as_deref().filter(|code| !code.is_empty())
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn is_language_undefined(&self) -> bool {
        self.language_code == LANGUAGE_UNDEFINED
    }

    /// Content domains, `["generic"]` if none are configured
    pub fn domains(&self) -> Vec<&str> {
        if self.domains.is_empty() {
            vec![DEFAULT_DOMAIN]
        } else {
            self.domains.iter().map(String::as_str).collect()
        }
    }

    /// Options offered when picking a field type; these are its domains.
    pub fn options(&self) -> Vec<&str> {
        self.domains()
    }

    // ==================== Definitions ====================

    pub fn field_type(&self) -> &FieldTypeDefinition {
        &self.field_type
    }

    pub fn set_field_type(&mut self, field_type: FieldTypeDefinition) -> &mut Self {
        self.field_type = field_type;
        self
    }

    pub fn spellcheck_field_type(&self) -> Option<&FieldTypeDefinition> {
        self.spellcheck_field_type.as_ref()
    }

    pub fn set_spellcheck_field_type(&mut self, field_type: FieldTypeDefinition) -> &mut Self {
        self.spellcheck_field_type = Some(field_type);
        self
    }

    pub fn unstemmed_field_type(&self) -> Option<&FieldTypeDefinition> {
        self.unstemmed_field_type.as_ref()
    }

    pub fn set_unstemmed_field_type(&mut self, field_type: FieldTypeDefinition) -> &mut Self {
        self.unstemmed_field_type = Some(field_type);
        self
    }

    pub fn collated_field_type(&self) -> Option<&FieldTypeDefinition> {
        self.collated_field_type.as_ref()
    }

    pub fn set_collated_field_type(&mut self, field_type: FieldTypeDefinition) -> &mut Self {
        self.collated_field_type = Some(field_type);
        self
    }

    pub fn definition(&self, variant: Variant) -> Option<&FieldTypeDefinition> {
        match variant {
            Variant::Base => Some(&self.field_type),
            Variant::Spellcheck => self.spellcheck_field_type(),
            Variant::Unstemmed => self.unstemmed_field_type(),
            Variant::Collated => self.collated_field_type(),
        }
    }

    /// Name of the base field type.
    ///
    /// Schema generation must not continue with an unnamed field type, so an
    /// empty name is an error rather than a default.
    pub fn name(&self) -> Result<&str> {
        self.field_type.require_name(Variant::Base.name_field())
    }

    /// Name of the base field type, empty if it has none
    pub fn field_type_name(&self) -> &str {
        &self.field_type.name
    }

    // ==================== JSON ====================

    /// The base field type in Solr's JSON format
    /// (`indexAnalyzer`/`queryAnalyzer`/...).
    pub fn field_type_as_json(&self, pretty: bool) -> Result<String> {
        self.name()?;
        to_safe_json(&to_legacy_json(&self.field_type)?, pretty)
    }

    /// Replace the base field type from Solr's JSON format.
    pub fn set_field_type_as_json(&mut self, json: &str) -> Result<&mut Self> {
        let field_type = from_legacy_json_str(json)?;
        Ok(self.set_field_type(field_type))
    }

    pub fn spellcheck_field_type_as_json(&self, pretty: bool) -> Result<String> {
        self.variant_as_json(Variant::Spellcheck, pretty)
    }

    pub fn set_spellcheck_field_type_as_json(&mut self, json: &str) -> Result<&mut Self> {
        let field_type = serde_json::from_str(json)?;
        Ok(self.set_spellcheck_field_type(field_type))
    }

    pub fn unstemmed_field_type_as_json(&self, pretty: bool) -> Result<String> {
        self.variant_as_json(Variant::Unstemmed, pretty)
    }

    pub fn set_unstemmed_field_type_as_json(&mut self, json: &str) -> Result<&mut Self> {
        let field_type = serde_json::from_str(json)?;
        Ok(self.set_unstemmed_field_type(field_type))
    }

    pub fn collated_field_type_as_json(&self, pretty: bool) -> Result<String> {
        self.variant_as_json(Variant::Collated, pretty)
    }

    pub fn set_collated_field_type_as_json(&mut self, json: &str) -> Result<&mut Self> {
        let field_type = serde_json::from_str(json)?;
        Ok(self.set_collated_field_type(field_type))
    }

    // ==================== XML ====================

    /// The base field type as a `<fieldType>` fragment
    pub fn as_xml(&self, add_comment: bool) -> Result<String> {
        self.variant_as_xml(Variant::Base, add_comment)
    }

    pub fn spellcheck_field_type_as_xml(&self, add_comment: bool) -> Result<String> {
        self.variant_as_xml(Variant::Spellcheck, add_comment)
    }

    pub fn unstemmed_field_type_as_xml(&self, add_comment: bool) -> Result<String> {
        self.variant_as_xml(Variant::Unstemmed, add_comment)
    }

    pub fn collated_field_type_as_xml(&self, add_comment: bool) -> Result<String> {
        self.variant_as_xml(Variant::Collated, add_comment)
    }

    /// `<fieldType>` fragment for one variant, empty if the variant is unset
    pub fn variant_as_xml(&self, variant: Variant, add_comment: bool) -> Result<String> {
        let Some(definition) = self.definition(variant) else {
            return Ok(String::new());
        };
        definition.require_name(variant.name_field())?;

        let xml = build_xml("fieldType", &definition.to_value()?);
        if add_comment {
            Ok(self.comment(variant.comment_qualifier()) + &xml)
        } else {
            Ok(xml)
        }
    }

    fn comment(&self, qualifier: &str) -> String {
        format!(
            "<!--\n  {}{}\n  {}\n-->\n",
            self.label, qualifier, self.minimum_solr_version
        )
    }

    // ==================== solrconfig.xml and text files ====================

    pub fn solr_configs(&self) -> &Map<String, Value> {
        &self.solr_configs
    }

    /// Render the solrconfig snippets, one group after the other.
    ///
    /// A group holding a list (`searchComponents`) yields one element per
    /// entry (`<searchComponent>`); any other group yields one element named
    /// after the group.
    pub fn solr_configs_as_xml(&self, add_comment: bool) -> String {
        if self.solr_configs.is_empty() {
            return String::new();
        }

        let mut xml = String::new();
        if add_comment {
            xml.push_str(&self.comment(""));
        }
        for (group, snippets) in &self.solr_configs {
            match snippets {
                Value::Array(items) => {
                    let element = singular(group);
                    for item in items {
                        xml.push_str(&build_xml(element, item));
                    }
                }
                other => xml.push_str(&build_xml(group, other)),
            }
        }
        xml
    }

    /// Auxiliary text files keyed by file name (`stopwords_de.txt`, ...)
    pub fn text_files(&self) -> &BTreeMap<String, String> {
        &self.text_files
    }

    // ==================== Schema ====================

    /// Dynamic field declarations for `schema.xml`
    pub fn dynamic_fields(&self, solr_major_version: Option<u32>) -> Result<Vec<DynamicField>> {
        derive_dynamic_fields(self, solr_major_version)
    }

    /// Whether the base field type relies on managed resources, which only
    /// work with a managed schema.
    pub fn requires_managed_schema(&self) -> bool {
        self.field_type.uses_managed_resources()
    }

    /// Internal JSON shape of a variant, empty if the variant is unset
    fn variant_as_json(&self, variant: Variant, pretty: bool) -> Result<String> {
        match self.definition(variant) {
            Some(definition) => {
                definition.require_name(variant.name_field())?;
                to_safe_json(definition, pretty)
            }
            None => Ok(String::new()),
        }
    }
}


/// Builder for [`SolrFieldType`]
#[derive(Debug, Default, Clone)]
pub struct SolrFieldTypeBuilder {
    id: Option<String>,
    label: String,
    minimum_solr_version: String,
    custom_code: Option<String>,
    language_code: Option<String>,
    domains: Vec<String>,
    field_type: Option<FieldTypeDefinition>,
    spellcheck_field_type: Option<FieldTypeDefinition>,
    unstemmed_field_type: Option<FieldTypeDefinition>,
    collated_field_type: Option<FieldTypeDefinition>,
    solr_configs: Map<String, Value>,
    text_files: BTreeMap<String, String>,
}

impl SolrFieldTypeBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn minimum_solr_version(mut self, version: impl Into<String>) -> Self {
        self.minimum_solr_version = version.into();
        self
    }

    pub fn custom_code(mut self, custom_code: impl Into<String>) -> Self {
        self.custom_code = Some(custom_code.into());
        self
    }

    pub fn language_code(mut self, language_code: impl Into<String>) -> Self {
        self.language_code = Some(language_code.into());
        self
    }

    pub fn domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn field_type(mut self, field_type: FieldTypeDefinition) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn spellcheck_field_type(mut self, field_type: FieldTypeDefinition) -> Self {
        self.spellcheck_field_type = Some(field_type);
        self
    }

    pub fn unstemmed_field_type(mut self, field_type: FieldTypeDefinition) -> Self {
        self.unstemmed_field_type = Some(field_type);
        self
    }

    pub fn collated_field_type(mut self, field_type: FieldTypeDefinition) -> Self {
        self.collated_field_type = Some(field_type);
        self
    }

    pub fn solr_configs(mut self, solr_configs: Map<String, Value>) -> Self {
        self.solr_configs = solr_configs;
        self
    }

    pub fn text_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.text_files.insert(name.into(), content.into());
        self
    }

    pub fn text_files(mut self, text_files: BTreeMap<String, String>) -> Self {
        self.text_files = text_files;
        self
    }

    /// Finish the entity. The id defaults to the base field type's name and
    /// the language to [`LANGUAGE_UNDEFINED`].
    pub fn build(self) -> Result<SolrFieldType> {
        let field_type = self.field_type.ok_or_else(|| Error::missing("field_type"))?;
        field_type.require_name(Variant::Base.name_field())?;
        let id = self.id.unwrap_or_else(|| field_type.name.clone());

        Ok(SolrFieldType {
            id,
            label: self.label,
            minimum_solr_version: self.minimum_solr_version,
            custom_code: self.custom_code,
            language_code: self.language_code.unwrap_or_else(|| LANGUAGE_UNDEFINED.to_string()),
            domains: self.domains,
            field_type,
            spellcheck_field_type: self.spellcheck_field_type,
            unstemmed_field_type: self.unstemmed_field_type,
            collated_field_type: self.collated_field_type,
            solr_configs: self.solr_configs,
            text_files: self.text_files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnalysisComponent, Analyzer, AnalyzerKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn text_de() -> FieldTypeDefinition {
        FieldTypeDefinition::new("text_de", "solr.TextField")
            .with_attribute("positionIncrementGap", 100)
            .with_analyzer(
                Analyzer::new(AnalyzerKind::Index, AnalysisComponent::new("solr.WhitespaceTokenizerFactory"))
                    .with_filter(AnalysisComponent::new("solr.LowerCaseFilterFactory")),
            )
            .with_analyzer(
                Analyzer::new(AnalyzerKind::Query, AnalysisComponent::new("solr.WhitespaceTokenizerFactory"))
                    .with_filter(AnalysisComponent::new("solr.StopFilterFactory").with("words", "stopwords_de.txt")),
            )
    }

    fn german() -> SolrFieldType {
        SolrFieldType::builder()
            .id("text_de_7_0_0")
            .label("German Text Field")
            .minimum_solr_version("7.0.0")
            .language_code("de")
            .field_type(text_de())
            .spellcheck_field_type(FieldTypeDefinition::new("text_spell_de", "solr.TextField"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_field_type() {
        let result = SolrFieldType::builder().label("nothing").build();
        assert!(matches!(result, Err(Error::MissingField { field: "field_type" })));
    }

    #[test]
    fn test_builder_defaults() {
        let field_type = SolrFieldType::builder().field_type(text_de()).build().unwrap();
        assert_eq!(field_type.id(), "text_de");
        assert_eq!(field_type.language_code(), LANGUAGE_UNDEFINED);
        assert!(field_type.is_language_undefined());
        assert_eq!(field_type.custom_code(), None);
    }

    #[test]
    fn test_empty_custom_code_is_unset() {
        let field_type = SolrFieldType::builder().field_type(text_de()).custom_code("").build().unwrap();
        assert_eq!(field_type.custom_code(), None);
    }

    #[test]
    fn test_name() {
        let mut field_type = german();
        assert_eq!(field_type.name().unwrap(), "text_de");

        field_type.set_field_type(FieldTypeDefinition::new("", "solr.TextField"));
        assert!(matches!(field_type.name(), Err(Error::MissingField { .. })));
        assert_eq!(field_type.field_type_name(), "");
    }

    #[test]
    fn test_builder_rejects_unnamed_field_type() {
        let result = SolrFieldType::builder()
            .field_type(FieldTypeDefinition::new("", "solr.TextField"))
            .build();
        assert!(matches!(result, Err(Error::MissingField { field: "field_type.name" })));
    }

    #[test]
    fn test_unnamed_definitions_are_not_rendered() {
        let mut field_type = german();
        field_type.set_spellcheck_field_type(FieldTypeDefinition::new("", "solr.TextField"));
        assert!(matches!(
            field_type.spellcheck_field_type_as_xml(false),
            Err(Error::MissingField { field: "spellcheck_field_type.name" })
        ));
        assert!(matches!(field_type.spellcheck_field_type_as_json(false), Err(Error::MissingField { .. })));
        assert!(field_type.dynamic_fields(None).is_err());

        let mut field_type = german();
        field_type.set_field_type(FieldTypeDefinition::new("", "solr.TextField"));
        assert!(matches!(field_type.as_xml(false), Err(Error::MissingField { field: "field_type.name" })));
        assert!(matches!(field_type.field_type_as_json(false), Err(Error::MissingField { .. })));
        assert!(matches!(field_type.dynamic_fields(Some(8)), Err(Error::MissingField { .. })));
    }

    #[test]
    fn test_domains() {
        assert_eq!(german().domains(), vec!["generic"]);

        let field_type = SolrFieldType::builder()
            .field_type(text_de())
            .domains(["news", "generic"])
            .build()
            .unwrap();
        assert_eq!(field_type.domains(), vec!["news", "generic"]);
        assert_eq!(field_type.options(), field_type.domains());
    }

    #[test]
    fn test_field_type_as_json() {
        let json = german().field_type_as_json(false).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "text_de");
        assert!(value.get("analyzers").is_none());
        assert_eq!(value["queryAnalyzer"]["filters"][0]["words"], "stopwords_de.txt");
        assert!(value["indexAnalyzer"].get("type").is_none());
    }

    #[test]
    fn test_pretty_json_is_multiline() {
        let json = german().field_type_as_json(true).unwrap();
        assert!(json.lines().count() > 1);
        assert!(json.contains("\n    \"name\": \"text_de\""));
    }

    #[test]
    fn test_set_field_type_as_json_round_trip() {
        let mut field_type = german();
        let json = field_type.field_type_as_json(true).unwrap();
        field_type.set_field_type_as_json(&json).unwrap();
        assert_eq!(field_type.field_type(), &text_de());
    }

    #[test]
    fn test_decode_error_leaves_entity_untouched() {
        let mut field_type = german();
        let before = field_type.clone();
        assert!(matches!(field_type.set_field_type_as_json("{not json"), Err(Error::Decode(_))));
        assert!(matches!(field_type.set_collated_field_type_as_json("[1, 2]"), Err(Error::Decode(_))));
        assert_eq!(field_type, before);
    }

    #[test]
    fn test_variant_json() {
        let mut field_type = german();
        assert_eq!(field_type.collated_field_type_as_json(false).unwrap(), "");
        assert_eq!(
            field_type.spellcheck_field_type_as_json(false).unwrap(),
            r#"{"name":"text_spell_de","class":"solr.TextField"}"#
        );

        field_type
            .set_collated_field_type_as_json(
                r#"{"name":"collated_de","class":"solr.ICUCollationField","locale":"de","strength":"primary"}"#,
            )
            .unwrap();
        let collated = field_type.collated_field_type().unwrap();
        assert_eq!(collated.name, "collated_de");
        assert_eq!(collated.attributes["strength"], json!("primary"));
    }

    #[test]
    fn test_as_xml_with_comment() {
        let expected = r#"<!--
  German Text Field
  7.0.0
-->
<fieldType name="text_de" class="solr.TextField" positionIncrementGap="100">
  <analyzer type="index">
    <tokenizer class="solr.WhitespaceTokenizerFactory"/>
    <filter class="solr.LowerCaseFilterFactory"/>
  </analyzer>
  <analyzer type="query">
    <tokenizer class="solr.WhitespaceTokenizerFactory"/>
    <filter class="solr.StopFilterFactory" words="stopwords_de.txt"/>
  </analyzer>
</fieldType>
"#;
        assert_eq!(german().as_xml(true).unwrap(), expected);
        assert!(german().as_xml(false).unwrap().starts_with("<fieldType"));
    }

    #[test]
    fn test_variant_xml() {
        let field_type = german();
        assert_eq!(
            field_type.spellcheck_field_type_as_xml(true).unwrap(),
            "<!--\n  German Text Field spellcheck\n  7.0.0\n-->\n<fieldType name=\"text_spell_de\" class=\"solr.TextField\"/>\n"
        );
        assert_eq!(field_type.collated_field_type_as_xml(true).unwrap(), "");
        assert_eq!(field_type.unstemmed_field_type_as_xml(false).unwrap(), "");
    }

    #[test]
    fn test_requires_managed_schema() {
        assert!(!german().requires_managed_schema());

        let mut field_type = german();
        field_type.set_field_type(
            FieldTypeDefinition::new("text_managed", "solr.TextField").with_analyzer(
                Analyzer::new(AnalyzerKind::Plain, AnalysisComponent::new("solr.StandardTokenizerFactory"))
                    .with_filter(AnalysisComponent::new("solr.ManagedStopFilterFactory").with("managed", "en")),
            ),
        );
        assert!(field_type.requires_managed_schema());

        field_type.set_field_type(FieldTypeDefinition::new("string", "solr.StrField"));
        assert!(!field_type.requires_managed_schema());
    }

    #[test]
    fn test_solr_configs_as_xml() {
        let configs = json!({
            "searchComponents": [
                {"name": "suggest", "class": "solr.SuggestComponent"}
            ]
        });
        let field_type = SolrFieldType::builder()
            .label("German Text Field")
            .minimum_solr_version("7.0.0")
            .field_type(text_de())
            .solr_configs(configs.as_object().cloned().unwrap())
            .build()
            .unwrap();

        assert_eq!(
            field_type.solr_configs_as_xml(false),
            "<searchComponent name=\"suggest\" class=\"solr.SuggestComponent\"/>\n"
        );
        assert!(field_type.solr_configs_as_xml(true).starts_with("<!--\n  German Text Field\n"));
        assert_eq!(german().solr_configs_as_xml(true), "");
    }

    #[test]
    fn test_text_files() {
        let field_type = SolrFieldType::builder()
            .field_type(text_de())
            .text_file("stopwords_de.txt", "und\noder\n")
            .build()
            .unwrap();
        assert_eq!(field_type.text_files()["stopwords_de.txt"], "und\noder\n");
    }
}
