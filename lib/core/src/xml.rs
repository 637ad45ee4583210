//! XML schema fragments
//!
//! Renders structured values into the XML dialect of Solr's `schema.xml`
//! and `solrconfig.xml`:
//!
//! - scalar map entries become attributes (booleans as `true`/`false`);
//!   `null` entries are dropped
//! - `VALUE` and `CDATA` entries become the element's text
//! - list entries become repeated children named after the key without its
//!   trailing `s` (`filters` → `<filter>`)
//! - map entries become a single child named after the key
//!
//! Output is indented by two spaces per level and preserves input order, so
//! regenerating a schema yields byte-identical files.

use serde_json::{Map, Value};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Render `value` as an XML fragment rooted at `element_name`.
///
/// ```
/// use serde_json::json;
/// use solrtype_core::build_xml;
///
/// let xml = build_xml("filter", &json!({"class": "solr.LowerCaseFilterFactory"}));
/// assert_eq!(xml, "<filter class=\"solr.LowerCaseFilterFactory\"/>\n");
/// ```
pub fn build_xml(element_name: &str, value: &Value) -> String {
    let mut out = String::new();
    Element::from_value(element_name, value).write(&mut out, 0);
    out
}

#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<Text>,
    children: Vec<Element>,
}

#[derive(Debug)]
enum Text {
    Escaped(String),
    CData(String),
}

impl Element {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn from_value(name: &str, value: &Value) -> Self {
        let mut element = Self::new(name);
        match value {
            Value::Object(map) => element.fill(map),
            Value::Array(items) => {
                let child_name = singular(name);
                for item in items {
                    element.children.push(Self::from_value(child_name, item));
                }
            }
            Value::Null => {}
            scalar => element.text = Some(Text::Escaped(scalar_to_string(scalar))),
        }
        element
    }

    fn fill(&mut self, map: &Map<String, Value>) {
        for (key, value) in map {
            match value {
                Value::Object(_) => self.children.push(Self::from_value(key, value)),
                Value::Array(items) if items.is_empty() => self.children.push(Self::new(key)),
                Value::Array(items) => {
                    let child_name = singular(key);
                    for item in items {
                        self.children.push(Self::from_value(child_name, item));
                    }
                }
                Value::Null => {}
                scalar => {
                    let text = scalar_to_string(scalar);
                    match key.as_str() {
                        "VALUE" => self.text = Some(Text::Escaped(text)),
                        "CDATA" => self.text = Some(Text::CData(text)),
                        _ => self.attributes.push((key.clone(), text)),
                    }
                }
            }
        }
    }

    fn write(&self, out: &mut String, depth: usize) {
        let indent = INDENT.repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", key, escape_attribute(value));
        }

        if self.children.is_empty() {
            match &self.text {
                None => out.push_str("/>\n"),
                Some(text) => {
                    out.push('>');
                    text.write(out);
                    let _ = writeln!(out, "</{}>", self.name);
                }
            }
            return;
        }

        out.push('>');
        if let Some(text) = &self.text {
            text.write(out);
        }
        out.push('\n');
        for child in &self.children {
            child.write(out, depth + 1);
        }
        let _ = writeln!(out, "{}</{}>", indent, self.name);
    }
}

impl Text {
    fn write(&self, out: &mut String) {
        match self {
            Text::Escaped(text) => out.push_str(&escape_text(text)),
            Text::CData(text) => {
                out.push_str("<![CDATA[");
                // A literal terminator has to be split across two sections.
                out.push_str(&text.replace("]]>", "]]]]><![CDATA[>"));
                out.push_str("]]>");
            }
        }
    }
}

/// Element name for the entries of a list stored under `key`.
pub(crate) fn singular(key: &str) -> &str {
    let trimmed = key.trim_end_matches('s');
    if trimmed.is_empty() {
        key
    } else {
        trimmed
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn escape_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn escape_attribute(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\t' => escaped.push_str("&#9;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_field_type_fragment() {
        let value = json!({
            "name": "text_en",
            "class": "solr.TextField",
            "positionIncrementGap": 100,
            "storeOffsetsWithPositions": true,
            "analyzers": [
                {
                    "type": "index",
                    "charFilters": [{"class": "solr.MappingCharFilterFactory", "mapping": "accents_en.txt"}],
                    "tokenizer": {"class": "solr.WhitespaceTokenizerFactory"},
                    "filters": [
                        {"class": "solr.StopFilterFactory", "ignoreCase": true, "words": "stopwords_en.txt"},
                        {"class": "solr.LowerCaseFilterFactory"}
                    ]
                },
                {
                    "type": "query",
                    "tokenizer": {"class": "solr.WhitespaceTokenizerFactory"}
                }
            ]
        });

        let expected = r#"<fieldType name="text_en" class="solr.TextField" positionIncrementGap="100" storeOffsetsWithPositions="true">
  <analyzer type="index">
    <charFilter class="solr.MappingCharFilterFactory" mapping="accents_en.txt"/>
    <tokenizer class="solr.WhitespaceTokenizerFactory"/>
    <filter class="solr.StopFilterFactory" ignoreCase="true" words="stopwords_en.txt"/>
    <filter class="solr.LowerCaseFilterFactory"/>
  </analyzer>
  <analyzer type="query">
    <tokenizer class="solr.WhitespaceTokenizerFactory"/>
  </analyzer>
</fieldType>
"#;
        assert_eq!(build_xml("fieldType", &value), expected);
    }

    #[test]
    fn test_empty_element() {
        assert_eq!(build_xml("fieldType", &json!({})), "<fieldType/>\n");
        assert_eq!(
            build_xml("fieldType", &json!({"name": "x", "analyzers": []})),
            "<fieldType name=\"x\">\n  <analyzers/>\n</fieldType>\n"
        );
    }

    #[test]
    fn test_escaping() {
        let xml = build_xml(
            "str",
            &json!({"name": "q\"<a&b>", "VALUE": "1 < 2 & \"ok\""}),
        );
        assert_eq!(xml, "<str name=\"q&quot;&lt;a&amp;b&gt;\">1 &lt; 2 &amp; \"ok\"</str>\n");
    }

    #[test]
    fn test_cdata() {
        let xml = build_xml("str", &json!({"name": "script", "CDATA": "a < b ]]> c"}));
        assert_eq!(xml, "<str name=\"script\"><![CDATA[a < b ]]]]><![CDATA[> c]]></str>\n");
    }

    #[test]
    fn test_nested_config_snippet() {
        let value = json!({
            "name": "spellcheck_de",
            "class": "solr.SpellCheckComponent",
            "lst": [
                {"name": "spellchecker", "str": [
                    {"name": "name", "VALUE": "de"},
                    {"name": "field", "VALUE": "spellcheck_de"}
                ]}
            ]
        });
        let expected = r#"<searchComponent name="spellcheck_de" class="solr.SpellCheckComponent">
  <lst name="spellchecker">
    <str name="name">de</str>
    <str name="field">spellcheck_de</str>
  </lst>
</searchComponent>
"#;
        assert_eq!(build_xml("searchComponent", &value), expected);
    }

    #[test]
    fn test_null_entries_dropped() {
        assert_eq!(
            build_xml("similarity", &json!({"class": "solr.BM25SimilarityFactory", "k1": 1.2, "b": null})),
            "<similarity class=\"solr.BM25SimilarityFactory\" k1=\"1.2\"/>\n"
        );
        assert_eq!(build_xml("str", &json!({"name": "q", "VALUE": null})), "<str name=\"q\"/>\n");
    }

    #[test]
    fn test_singular() {
        assert_eq!(singular("filters"), "filter");
        assert_eq!(singular("charFilters"), "charFilter");
        assert_eq!(singular("analyzers"), "analyzer");
        assert_eq!(singular("str"), "str");
        assert_eq!(singular("s"), "s");
    }

    #[test]
    fn test_deterministic() {
        let value = json!({"z": 1, "a": 2, "m": {"y": true, "b": false}});
        let first = build_xml("root", &value);
        let second = build_xml("root", &value);
        assert_eq!(first, second);
        assert_eq!(first, "<root z=\"1\" a=\"2\">\n  <m y=\"true\" b=\"false\"/>\n</root>\n");
    }
}
