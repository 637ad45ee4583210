//! Aggregations over a collection of field types
//!
//! Used to populate choices (domains, custom codes) from whatever set of
//! field type configurations the caller has loaded.

use crate::field_type::{SolrFieldType, DEFAULT_DOMAIN};
use ahash::AHashSet;
use std::collections::BTreeSet;

/// All domains used by any field type, always including `generic`, sorted.
pub fn available_domains<'a, I>(field_types: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a SolrFieldType>,
{
    let mut domains = BTreeSet::new();
    domains.insert(DEFAULT_DOMAIN.to_string());
    for field_type in field_types {
        domains.extend(field_type.domains().into_iter().map(str::to_string));
    }
    domains.into_iter().collect()
}

/// Distinct custom codes in the order they are first seen.
pub fn available_custom_codes<'a, I>(field_types: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a SolrFieldType>,
{
    let mut seen = AHashSet::new();
    field_types
        .into_iter()
        .filter_map(SolrFieldType::custom_code)
        .filter(|code| seen.insert(*code))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldTypeDefinition;

    fn field_type(name: &str, custom_code: Option<&str>, domains: &[&str]) -> SolrFieldType {
        let builder = SolrFieldType::builder()
            .field_type(FieldTypeDefinition::new(name, "solr.TextField"))
            .domains(domains.iter().copied());
        match custom_code {
            Some(code) => builder.custom_code(code),
            None => builder,
        }
        .build()
        .unwrap()
    }

    #[test]
    fn test_available_domains() {
        let field_types = vec![
            field_type("a", None, &["news", "generic"]),
            field_type("b", None, &[]),
            field_type("c", None, &["books", "news"]),
        ];
        assert_eq!(available_domains(&field_types), vec!["books", "generic", "news"]);
        assert_eq!(available_domains(&[]), vec!["generic"]);
    }

    #[test]
    fn test_available_custom_codes() {
        let field_types = vec![
            field_type("a", Some("ar"), &[]),
            field_type("b", None, &[]),
            field_type("c", Some(""), &[]),
            field_type("d", Some("de"), &[]),
            field_type("e", Some("ar"), &[]),
        ];
        assert_eq!(available_custom_codes(&field_types), vec!["ar", "de"]);
        assert!(available_custom_codes(&[]).is_empty());
    }
}
