//! Solr field name encoding
//!
//! Solr only resolves field names made of ASCII letters, digits and
//! underscores that do not start with a digit. Everything else is written
//! as `_X<hex>_`, where `<hex>` is the lowercase hex form of the character's
//! UTF-8 bytes. Generated names end up in persisted schema files, so the
//! mapping must never change.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt::Write;

/// Separates the field prefix from the language code in dynamic field names.
pub const LANGUAGE_SEPARATOR: &str = ";";

static ENCODED_SEQUENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_X([0-9a-f]+?)_").expect("valid encoded sequence pattern"));

#[inline]
fn is_legal(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Encode an arbitrary string into Solr's field name alphabet.
///
/// ```
/// use solrtype_core::encode_solr_name;
///
/// assert_eq!(encode_solr_name("ts;de-at_"), "ts_X3b_de_X2d_at_");
/// assert_eq!(encode_solr_name("sort_und"), "sort_und");
/// ```
pub fn encode_solr_name(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    let mut buf = [0u8; 4];

    for (i, ch) in raw.char_indices() {
        let leading_digit = i == 0 && ch.is_ascii_digit();
        if is_legal(ch) && !leading_digit {
            encoded.push(ch);
            continue;
        }

        encoded.push_str("_X");
        for byte in ch.encode_utf8(&mut buf).bytes() {
            // Writing to a String cannot fail.
            let _ = write!(encoded, "{:02x}", byte);
        }
        encoded.push('_');
    }

    encoded
}

/// Reverse [`encode_solr_name`].
///
/// Sequences whose hex payload does not decode to valid UTF-8 are left as
/// they are.
pub fn decode_solr_name(encoded: &str) -> String {
    ENCODED_SEQUENCE
        .replace_all(encoded, |caps: &Captures<'_>| {
            decode_hex(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn decode_hex(hex: &str) -> Option<String> {
    if hex.len() % 2 != 0 {
        return None;
    }

    let bytes = (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect::<Option<Vec<u8>>>()?;

    String::from_utf8(bytes).ok()
}
