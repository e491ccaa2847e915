//! Display labels for raw attribute values.
//!
//! Every function here is total: missing, empty or unrecognized input renders
//! as an empty string, never an error, so a bad attribute cannot break a page.

use crate::options::{STATUS, Vocabulary};
use crate::product::AttributeValue;

/// Separator between labels of a multi-value attribute.
pub const LABEL_SEPARATOR: &str = ", ";

/// "Enable" when the value coerces to 1, "Disable" otherwise, "" when unset.
pub fn status_label(raw: Option<&AttributeValue>) -> &'static str {
    let Some(value) = raw else {
        return "";
    };
    if matches!(value, AttributeValue::Text(s) if s.is_empty()) {
        return "";
    }

    let code = if value.to_int() == 1 { "1" } else { "0" };
    STATUS.label(code).unwrap_or_default()
}

/// Labels of every recognized code in a multi-value attribute, joined with ", ".
///
/// Tokens are trimmed before lookup. Unknown codes are skipped; order and
/// duplicates are kept.
pub fn multi_value_labels(raw: Option<&AttributeValue>, vocabulary: &Vocabulary) -> String {
    let Some(value) = raw.filter(|v| v.is_truthy()) else {
        return String::new();
    };

    let mut labels = Vec::new();
    for token in value.tokens() {
        let token = token.trim();
        match vocabulary.label(token) {
            Some(label) => labels.push(label),
            None => tracing::debug!(
                vocabulary = vocabulary.name(),
                code = token,
                "dropping unknown option code"
            ),
        }
    }

    labels.join(LABEL_SEPARATOR)
}

/// The value as text, or "" when unset or falsy.
pub fn scalar_label(raw: Option<&AttributeValue>) -> String {
    raw.filter(|v| v.is_truthy())
        .map(|v| v.to_text().into_owned())
        .unwrap_or_default()
}

/// True when at least one display string is non-empty.
pub fn has_any_of(values: &[&str]) -> bool {
    values.iter().any(|v| !v.is_empty())
}
