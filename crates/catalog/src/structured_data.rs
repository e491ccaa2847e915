//! schema.org `Product` JSON-LD for the product page.

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, PrettyFormatter};

use shopattr_core::ValueObject;

use crate::labels::has_any_of;

pub const SCHEMA_CONTEXT: &str = "https://schema.org/";

/// Display strings of the Google Shopping attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShoppingLabels {
    pub gender: String,
    pub brand: String,
    pub age_group: String,
    pub gtin: String,
}

impl ShoppingLabels {
    pub fn has_any(&self) -> bool {
        has_any_of(&[
            self.gender.as_str(),
            self.brand.as_str(),
            self.age_group.as_str(),
            self.gtin.as_str(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
}

impl ValueObject for Brand {}

/// Target audience.
///
/// `suggested_min_age` carries the age-group labels verbatim (e.g. "Kids, Adult"),
/// not a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audience {
    #[serde(rename = "@type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_min_age: Option<String>,
}

impl ValueObject for Audience {}

impl Audience {
    fn people() -> Self {
        Self {
            kind: "PeopleAudience".to_string(),
            suggested_gender: None,
            suggested_min_age: None,
        }
    }
}

/// JSON-LD `Product` document. Field order is serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<Audience>,
}

impl ValueObject for ProductDocument {}

impl ProductDocument {
    /// Assemble the document, or `None` when no shopping attribute is populated.
    pub fn build(name: &str, sku: &str, labels: &ShoppingLabels) -> Option<Self> {
        if !labels.has_any() {
            return None;
        }

        let mut doc = Self {
            context: SCHEMA_CONTEXT.to_string(),
            kind: "Product".to_string(),
            name: name.to_string(),
            sku: sku.to_string(),
            brand: None,
            gtin: None,
            audience: None,
        };

        if !labels.brand.is_empty() {
            doc.brand = Some(Brand {
                kind: "Brand".to_string(),
                name: labels.brand.clone(),
            });
        }

        if !labels.gtin.is_empty() {
            doc.gtin = Some(labels.gtin.clone());
        }

        if !labels.gender.is_empty() {
            doc.audience
                .get_or_insert_with(Audience::people)
                .suggested_gender = Some(labels.gender.clone());
        }

        if !labels.age_group.is_empty() {
            doc.audience
                .get_or_insert_with(Audience::people)
                .suggested_min_age = Some(labels.age_group.clone());
        }

        Some(doc)
    }

    /// Pretty-printed JSON (4-space indent, slashes unescaped, non-ASCII as
    /// `\uXXXX`), as the storefront's own JSON encoder writes it.
    ///
    /// Returns "" if serialization fails so the page still renders.
    pub fn to_json_text(&self) -> String {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, AsciiFormatter::new());
        if let Err(err) = self.serialize(&mut ser) {
            tracing::warn!("failed to serialize structured data: {err}");
            return String::new();
        }

        String::from_utf8(buf).unwrap_or_else(|err| {
            tracing::warn!("structured data is not valid UTF-8: {err}");
            String::new()
        })
    }
}

/// 4-space pretty printer that writes every non-ASCII character as a
/// lowercase `\uXXXX` escape (UTF-16 surrogate pairs above the BMP).
struct AsciiFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl AsciiFormatter<'_> {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"    "),
        }
    }
}

impl Formatter for AsciiFormatter<'_> {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0_u16; 2];
            for unit in ch.encode_utf16(&mut units).iter() {
                write!(writer, "\\u{unit:04x}")?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn labels(gender: &str, brand: &str, age_group: &str, gtin: &str) -> ShoppingLabels {
        ShoppingLabels {
            gender: gender.to_string(),
            brand: brand.to_string(),
            age_group: age_group.to_string(),
            gtin: gtin.to_string(),
        }
    }

    #[test]
    fn no_document_without_shopping_data() {
        assert_eq!(ProductDocument::build("Ring", "R-1", &labels("", "", "", "")), None);
    }

    #[test]
    fn brand_and_gender_document() {
        let doc = ProductDocument::build("Ring", "R-1", &labels("Female", "Acme", "", "")).unwrap();
        let value: Value = serde_json::from_str(&doc.to_json_text()).unwrap();

        assert_eq!(
            value,
            json!({
                "@context": "https://schema.org/",
                "@type": "Product",
                "name": "Ring",
                "sku": "R-1",
                "brand": { "@type": "Brand", "name": "Acme" },
                "audience": { "@type": "PeopleAudience", "suggestedGender": "Female" }
            })
        );
        assert!(value.get("gtin").is_none());
    }

    #[test]
    fn age_group_alone_creates_audience() {
        let doc = ProductDocument::build("Bib", "B-1", &labels("", "", "Newborn, Infant", "")).unwrap();
        let audience = doc.audience.unwrap();
        assert_eq!(audience.kind, "PeopleAudience");
        assert_eq!(audience.suggested_gender, None);
        assert_eq!(audience.suggested_min_age.as_deref(), Some("Newborn, Infant"));
        assert_eq!(doc.brand, None);
    }

    #[test]
    fn gender_and_age_group_share_audience() {
        let doc = ProductDocument::build("Tee", "T-1", &labels("Male, Female", "", "Kids, Adult", "")).unwrap();
        let value: Value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value["audience"],
            json!({
                "@type": "PeopleAudience",
                "suggestedGender": "Male, Female",
                "suggestedMinAge": "Kids, Adult"
            })
        );
    }

    #[test]
    fn gtin_passes_through_unvalidated() {
        let doc = ProductDocument::build("X", "X-1", &labels("", "", "", "not-a-gtin")).unwrap();
        assert_eq!(doc.gtin.as_deref(), Some("not-a-gtin"));
    }

    #[test]
    fn json_text_keeps_field_order_and_slashes() {
        let doc = ProductDocument::build("Ring", "R/1", &labels("Female", "Acme", "Adult", "123")).unwrap();
        let text = doc.to_json_text();

        assert!(text.contains("\"@context\": \"https://schema.org/\""));
        assert!(text.contains("\"sku\": \"R/1\""));
        assert!(!text.contains("\\/"));

        let order = ["@context", "@type\": \"Product", "\"name\"", "\"sku\"", "\"brand\"", "\"gtin\"", "\"audience\""];
        let positions: Vec<usize> = order.iter().map(|k| text.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "unexpected field order: {text}");
    }

    #[test]
    fn json_text_uses_four_space_indent() {
        let doc = ProductDocument::build("Ring", "R-1", &labels("", "Acme", "", "")).unwrap();
        let text = doc.to_json_text();
        assert!(text.starts_with("{\n    \"@context\""));
        assert!(text.contains("\n        \"@type\": \"Brand\""));
    }

    #[test]
    fn json_text_escapes_non_ascii() {
        let doc = ProductDocument::build("Bague émeraude 💍", "R-1", &labels("", "Acme", "", "")).unwrap();
        let text = doc.to_json_text();

        assert!(text.contains(r#""name": "Bague \u00e9meraude \ud83d\udc8d""#), "{text}");
        assert!(text.is_ascii());

        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["name"], "Bague émeraude 💍");
    }
}
