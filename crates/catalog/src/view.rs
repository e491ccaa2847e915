//! Product page presentation helper.
//!
//! [`ProductAttributes`] reads the displayed product through [`ProductSource`]
//! and renders display strings, section flags and the JSON-LD block. The
//! product is passed in explicitly; an absent product renders as empty.

use serde::Serialize;

use crate::labels::{has_any_of, multi_value_labels, scalar_label, status_label};
use crate::options::{AGE_GROUP, GENDER};
use crate::product::{AttributeValue, ProductSource};
use crate::schema::codes;
use crate::structured_data::{ProductDocument, ShoppingLabels};

/// Read-only view over one product for a single render.
#[derive(Debug)]
pub struct ProductAttributes<'a, P: ?Sized> {
    product: Option<&'a P>,
}

impl<P: ?Sized> Clone for ProductAttributes<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for ProductAttributes<'_, P> {}

impl<'a, P: ProductSource + ?Sized> ProductAttributes<'a, P> {
    pub fn new(product: &'a P) -> Self {
        Self { product: Some(product) }
    }

    /// View over a product that may not have been resolved.
    pub fn from_option(product: Option<&'a P>) -> Self {
        Self { product }
    }

    pub fn product(&self) -> Option<&'a P> {
        self.product
    }

    fn raw(&self, code: &str) -> Option<&'a AttributeValue> {
        self.product.and_then(|p| p.attribute(code))
    }

    /// "Enable" / "Disable" for the store status attribute.
    pub fn status(&self) -> String {
        status_label(self.raw(codes::STATUS)).to_string()
    }

    pub fn custom_attribute_value(&self) -> String {
        scalar_label(self.raw(codes::CUSTOM_VALUE))
    }

    /// Whether the custom attribute panel has anything to show.
    pub fn has_custom_attribute_data(&self) -> bool {
        has_any_of(&[self.status().as_str(), self.custom_attribute_value().as_str()])
    }

    pub fn gender(&self) -> String {
        multi_value_labels(self.raw(codes::GENDER), &GENDER)
    }

    pub fn brand(&self) -> String {
        scalar_label(self.raw(codes::BRAND))
    }

    pub fn age_group(&self) -> String {
        multi_value_labels(self.raw(codes::AGE_GROUP), &AGE_GROUP)
    }

    pub fn gtin(&self) -> String {
        scalar_label(self.raw(codes::GTIN))
    }

    pub fn shopping_labels(&self) -> ShoppingLabels {
        ShoppingLabels {
            gender: self.gender(),
            brand: self.brand(),
            age_group: self.age_group(),
            gtin: self.gtin(),
        }
    }

    /// Whether the Google Shopping panel has anything to show.
    pub fn has_google_shopping_data(&self) -> bool {
        self.shopping_labels().has_any()
    }

    pub fn structured_data_document(&self) -> Option<ProductDocument> {
        let product = self.product?;
        ProductDocument::build(product.name(), product.sku(), &self.shopping_labels())
    }

    /// JSON-LD text for a `<script type="application/ld+json">` block, or "".
    pub fn structured_data(&self) -> String {
        self.structured_data_document()
            .map(|doc| doc.to_json_text())
            .unwrap_or_default()
    }

    /// Everything the product template needs in one pass.
    pub fn page_data(&self) -> ProductPageData {
        let shopping = self.shopping_labels();
        let status = self.status();
        let custom_attribute_value = self.custom_attribute_value();
        let structured_data = match self.product {
            Some(product) => ProductDocument::build(product.name(), product.sku(), &shopping)
                .map(|doc| doc.to_json_text())
                .unwrap_or_default(),
            None => String::new(),
        };

        ProductPageData {
            show_custom_attributes: has_any_of(&[status.as_str(), custom_attribute_value.as_str()]),
            status,
            custom_attribute_value,
            show_google_shopping: shopping.has_any(),
            shopping,
            structured_data,
        }
    }
}

/// Template-facing summary of a product's custom attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductPageData {
    pub status: String,
    pub custom_attribute_value: String,
    pub show_custom_attributes: bool,
    #[serde(flatten)]
    pub shopping: ShoppingLabels,
    pub show_google_shopping: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub structured_data: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductSnapshot;
    use serde_json::{Value, json};

    fn ring() -> ProductSnapshot {
        ProductSnapshot::new("Ring", "R-1")
            .with_attribute("gender", "female")
            .with_attribute("brand", "Acme")
            .with_attribute("gtin", "")
            .with_attribute("age_group", "")
    }

    #[test]
    fn ring_structured_data() {
        let product = ring();
        let view = ProductAttributes::new(&product);

        let value: Value = serde_json::from_str(&view.structured_data()).unwrap();
        assert_eq!(value["@type"], "Product");
        assert_eq!(value["name"], "Ring");
        assert_eq!(value["sku"], "R-1");
        assert_eq!(value["brand"], json!({ "@type": "Brand", "name": "Acme" }));
        assert_eq!(
            value["audience"],
            json!({ "@type": "PeopleAudience", "suggestedGender": "Female" })
        );
        assert!(value.get("gtin").is_none());
    }

    #[test]
    fn empty_shopping_fields_produce_no_document() {
        let product = ProductSnapshot::new("Plain", "P-1")
            .with_attribute("gender", "")
            .with_attribute("brand", "")
            .with_null("age_group")
            .with_attribute("product_select_attribute", "1");
        let view = ProductAttributes::new(&product);

        assert!(!view.has_google_shopping_data());
        assert_eq!(view.structured_data(), "");
        assert!(view.structured_data_document().is_none());
    }

    #[test]
    fn unknown_codes_only_produce_no_document() {
        let product = ProductSnapshot::new("Odd", "O-1").with_attribute("gender", "robot, alien");
        let view = ProductAttributes::new(&product);
        assert_eq!(view.gender(), "");
        assert_eq!(view.structured_data(), "");
    }

    #[test]
    fn absent_product_renders_empty() {
        let view = ProductAttributes::<ProductSnapshot>::from_option(None);

        assert_eq!(view.status(), "");
        assert_eq!(view.custom_attribute_value(), "");
        assert_eq!(view.gender(), "");
        assert_eq!(view.brand(), "");
        assert_eq!(view.age_group(), "");
        assert_eq!(view.gtin(), "");
        assert!(!view.has_custom_attribute_data());
        assert!(!view.has_google_shopping_data());
        assert_eq!(view.structured_data(), "");
        assert_eq!(view.page_data(), ProductPageData::default());
    }

    #[test]
    fn custom_attribute_section_flags() {
        let status_only = ProductSnapshot::new("A", "A-1").with_attribute("product_select_attribute", 0_i64);
        let view = ProductAttributes::new(&status_only);
        assert_eq!(view.status(), "Disable");
        assert!(view.has_custom_attribute_data());

        let value_only = ProductSnapshot::new("B", "B-1").with_attribute("product_custom_attribute", "engraved");
        let view = ProductAttributes::new(&value_only);
        assert_eq!(view.status(), "");
        assert_eq!(view.custom_attribute_value(), "engraved");
        assert!(view.has_custom_attribute_data());

        let neither = ProductSnapshot::new("C", "C-1");
        assert!(!ProductAttributes::new(&neither).has_custom_attribute_data());
    }

    #[test]
    fn page_data_matches_individual_getters() {
        let product = ring()
            .with_attribute("age_group", "kids,adult")
            .with_attribute("product_select_attribute", "1");
        let view = ProductAttributes::new(&product);
        let page = view.page_data();

        assert_eq!(page.status, view.status());
        assert_eq!(page.shopping, view.shopping_labels());
        assert_eq!(page.structured_data, view.structured_data());
        assert!(page.show_custom_attributes);
        assert!(page.show_google_shopping);

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["gender"], "Female");
        assert_eq!(value["age_group"], "Kids, Adult");
    }

    #[test]
    fn getters_are_repeatable() {
        let product = ring();
        let view = ProductAttributes::new(&product);
        assert_eq!(view.structured_data(), view.structured_data());
        assert_eq!(view.page_data(), view.page_data());
        assert_eq!(product, ring());
    }

    #[test]
    fn works_through_trait_objects() {
        let product = ring();
        let source: &dyn ProductSource = &product;
        let view = ProductAttributes::new(source);
        assert_eq!(view.brand(), "Acme");
    }
}
