use chrono::{TimeZone, Utc};
use serde_json::{Value, json};

use shopattr_catalog::{
    AttributeInstaller, AttributeValue, GENDER, InMemoryAttributeStore, PatchRunner, ProductAttributes,
    ProductSnapshot, multi_value_labels, status_label,
};
use shopattr_core::AttributeCode;

fn snapshot(json: Value) -> ProductSnapshot {
    serde_json::from_value(json).unwrap()
}

#[test]
fn catalog_install_then_render_product_page() {
    let mut store = InMemoryAttributeStore::new();
    let mut runner = PatchRunner::with_default_patches().unwrap();
    runner
        .apply_all(&mut store, Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap())
        .unwrap();

    for code in ["product_select_attribute", "gender", "brand", "age_group", "gtin"] {
        assert!(store.has_attribute(&AttributeCode::parse(code).unwrap()), "{code} not installed");
    }

    let product = snapshot(json!({
        "name": "Solitaire Ring",
        "sku": "SOL-18K",
        "attributes": {
            "product_select_attribute": "1",
            "product_custom_attribute": "Hand engraved",
            "gender": "female, unisex, robot",
            "brand": "Maison Eliel",
            "age_group": ["adult"],
            "gtin": "3700000000017",
            "carat": "0.5"
        }
    }));

    let view = ProductAttributes::new(&product);
    assert_eq!(view.status(), "Enable");
    assert_eq!(view.custom_attribute_value(), "Hand engraved");
    assert_eq!(view.gender(), "Female, Unisex");
    assert_eq!(view.age_group(), "Adult");
    assert!(view.has_custom_attribute_data());
    assert!(view.has_google_shopping_data());

    let document: Value = serde_json::from_str(&view.structured_data()).unwrap();
    assert_eq!(
        document,
        json!({
            "@context": "https://schema.org/",
            "@type": "Product",
            "name": "Solitaire Ring",
            "sku": "SOL-18K",
            "brand": { "@type": "Brand", "name": "Maison Eliel" },
            "gtin": "3700000000017",
            "audience": {
                "@type": "PeopleAudience",
                "suggestedGender": "Female, Unisex",
                "suggestedMinAge": "Adult"
            }
        })
    );
}

#[test]
fn page_without_shopping_attributes_has_no_json_ld() {
    let product = snapshot(json!({
        "name": "Gift Card",
        "sku": "GC-50",
        "attributes": { "gender": null, "brand": "", "age_group": "", "gtin": null }
    }));

    let view = ProductAttributes::new(&product);
    assert!(!view.has_google_shopping_data());
    assert_eq!(view.structured_data(), "");

    let page = serde_json::to_value(view.page_data()).unwrap();
    assert!(page.get("structured_data").is_none());
    assert_eq!(page["show_google_shopping"], false);
}

#[test]
fn documented_label_examples() {
    assert_eq!(status_label(None), "");
    assert_eq!(status_label(Some(&AttributeValue::from(""))), "");
    assert_eq!(status_label(Some(&AttributeValue::Integer(1))), "Enable");
    assert_eq!(status_label(Some(&AttributeValue::Integer(0))), "Disable");
    assert_eq!(status_label(Some(&AttributeValue::Integer(5))), "Disable");

    assert_eq!(multi_value_labels(Some(&AttributeValue::from("male,female")), &GENDER), "Male, Female");
    assert_eq!(multi_value_labels(Some(&AttributeValue::from(" male , bogus ")), &GENDER), "Male");
    assert_eq!(multi_value_labels(Some(&AttributeValue::from("")), &GENDER), "");
    assert_eq!(multi_value_labels(None, &GENDER), "");
}
