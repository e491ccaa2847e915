//! Catalog product attributes for the storefront.
//!
//! Attribute declarations and their install patches, option vocabularies, and
//! the product-page presentation layer (display labels + schema.org JSON-LD).
//! Everything is deterministic domain logic with no IO.

pub mod labels;
pub mod options;
pub mod product;
pub mod schema;
pub mod setup;
pub mod structured_data;
pub mod view;

pub use labels::{has_any_of, multi_value_labels, scalar_label, status_label};
pub use options::{AGE_GROUP, AttributeOption, GENDER, OptionSource, STATUS, Vocabulary, YES_NO};
pub use product::{AttributeValue, ProductSnapshot, ProductSource};
pub use schema::{AttributeDefinition, AttributeFlags, BackendModel, BackendType, InputWidget, Scope};
pub use setup::{AppliedPatch, AttributeInstaller, DataPatch, InMemoryAttributeStore, PatchRunner};
pub use structured_data::{ProductDocument, ShoppingLabels};
pub use view::{ProductAttributes, ProductPageData};
