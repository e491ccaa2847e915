//! Attribute declarations installed into the host catalog.
//!
//! These are plain configuration records. The data-patch runner in
//! [`crate::setup`] hands them to an [`AttributeInstaller`](crate::setup::AttributeInstaller);
//! nothing here talks to storage.

use serde::{Deserialize, Serialize};

use shopattr_core::{AttributeCode, DomainError, DomainResult, Entity};

use crate::options::OptionSource;

/// Attribute codes read by the product page.
pub mod codes {
    pub const STATUS: &str = "product_select_attribute";
    pub const CUSTOM_VALUE: &str = "product_custom_attribute";
    pub const GENDER: &str = "gender";
    pub const BRAND: &str = "brand";
    pub const AGE_GROUP: &str = "age_group";
    pub const GTIN: &str = "gtin";
}

/// Admin attribute group for store-specific fields.
pub const CUSTOM_GROUP: &str = "Custom Product Attribute";

/// Admin attribute group for Google Shopping fields.
pub const SHOPPING_GROUP: &str = "Brand-Gtin-Gender";

/// Storage column type of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    Int,
    Varchar,
}

/// Admin input widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputWidget {
    Text,
    Select,
    Multiselect,
    Boolean,
}

/// Scope at which a value may differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Global,
    Website,
    Store,
}

/// Backend model that converts between widget values and stored text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendModel {
    /// Joins selected options with commas on save.
    Array,
}

/// Visibility and search flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFlags {
    pub visible: bool,
    pub required: bool,
    pub user_defined: bool,
    pub searchable: bool,
    pub filterable: bool,
    pub comparable: bool,
    pub visible_on_front: bool,
    pub used_in_product_listing: bool,
    pub unique: bool,
    pub used_in_grid: bool,
}

impl Default for AttributeFlags {
    /// Visible in admin, nothing else.
    fn default() -> Self {
        Self {
            visible: true,
            required: false,
            user_defined: false,
            searchable: false,
            filterable: false,
            comparable: false,
            visible_on_front: false,
            used_in_product_listing: false,
            unique: false,
            used_in_grid: false,
        }
    }
}

/// Declaration of one catalog product attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    code: AttributeCode,
    label: String,
    group: String,
    backend_type: BackendType,
    input: InputWidget,
    source: Option<OptionSource>,
    backend_model: Option<BackendModel>,
    frontend_class: Option<String>,
    scope: Scope,
    default_value: String,
    note: Option<String>,
    flags: AttributeFlags,
}

impl AttributeDefinition {
    pub fn new(
        code: &str,
        label: impl Into<String>,
        group: impl Into<String>,
        backend_type: BackendType,
        input: InputWidget,
    ) -> DomainResult<Self> {
        Ok(Self {
            code: AttributeCode::parse(code)?,
            label: label.into(),
            group: group.into(),
            backend_type,
            input,
            source: None,
            backend_model: None,
            frontend_class: None,
            scope: Scope::Global,
            default_value: String::new(),
            note: None,
            flags: AttributeFlags::default(),
        })
    }

    pub fn with_source(mut self, source: OptionSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_backend_model(mut self, model: BackendModel) -> Self {
        self.backend_model = Some(model);
        self
    }

    pub fn with_frontend_class(mut self, class: impl Into<String>) -> Self {
        self.frontend_class = Some(class.into());
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_flags(mut self, flags: AttributeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn code(&self) -> &AttributeCode {
        &self.code
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn backend_type(&self) -> BackendType {
        self.backend_type
    }

    pub fn input(&self) -> InputWidget {
        self.input
    }

    pub fn source(&self) -> Option<OptionSource> {
        self.source
    }

    pub fn backend_model(&self) -> Option<BackendModel> {
        self.backend_model
    }

    pub fn frontend_class(&self) -> Option<&str> {
        self.frontend_class.as_deref()
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn flags(&self) -> &AttributeFlags {
        &self.flags
    }

    /// Check the declaration is internally consistent.
    pub fn validate(&self) -> DomainResult<()> {
        let code = &self.code;

        if self.label.trim().is_empty() {
            return Err(DomainError::validation(format!("{code}: label cannot be empty")));
        }
        if self.group.trim().is_empty() {
            return Err(DomainError::validation(format!("{code}: group cannot be empty")));
        }

        match (self.input, self.source) {
            (InputWidget::Text, Some(_)) => {
                return Err(DomainError::validation(format!(
                    "{code}: text inputs cannot have an option source"
                )));
            }
            (InputWidget::Multiselect, None) => {
                return Err(DomainError::validation(format!(
                    "{code}: multiselect requires an option source"
                )));
            }
            (InputWidget::Boolean, source) if source != Some(OptionSource::YesNo) => {
                return Err(DomainError::validation(format!(
                    "{code}: boolean inputs must use the yes/no source"
                )));
            }
            _ => {}
        }

        if self.input == InputWidget::Multiselect && self.backend_model != Some(BackendModel::Array) {
            return Err(DomainError::validation(format!(
                "{code}: multiselect requires the array backend"
            )));
        }

        if let Some(source) = self.source {
            let expected = if source.is_numeric() { BackendType::Int } else { BackendType::Varchar };
            // Multiselect values are comma-joined text regardless of option type.
            if self.input != InputWidget::Multiselect && self.backend_type != expected {
                return Err(DomainError::validation(format!(
                    "{code}: source {source:?} needs a {expected:?} backend"
                )));
            }
        }

        Ok(())
    }
}

impl Entity for AttributeDefinition {
    type Id = AttributeCode;

    fn id(&self) -> &Self::Id {
        &self.code
    }
}

fn listed_flags(searchable: bool, filterable: bool, comparable: bool) -> AttributeFlags {
    AttributeFlags {
        searchable,
        filterable,
        comparable,
        visible_on_front: true,
        used_in_product_listing: true,
        ..AttributeFlags::default()
    }
}

/// Store status, custom value and the Google Shopping fields.
pub fn product_attributes() -> DomainResult<Vec<AttributeDefinition>> {
    use BackendType::{Int, Varchar};
    use InputWidget::{Multiselect, Select, Text};

    Ok(vec![
        AttributeDefinition::new(codes::STATUS, "Product Elie Status", CUSTOM_GROUP, Int, Select)?
            .with_source(OptionSource::Status)
            .with_flags(AttributeFlags {
                used_in_grid: true,
                used_in_product_listing: true,
                ..AttributeFlags::default()
            }),
        AttributeDefinition::new(codes::CUSTOM_VALUE, "Product Elie Attribute Value", CUSTOM_GROUP, Varchar, Text)?
            .with_frontend_class("required-entry")
            .with_flags(AttributeFlags {
                required: true,
                searchable: true,
                filterable: true,
                comparable: true,
                used_in_product_listing: true,
                ..AttributeFlags::default()
            }),
        AttributeDefinition::new(codes::GENDER, "Gender", SHOPPING_GROUP, Varchar, Multiselect)?
            .with_source(OptionSource::Gender)
            .with_backend_model(BackendModel::Array)
            .with_flags(listed_flags(true, true, false))
            .with_note("Gender for Google Shopping feed (male, female, unisex)"),
        AttributeDefinition::new(codes::BRAND, "Brand", SHOPPING_GROUP, Varchar, Text)?
            .with_scope(Scope::Store)
            .with_flags(listed_flags(true, true, true))
            .with_note("Brand name for Google Shopping and SEO"),
        AttributeDefinition::new(codes::AGE_GROUP, "Age Group", SHOPPING_GROUP, Varchar, Multiselect)?
            .with_source(OptionSource::AgeGroup)
            .with_backend_model(BackendModel::Array)
            .with_flags(listed_flags(false, true, false))
            .with_note("Age group for Google Shopping feed"),
        AttributeDefinition::new(codes::GTIN, "Gtin", SHOPPING_GROUP, Varchar, Text)?
            .with_flags(listed_flags(true, false, false))
            .with_note("GTIN/EAN/UPC code for Google Shopping"),
    ])
}

/// Store-specific jewellery and SEO fields. Admin-only, no front-end flags.
pub fn module_attributes() -> DomainResult<Vec<AttributeDefinition>> {
    use BackendType::{Int, Varchar};
    use InputWidget::{Boolean, Select, Text};

    let plain = |code: &str, label: &str, backend: BackendType, input: InputWidget| {
        AttributeDefinition::new(code, label, CUSTOM_GROUP, backend, input)
    };

    Ok(vec![
        plain("carat", "Carat", Varchar, Text)?,
        plain("climp_type", "Serti", Int, Select)?,
        plain("flower", "Flower", Int, Select)?,
        plain("material", "Material", Int, Select)?,
        plain("odeis_sku", "ODEIS Sku", Varchar, Text)?,
        plain("seo_family", "SEO Famille produit", Varchar, Text)?,
        plain("seo_main_product", "SEO Produit Principal", Int, Select)?,
        plain("store_name", "Store_Name", Int, Select)?,
        plain("visibility_redline", "Visibilité (REDLINE)", Int, Boolean)?
            .with_source(OptionSource::YesNo)
            .with_default("0"),
        plain("weight_silver", "Weight Silver", Varchar, Text)?,
    ])
}
