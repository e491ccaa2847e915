//! Option vocabularies backing select / multiselect attributes.
//!
//! Each vocabulary is a fixed, ordered table of stored codes and their display
//! labels. Lookups are exact and case-sensitive; callers decide what to do with
//! codes that are not in the table (the label formatter drops them).

use serde::{Deserialize, Serialize};

use shopattr_core::ValueObject;

/// A single selectable option: the stored code and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AttributeOption {
    pub code: &'static str,
    pub label: &'static str,
}

impl ValueObject for AttributeOption {}

/// Immutable code → label mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    name: &'static str,
    options: &'static [AttributeOption],
}

impl ValueObject for Vocabulary {}

impl Vocabulary {
    pub const fn new(name: &'static str, options: &'static [AttributeOption]) -> Self {
        Self { name, options }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All options in declaration order (what an admin dropdown shows).
    pub fn all_options(&self) -> &'static [AttributeOption] {
        self.options
    }

    /// Display label for `code`, if the code belongs to this vocabulary.
    pub fn label(&self, code: &str) -> Option<&'static str> {
        self.options
            .iter()
            .find(|option| option.code == code)
            .map(|option| option.label)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.label(code).is_some()
    }
}

const fn opt(code: &'static str, label: &'static str) -> AttributeOption {
    AttributeOption { code, label }
}

/// Google Shopping gender.
pub const GENDER: Vocabulary = Vocabulary::new(
    "gender",
    &[opt("male", "Male"), opt("female", "Female"), opt("unisex", "Unisex")],
);

/// Google Shopping age group.
pub const AGE_GROUP: Vocabulary = Vocabulary::new(
    "age_group",
    &[
        opt("newborn", "Newborn"),
        opt("infant", "Infant"),
        opt("toddler", "Toddler"),
        opt("kids", "Kids"),
        opt("adult", "Adult"),
    ],
);

/// Enable/disable flag stored as an integer.
pub const STATUS: Vocabulary = Vocabulary::new("status", &[opt("1", "Enable"), opt("0", "Disable")]);

/// Boolean yes/no stored as an integer.
pub const YES_NO: Vocabulary = Vocabulary::new("yes_no", &[opt("1", "Yes"), opt("0", "No")]);

/// Named reference to one of the built-in vocabularies.
///
/// Attribute declarations carry this instead of the table itself so they stay
/// serializable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionSource {
    Status,
    Gender,
    AgeGroup,
    YesNo,
}

impl OptionSource {
    pub fn vocabulary(self) -> &'static Vocabulary {
        match self {
            OptionSource::Status => &STATUS,
            OptionSource::Gender => &GENDER,
            OptionSource::AgeGroup => &AGE_GROUP,
            OptionSource::YesNo => &YES_NO,
        }
    }

    /// Whether stored codes are integers (`int` backend) rather than strings.
    pub fn is_numeric(self) -> bool {
        matches!(self, OptionSource::Status | OptionSource::YesNo)
    }
}
