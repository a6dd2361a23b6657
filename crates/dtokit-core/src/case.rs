//! Identifier case conversion and key policies.

use convert_case::{Case, Casing};

/// Key naming applied when an entity is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCase {
    /// Keys are the declared field names, verbatim.
    Declared,
    /// Keys are the snake_case form of the declared names.
    #[default]
    Snake,
}

impl KeyCase {
    /// Output key for a field under this policy.
    pub fn apply<'a>(&self, declared: &'a str, snake: &'a str) -> &'a str {
        match self {
            KeyCase::Declared => declared,
            KeyCase::Snake => snake,
        }
    }
}

/// `someFieldName` -> `some_field_name`.
pub fn snake(identifier: &str) -> String {
    identifier.to_case(Case::Snake)
}

/// `some_field_name` -> `SomeFieldName`.
pub fn pascal(identifier: &str) -> String {
    identifier.to_case(Case::Pascal)
}

/// `some_field_name` -> `someFieldName`.
pub fn camel(identifier: &str) -> String {
    identifier.to_case(Case::Camel)
}
