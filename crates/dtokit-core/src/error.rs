//! Core error types.

use thiserror::Error;

/// Hydration and coercion errors.
#[derive(Debug, Error)]
pub enum Error {
    /// A declared entity field never received a value.
    #[error("property {field} is not initialized in {entity}")]
    Initialization {
        /// Entity type name.
        entity: &'static str,
        /// Declared field name.
        field: &'static str,
    },

    /// A collection was handed an object it cannot keep or convert.
    #[error("{collection} contains an instance of an unsupported class {found}")]
    UnsupportedItem {
        /// Collection type name.
        collection: &'static str,
        /// Type name of the rejected item.
        found: &'static str,
    },

    /// The bound item type offers no construction path for raw items.
    #[error("item type {item_type} is not supported")]
    UnsupportedItemType {
        /// Item type name.
        item_type: &'static str,
    },

    /// `fake()` was called without a generator on an item type that cannot fake itself.
    #[error(
        "a generator is required for {collection}::fake() when {item_type} has no fake capability"
    )]
    FakeGeneratorRequired {
        /// Collection type name.
        collection: &'static str,
        /// Item type name.
        item_type: &'static str,
    },

    /// A raw value does not have the shape the target type expects.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Expected shape.
        expected: &'static str,
        /// Shape that was supplied.
        found: String,
    },

    /// A raw value does not fit the declared type of an entity field.
    #[error("field {field} of {entity}: expected {expected}, found {found}")]
    FieldTypeMismatch {
        /// Entity type name.
        entity: &'static str,
        /// Declared field name.
        field: &'static str,
        /// Expected shape.
        expected: &'static str,
        /// Shape that was supplied.
        found: String,
    },

    /// Invalid data rejected by a mutator or model.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Instance factory failure, passed through unchanged.
    #[error(transparent)]
    Binding(#[from] BindingError),
}

/// Errors raised by an [`InstanceFactory`](crate::InstanceFactory).
#[derive(Debug, Error)]
pub enum BindingError {
    /// The type has no binding and autowiring is disabled.
    #[error("target {type_name} is not bound and autowiring is disabled")]
    Unresolvable {
        /// Requested type name.
        type_name: &'static str,
    },

    /// A binding produced an instance of another type.
    #[error("binding for {expected} produced an instance of {found}")]
    WrongInstance {
        /// Requested type name.
        expected: &'static str,
        /// Type that was produced.
        found: &'static str,
    },

    /// Failure reported by a user-supplied binding.
    #[error("binding failed: {0}")]
    Custom(String),
}

impl Error {
    /// Build a [`Error::TypeMismatch`] from the value that did not fit.
    pub fn mismatch(expected: &'static str, found: &crate::Value) -> Self {
        Error::TypeMismatch {
            expected,
            found: found.kind_name().to_string(),
        }
    }

    /// Attach entity and field context to a shape mismatch.
    ///
    /// Every other variant is returned untouched so factory failures keep
    /// propagating verbatim.
    pub fn at_field(self, entity: &'static str, field: &'static str) -> Self {
        match self {
            Error::TypeMismatch { expected, found } => Error::FieldTypeMismatch {
                entity,
                field,
                expected,
                found,
            },
            other => other,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
