//! Persistence-model capability.
//!
//! A model is a storage-backed type that owns its attributes as a record
//! (a database row wrapper, an active-record type). Unlike entities it has
//! no declared field table; collections build it by handing the raw record
//! over as `attributes`.

use std::fmt;

use crate::args::Args;
use crate::error::Result;
use crate::record::Record;

/// A type backed by an attributes record.
///
/// Implement this and invoke [`model!`](crate::model) to make the type
/// constructible by the instance factory.
pub trait Model: Clone + PartialEq + fmt::Debug + 'static {
    /// Build from a raw attributes record.
    fn from_attributes(attributes: Record) -> Result<Self>;

    /// Current attributes.
    fn attributes(&self) -> Record;
}

/// Attributes record passed to a model constructor.
#[doc(hidden)]
pub fn attributes_argument(args: Args) -> Result<Record> {
    crate::entity::attributes(args.into_argument(crate::entity::ATTRIBUTES))
}

/// Implement `Object`, `Instantiable` and `Makeable` for a [`Model`] type.
///
/// ```ignore
/// model!(User);
/// ```
#[macro_export]
macro_rules! model {
    ($model:ty) => {
        impl $crate::Object for $model {
            fn to_plain(&self) -> ::std::option::Option<$crate::Value> {
                ::std::option::Option::Some($crate::Value::Record(
                    <$model as $crate::Model>::attributes(self),
                ))
            }
        }

        impl $crate::Instantiable for $model {
            const CONSTRUCTION: $crate::Construction = $crate::Construction::Model;

            fn instantiate(
                args: $crate::Args,
                _factory: &dyn $crate::InstanceFactory,
            ) -> $crate::Result<Self> {
                let attributes = $crate::model::attributes_argument(args)?;
                <$model as $crate::Model>::from_attributes(attributes)
            }
        }

        impl $crate::Makeable for $model {
            const MAKE_ARGUMENT: &'static str = "attributes";
        }
    };
}
