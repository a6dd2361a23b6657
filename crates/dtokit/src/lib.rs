//! dtokit - typed entities and collections hydrated from loosely typed data.
//!
//! Declare an entity as a plain struct plus a field table, then build it from
//! any attributes record. Nested entities and typed collections are built
//! recursively; `to_array` turns the graph back into plain structure.
//!
//! ```ignore
//! use dtokit::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq, Default)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! impl Entity for Point {
//!     fn schema() -> &'static Schema<Self> {
//!         schema!(Point { field!(Point, x: i64), field!(Point, y: i64) })
//!     }
//! }
//!
//! let container = Container::new();
//! let point = Point::make(record! { "x" => 3, "y" => 4 }, &container)?;
//! assert_eq!(point.to_array(), record! { "x" => 3, "y" => 4 });
//! ```
//!
//! # Collections
//!
//! [`Collection<T>`] coerces every inserted value into `T`: records are
//! hydrated, typed instances are kept, array-convertible objects are rebuilt,
//! anything else is rejected. `Collection<Value>` keeps items untyped.
//!
//! # Instance factory
//!
//! Every nested construction goes through an [`InstanceFactory`]. The default
//! [`Container`] autowires types to their own constructors; bind a closure to
//! replace one, or use [`ContainerConfig::strict`] to refuse unregistered
//! types.

pub use dtokit_core::{
    args, case, collection, config, entity, error, factory, json, makeable, model, object, record,
    value,
};

pub use dtokit_core::{
    construction_of, make, Args, BindingError, Collection, Construction, Container,
    ContainerConfig, Element, Entity, Error, Faker, FieldDef, FieldKind, FieldType, Instance,
    InstanceFactory, Instantiable, KeyCase, Makeable, Model, Mutator, Object, ObjectBase, Record,
    Resolution, Result, ScalarType, Schema, TypeKey, Value, DEFAULT_FAKE_COUNT,
};

pub use dtokit_core::{field, schema};

/// Everything needed to declare and hydrate entities.
pub mod prelude {
    pub use dtokit_core::{
        field, model, record, schema, Args, Collection, Container, ContainerConfig, Element, Entity,
        Error, Instance, InstanceFactory, Instantiable, KeyCase, Makeable, Model, Object, Record,
        Result, Schema, Value,
    };
}
