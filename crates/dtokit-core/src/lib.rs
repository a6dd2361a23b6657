//! dtokit core - entity hydration and typed collection coercion.
//!
//! This crate turns loosely typed data (API payloads, storage rows) into
//! typed entities and homogeneous collections, and back into plain
//! structure.

pub mod args;
pub mod case;
pub mod collection;
pub mod config;
pub mod entity;
pub mod error;
pub mod factory;
pub mod json;
pub mod makeable;
pub mod model;
pub mod object;
pub mod record;
pub mod value;

pub use args::Args;
pub use case::KeyCase;
pub use collection::{Collection, Element, DEFAULT_FAKE_COUNT};
pub use config::ContainerConfig;
pub use entity::{Entity, FieldDef, FieldKind, FieldType, Mutator, ScalarType, Schema};
pub use error::{BindingError, Error, Result};
pub use factory::{construction_of, make, Container, InstanceFactory, Resolution, TypeKey};
pub use makeable::{Construction, Faker, Instantiable, Makeable};
pub use model::Model;
pub use object::{Instance, Object, ObjectBase};
pub use record::Record;
pub use value::Value;
