//! Construction capabilities shared by entities, models and collections.

use crate::args::Args;
use crate::error::Result;
use crate::factory::{self, InstanceFactory};
use crate::object::{Instance, Object};
use crate::value::Value;

/// Self-generation hook used by `Collection::fake`.
pub type Faker<T> = fn(&dyn InstanceFactory) -> Result<T>;

/// How a type is built from raw data.
///
/// Declared by each type through [`Instantiable::CONSTRUCTION`] and
/// overridable per container registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construction {
    /// Hydrated entity, built from an `attributes` record.
    Entity,
    /// Persistence model, built from an `attributes` record.
    Model,
    /// Typed collection, built from an `items` sequence.
    Collection,
    /// Raw values kept as they are.
    Untyped,
    /// No construction path from raw data.
    Opaque,
}

impl Construction {
    /// Whether a raw value can be turned into the type by passing it as the
    /// `attributes` argument.
    pub fn accepts_attributes(&self) -> bool {
        matches!(self, Construction::Entity | Construction::Model)
    }
}

/// A type the instance factory can build.
pub trait Instantiable: Object + Clone + PartialEq {
    /// Construction strategy of this type.
    const CONSTRUCTION: Construction;

    /// Build an instance from constructor arguments.
    fn instantiate(args: Args, factory: &dyn InstanceFactory) -> Result<Self>;

    /// Put this instance into a [`Value`].
    fn into_value(self) -> Value {
        Value::Object(Instance::new(self))
    }

    /// Static fake generation, if the type offers it.
    fn fake_capability() -> Option<Faker<Self>> {
        None
    }
}

/// Build an instance of the implementing type from arbitrary attributes.
///
/// This is the recursion point of hydration and coercion: a nested field or
/// a collection item only needs to know that its declared type is
/// `Makeable`, never what that type is.
pub trait Makeable: Instantiable {
    /// Constructor parameter the attributes are passed under.
    const MAKE_ARGUMENT: &'static str;

    /// Build through the factory from `args`.
    ///
    /// A single positional argument is unwrapped before it is forwarded.
    fn makeable(args: impl Into<Args>, factory: &dyn InstanceFactory) -> Result<Self> {
        let attributes = args.into().into_value();
        factory::make::<Self>(factory, Args::named(Self::MAKE_ARGUMENT, attributes))
    }
}

impl Object for Value {
    fn to_plain(&self) -> Option<Value> {
        Some(self.plain())
    }
}

impl Instantiable for Value {
    const CONSTRUCTION: Construction = Construction::Untyped;

    fn instantiate(args: Args, _factory: &dyn InstanceFactory) -> Result<Self> {
        Ok(args.into_value())
    }

    fn into_value(self) -> Value {
        self
    }
}
