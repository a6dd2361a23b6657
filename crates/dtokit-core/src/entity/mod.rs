//! Typed entities hydrated from attribute bags.
//!
//! An entity is a plain struct with a static [`Schema`] describing its
//! fields. Hydration looks every declared field up in an attributes record
//! (exact name first, then snake_case), runs the optional mutator, converts
//! the raw value to the declared type and assigns it. Nested entities and
//! collections are built recursively through the instance factory.

mod field;
mod hydrate;
mod schema;
mod serialize;

pub use field::FieldType;
pub use schema::{FieldDef, FieldKind, Mutator, ScalarType, Schema};

pub(crate) use hydrate::{attributes, ATTRIBUTES};

use crate::args::Args;
use crate::case::KeyCase;
use crate::error::Result;
use crate::factory::InstanceFactory;
use crate::makeable::{Construction, Faker, Instantiable, Makeable};
use crate::object::Object;
use crate::record::Record;
use crate::value::Value;

use hydrate::Fill;

/// A typed record hydrated from an attributes bag.
///
/// `Default` provides the starting state of a fresh instance; fields marked
/// [`defaulted`](FieldDef::defaulted) keep it when no key is supplied, every
/// other field must be present in the bag.
pub trait Entity: Object + Clone + PartialEq + Default {
    /// Declared fields, in order.
    fn schema() -> &'static Schema<Self>;

    /// Key naming used by [`Entity::to_array`].
    fn key_case() -> KeyCase {
        KeyCase::Snake
    }

    /// Self-generation hook for `Collection::fake`.
    fn faker() -> Option<Faker<Self>> {
        None
    }

    /// Assign the supplied attributes to this instance.
    ///
    /// Fields missing from the bag keep their current values.
    fn fill(
        &mut self,
        args: impl Into<Args>,
        factory: &dyn InstanceFactory,
    ) -> Result<&mut Self> {
        let attributes = attributes(args.into().into_value())?;
        hydrate::hydrate(self, &attributes, Fill::Existing, factory)?;
        Ok(self)
    }

    /// Plain record of every declared field.
    ///
    /// Nested entities and collections are converted recursively. A `Value`
    /// field holding an object with neither a plain form nor a plain record
    /// keeps that object.
    fn to_array(&self) -> Record {
        serialize::to_array(self)
    }

    /// [`Entity::to_array`] with null entries removed.
    fn to_array_without_nullables(&self) -> Record {
        serialize::without_nullables(self.to_array())
    }

    /// Build a new instance through the factory.
    ///
    /// Accepts named arguments (`Args::from(record)`) as well as a single
    /// positional attributes record. Either way the bag is forwarded whole
    /// under `attributes`, so a field named `attributes` is just a field.
    fn make(args: impl Into<Args>, factory: &dyn InstanceFactory) -> Result<Self> {
        <Self as Makeable>::makeable(args, factory)
    }
}

impl<E: Entity> Object for E {
    fn to_plain(&self) -> Option<Value> {
        Some(Value::Record(self.to_array()))
    }
}

impl<E: Entity> Instantiable for E {
    const CONSTRUCTION: Construction = Construction::Entity;

    fn instantiate(args: Args, factory: &dyn InstanceFactory) -> Result<Self> {
        let attributes = attributes(args.into_argument(ATTRIBUTES))?;
        hydrate::build(&attributes, factory)
    }

    fn fake_capability() -> Option<Faker<Self>> {
        <E as Entity>::faker()
    }
}

impl<E: Entity> Makeable for E {
    const MAKE_ARGUMENT: &'static str = ATTRIBUTES;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::{field, record, schema, Container};

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Point {
        x: i64,
        y: i64,
    }

    impl Entity for Point {
        fn schema() -> &'static Schema<Self> {
            schema!(Point { field!(Point, x: i64), field!(Point, y: i64) })
        }
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Account {
        created_at: String,
        nickname: Option<String>,
        origin: Option<Point>,
        tags: Vec<String>,
    }

    fn upper(value: Value, _attributes: &Record) -> Result<Value> {
        match value {
            Value::String(s) => Ok(Value::String(s.to_uppercase())),
            other => Ok(other),
        }
    }

    impl Entity for Account {
        fn schema() -> &'static Schema<Self> {
            schema!(Account {
                field!(Account, "createdAt" => created_at: String),
                field!(Account, nickname: Option<String>).with_mutator(upper),
                field!(Account, origin: Option<Point>).defaulted(),
                field!(Account, tags: Vec<String>).defaulted(),
            })
        }

        fn key_case() -> KeyCase {
            KeyCase::Declared
        }
    }

    #[test]
    fn test_make_from_named_and_positional() {
        let factory = Container::new();

        let named = Point::make(record! { "x" => 3, "y" => 4 }, &factory).unwrap();
        assert_eq!(named, Point { x: 3, y: 4 });

        let positional =
            Point::make(Args::single(record! { "x" => 3, "y" => 4 }), &factory).unwrap();
        assert_eq!(positional, named);
        assert_eq!(named.to_array(), record! { "x" => 3, "y" => 4 });
    }

    #[test]
    fn test_missing_required_field() {
        let factory = Container::new();
        let err = Point::make(record! { "x" => 3 }, &factory).unwrap_err();
        assert!(matches!(
            err,
            Error::Initialization {
                entity: "Point",
                field: "y"
            }
        ));
    }

    #[test]
    fn test_exact_key_preferred_over_snake() {
        let factory = Container::new();
        let account = Account::make(
            record! {
                "created_at" => "snake",
                "createdAt" => "exact",
                "nickname" => Value::Null,
            },
            &factory,
        )
        .unwrap();
        assert_eq!(account.created_at, "exact");

        let account = Account::make(
            record! { "created_at" => "snake", "nickname" => "neo" },
            &factory,
        )
        .unwrap();
        assert_eq!(account.created_at, "snake");
        assert_eq!(account.nickname.as_deref(), Some("NEO"));
    }

    #[test]
    fn test_nested_entity_and_declared_keys() {
        let factory = Container::new();
        let account = Account::make(
            record! {
                "createdAt" => "2024",
                "nickname" => Value::Null,
                "origin" => record! { "x" => 1, "y" => 2 },
                "tags" => vec!["a", "b"],
            },
            &factory,
        )
        .unwrap();

        assert_eq!(account.origin, Some(Point { x: 1, y: 2 }));
        assert_eq!(
            account.to_array(),
            record! {
                "createdAt" => "2024",
                "nickname" => Value::Null,
                "origin" => record! { "x" => 1, "y" => 2 },
                "tags" => vec!["a", "b"],
            }
        );
        assert_eq!(
            account.to_array_without_nullables(),
            record! {
                "createdAt" => "2024",
                "origin" => record! { "x" => 1, "y" => 2 },
                "tags" => vec!["a", "b"],
            }
        );
    }

    #[test]
    fn test_nested_instance_kept_as_is() {
        let factory = Container::new();
        let origin = Point { x: 9, y: 9 };
        let account = Account::make(
            record! {
                "createdAt" => "now",
                "nickname" => Value::Null,
                "origin" => Value::Object(crate::Instance::new(origin.clone())),
            },
            &factory,
        )
        .unwrap();
        assert_eq!(account.origin, Some(origin));
    }

    #[test]
    fn test_field_type_mismatch_names_field() {
        let factory = Container::new();
        let err = Point::make(record! { "x" => "three", "y" => 4 }, &factory).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldTypeMismatch {
                entity: "Point",
                field: "x",
                expected: "int",
                ..
            }
        ));
    }

    #[test]
    fn test_fill_keeps_missing_fields() {
        let factory = Container::new();
        let mut point = Point { x: 1, y: 2 };
        point.fill(record! { "y" => 5 }, &factory).unwrap();
        assert_eq!(point, Point { x: 1, y: 5 });
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Product {
        id: i64,
        attributes: Record,
    }

    impl Entity for Product {
        fn schema() -> &'static Schema<Self> {
            schema!(Product {
                field!(Product, id: i64),
                field!(Product, attributes: Record),
            })
        }
    }

    #[test]
    fn test_field_named_attributes() {
        let factory = Container::new();
        let expected = Product {
            id: 1,
            attributes: record! { "colour" => "red" },
        };

        let bag = record! { "id" => 1, "attributes" => record! { "colour" => "red" } };
        assert_eq!(Product::make(bag.clone(), &factory).unwrap(), expected);
        assert_eq!(Product::makeable(bag, &factory).unwrap(), expected);
    }

    #[test]
    fn test_capabilities() {
        assert_eq!(Point::CONSTRUCTION, Construction::Entity);
        assert_eq!(Point::MAKE_ARGUMENT, "attributes");
        assert!(Point::fake_capability().is_none());

        let point = Point { x: 1, y: 1 };
        assert_eq!(
            point.to_plain(),
            Some(Value::Record(record! { "x" => 1, "y" => 1 }))
        );
    }
}
