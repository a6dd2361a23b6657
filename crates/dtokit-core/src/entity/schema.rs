//! Static field-descriptor tables for entities.

use std::fmt;

use crate::case;
use crate::error::Result;
use crate::factory::InstanceFactory;
use crate::makeable::Construction;
use crate::record::Record;
use crate::value::Value;

use super::field::FieldType;

/// Scalar types a field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    /// Boolean value.
    Bool,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit unsigned integer.
    UInt32,
    /// 64-bit unsigned integer.
    UInt64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// UTF-8 string.
    String,
}

impl ScalarType {
    /// Check if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ScalarType::Bool | ScalarType::String)
    }
}

/// Declared type of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A scalar value.
    Scalar(ScalarType),
    /// A nested entity or typed collection, built through `makeable`.
    Nested {
        /// Rust type name of the nested type.
        type_name: &'static str,
        /// How the nested type is constructed.
        construction: Construction,
    },
    /// A plain sequence of values of the inner kind.
    List(Box<FieldKind>),
    /// A nullable value of the inner kind.
    Optional(Box<FieldKind>),
    /// A free-form record.
    Record,
    /// Any value, kept as supplied.
    Any,
}

impl FieldKind {
    /// Check if null is an acceptable value.
    pub fn is_nullable(&self) -> bool {
        matches!(self, FieldKind::Optional(_) | FieldKind::Any)
    }

    /// Check if the field holds a nested entity or collection.
    pub fn is_nested(&self) -> bool {
        match self {
            FieldKind::Nested { .. } => true,
            FieldKind::Optional(inner) => inner.is_nested(),
            _ => false,
        }
    }
}

/// Transform applied to a raw value before assignment.
///
/// Receives the raw value and the whole attributes bag, so a field can be
/// derived from its siblings.
pub type Mutator = fn(Value, &Record) -> Result<Value>;

type Read<E> = Box<dyn Fn(&E) -> Value + Send + Sync>;
type Write<E> = Box<dyn Fn(&mut E, Value, &dyn InstanceFactory) -> Result<()> + Send + Sync>;

/// A field definition within an entity.
pub struct FieldDef<E> {
    name: &'static str,
    snake_name: String,
    kind: FieldKind,
    defaulted: bool,
    mutator: Option<Mutator>,
    read: Read<E>,
    write: Write<E>,
}

impl<E: 'static> FieldDef<E> {
    /// Create a required field bound to a struct member.
    ///
    /// Prefer the [`field!`](crate::field) macro, which writes the
    /// accessors.
    pub fn new<T: FieldType>(
        name: &'static str,
        get: fn(&E) -> &T,
        get_mut: fn(&mut E) -> &mut T,
    ) -> Self {
        let read: Read<E> = Box::new(move |entity: &E| get(entity).to_value());
        let write: Write<E> = Box::new(
            move |entity: &mut E, value: Value, factory: &dyn InstanceFactory| {
                *get_mut(entity) = T::from_value(value, factory)?;
                Ok(())
            },
        );

        Self {
            name,
            snake_name: case::snake(name),
            kind: T::kind(),
            defaulted: false,
            mutator: None,
            read,
            write,
        }
    }

    /// Use the member's `Default` value when no key is supplied.
    pub fn defaulted(mut self) -> Self {
        self.defaulted = true;
        self
    }

    /// Set the mutator.
    pub fn with_mutator(mut self, mutator: Mutator) -> Self {
        self.mutator = Some(mutator);
        self
    }
}

impl<E> FieldDef<E> {
    /// Declared field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// snake_case form of the declared name.
    pub fn snake_name(&self) -> &str {
        &self.snake_name
    }

    /// Declared kind of the field.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Check if this field has a default value.
    pub fn has_default(&self) -> bool {
        self.defaulted
    }

    /// Whether a mutator is registered.
    pub fn has_mutator(&self) -> bool {
        self.mutator.is_some()
    }

    /// Whether the field accepts null.
    pub fn is_nullable(&self) -> bool {
        self.kind.is_nullable()
    }

    pub(crate) fn mutate(&self, value: Value, attributes: &Record) -> Result<Value> {
        match self.mutator {
            Some(mutator) => mutator(value, attributes),
            None => Ok(value),
        }
    }

    pub(crate) fn read(&self, entity: &E) -> Value {
        (self.read)(entity)
    }

    pub(crate) fn write(
        &self,
        entity: &mut E,
        value: Value,
        factory: &dyn InstanceFactory,
    ) -> Result<()> {
        (self.write)(entity, value, factory)
    }
}

impl<E> fmt::Debug for FieldDef<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("defaulted", &self.defaulted)
            .field("mutator", &self.mutator.is_some())
            .finish()
    }
}

/// The declared field set of an entity type.
///
/// Built once per type and then shared; see the [`schema!`](crate::schema)
/// macro.
pub struct Schema<E> {
    name: &'static str,
    fields: Vec<FieldDef<E>>,
}

impl<E> Schema<E> {
    /// Create a new, empty schema.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    /// Add a field to the schema.
    pub fn with_field(mut self, field: FieldDef<E>) -> Self {
        self.fields.push(field);
        self
    }

    /// Add multiple fields.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDef<E>>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Entity type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDef<E>] {
        &self.fields
    }

    /// Get a field by declared or snake_case name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDef<E>> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .or_else(|| self.fields.iter().find(|field| field.snake_name == name))
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<E> fmt::Debug for Schema<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Build a [`FieldDef`] for a struct member.
///
/// ```ignore
/// field!(Point, x: i64)                              // declared as "x"
/// field!(Account, "createdAt" => created_at: String) // declared as "createdAt"
/// ```
#[macro_export]
macro_rules! field {
    (@build $entity:ty, $name:expr, $member:ident, $ty:ty) => {{
        fn get(entity: &$entity) -> &$ty {
            &entity.$member
        }
        fn get_mut(entity: &mut $entity) -> &mut $ty {
            &mut entity.$member
        }
        $crate::FieldDef::<$entity>::new::<$ty>($name, get, get_mut)
    }};
    ($entity:ty, $member:ident : $ty:ty) => {
        $crate::field!(@build $entity, stringify!($member), $member, $ty)
    };
    ($entity:ty, $name:literal => $member:ident : $ty:ty) => {
        $crate::field!(@build $entity, $name, $member, $ty)
    };
}

/// Build the static [`Schema`] of an entity, once.
///
/// ```ignore
/// impl Entity for Point {
///     fn schema() -> &'static Schema<Self> {
///         schema!(Point { field!(Point, x: i64), field!(Point, y: i64) })
///     }
/// }
/// ```
#[macro_export]
macro_rules! schema {
    ($entity:ty { $($field:expr),* $(,)? }) => {{
        static SCHEMA: ::std::sync::OnceLock<$crate::Schema<$entity>> =
            ::std::sync::OnceLock::new();
        SCHEMA.get_or_init(|| {
            $crate::Schema::<$entity>::new(stringify!($entity))
                $(.with_field($field))*
        })
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Account {
        created_at: String,
        age: Option<i64>,
    }

    fn account_schema() -> Schema<Account> {
        Schema::new("Account")
            .with_field(crate::field!(Account, "createdAt" => created_at: String))
            .with_field(crate::field!(Account, age: Option<i64>).defaulted())
    }

    #[test]
    fn test_field_def_builder() {
        let schema = account_schema();
        let created = &schema.fields()[0];

        assert_eq!(created.name(), "createdAt");
        assert_eq!(created.snake_name(), "created_at");
        assert_eq!(created.kind(), &FieldKind::Scalar(ScalarType::String));
        assert!(!created.has_default());
        assert!(!created.is_nullable());

        let age = &schema.fields()[1];
        assert!(age.has_default());
        assert!(age.is_nullable());
        assert_eq!(
            age.kind(),
            &FieldKind::Optional(Box::new(FieldKind::Scalar(ScalarType::Int64)))
        );
    }

    #[test]
    fn test_get_field_by_either_name() {
        let schema = account_schema();
        assert_eq!(schema.len(), 2);
        assert!(schema.get_field("createdAt").is_some());
        assert!(schema.get_field("created_at").is_some());
        assert!(schema.get_field("nonexistent").is_none());
    }

    #[test]
    fn test_read_and_write_accessors() {
        let schema = account_schema();
        let factory = crate::Container::new();
        let mut account = Account::default();

        let field = schema.get_field("createdAt").unwrap();
        field
            .write(&mut account, Value::from("2024-01-01"), &factory)
            .unwrap();
        assert_eq!(account.created_at, "2024-01-01");
        assert_eq!(field.read(&account), Value::from("2024-01-01"));

        let field = schema.get_field("age").unwrap();
        field.write(&mut account, Value::Null, &factory).unwrap();
        assert_eq!(account.age, None);
    }

    #[test]
    fn test_scalar_type_checks() {
        assert!(ScalarType::Int32.is_numeric());
        assert!(ScalarType::Float64.is_numeric());
        assert!(!ScalarType::String.is_numeric());
        assert!(!ScalarType::Bool.is_numeric());
    }
}
