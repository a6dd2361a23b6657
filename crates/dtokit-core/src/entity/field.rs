//! Conversions between raw values and declared field types.

use crate::error::{Error, Result};
use crate::factory::InstanceFactory;
use crate::makeable::Makeable;
use crate::record::Record;
use crate::value::Value;

use super::schema::{FieldKind, ScalarType};

/// A Rust type an entity field can be declared with.
pub trait FieldType: Sized + 'static {
    /// Declared kind, as reported by the schema.
    fn kind() -> FieldKind;

    /// Convert a raw value into the declared type.
    fn from_value(value: Value, factory: &dyn InstanceFactory) -> Result<Self>;

    /// Plain representation of the stored value.
    fn to_value(&self) -> Value;
}

impl FieldType for bool {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarType::Bool)
    }

    fn from_value(value: Value, _factory: &dyn InstanceFactory) -> Result<Self> {
        value.as_bool().ok_or_else(|| Error::mismatch("bool", &value))
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl FieldType for i64 {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarType::Int64)
    }

    fn from_value(value: Value, _factory: &dyn InstanceFactory) -> Result<Self> {
        value.as_i64().ok_or_else(|| Error::mismatch("int", &value))
    }

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

macro_rules! narrow_int_field {
    ($ty:ty, $scalar:ident, $expected:literal) => {
        impl FieldType for $ty {
            fn kind() -> FieldKind {
                FieldKind::Scalar(ScalarType::$scalar)
            }

            fn from_value(value: Value, _factory: &dyn InstanceFactory) -> Result<Self> {
                value
                    .as_i64()
                    .and_then(|int| <$ty>::try_from(int).ok())
                    .ok_or_else(|| Error::mismatch($expected, &value))
            }

            fn to_value(&self) -> Value {
                Value::Int(*self as i64)
            }
        }
    };
}

narrow_int_field!(i32, Int32, "i32");
narrow_int_field!(u32, UInt32, "u32");
narrow_int_field!(u64, UInt64, "u64");

impl FieldType for f64 {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarType::Float64)
    }

    fn from_value(value: Value, _factory: &dyn InstanceFactory) -> Result<Self> {
        value.as_f64().ok_or_else(|| Error::mismatch("float", &value))
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl FieldType for f32 {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarType::Float32)
    }

    fn from_value(value: Value, _factory: &dyn InstanceFactory) -> Result<Self> {
        value
            .as_f64()
            .map(|float| float as f32)
            .ok_or_else(|| Error::mismatch("float", &value))
    }

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl FieldType for String {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarType::String)
    }

    fn from_value(value: Value, _factory: &dyn InstanceFactory) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(Error::mismatch("string", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl FieldType for Value {
    fn kind() -> FieldKind {
        FieldKind::Any
    }

    fn from_value(value: Value, _factory: &dyn InstanceFactory) -> Result<Self> {
        Ok(value)
    }

    fn to_value(&self) -> Value {
        self.plain()
    }
}

impl FieldType for Record {
    fn kind() -> FieldKind {
        FieldKind::Record
    }

    fn from_value(value: Value, _factory: &dyn InstanceFactory) -> Result<Self> {
        match value {
            Value::Record(record) => Ok(record),
            Value::Object(instance) => match instance.plain_record() {
                Some(record) => Ok(record),
                None => match instance.to_plain() {
                    Some(Value::Record(record)) => Ok(record),
                    _ => Err(Error::mismatch("record", &Value::Object(instance))),
                },
            },
            other => Err(Error::mismatch("record", &other)),
        }
    }

    fn to_value(&self) -> Value {
        Value::Record(self.clone()).plain()
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn kind() -> FieldKind {
        FieldKind::Optional(Box::new(T::kind()))
    }

    fn from_value(value: Value, factory: &dyn InstanceFactory) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other, factory).map(Some),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::List(Box::new(T::kind()))
    }

    fn from_value(value: Value, factory: &dyn InstanceFactory) -> Result<Self> {
        let items = match value {
            Value::List(items) => items,
            Value::Object(instance) => match instance.collection_items() {
                Some(items) => items,
                None => return Err(Error::mismatch("list", &Value::Object(instance))),
            },
            other => return Err(Error::mismatch("list", &other)),
        };

        items
            .into_iter()
            .map(|item| T::from_value(item, factory))
            .collect()
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(FieldType::to_value).collect())
    }
}

/// Nested entities, collections and models.
///
/// An instance of the exact declared type is assigned as it is; any other
/// value goes through the type's `makeable` constructor.
impl<M: Makeable> FieldType for M {
    fn kind() -> FieldKind {
        FieldKind::Nested {
            type_name: std::any::type_name::<M>(),
            construction: M::CONSTRUCTION,
        }
    }

    fn from_value(value: Value, factory: &dyn InstanceFactory) -> Result<Self> {
        match value {
            Value::Object(instance) => match instance.downcast::<M>() {
                Ok(nested) => Ok(nested),
                Err(instance) => M::makeable(Value::Object(instance), factory),
            },
            other => M::makeable(other, factory),
        }
    }

    fn to_value(&self) -> Value {
        self.to_plain().unwrap_or_else(|| self.clone().into_value())
    }
}
