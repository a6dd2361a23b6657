//! Type-erased domain objects and their structural capabilities.

use std::any::Any;
use std::fmt;

use crate::record::Record;
use crate::value::Value;

/// Identity plumbing for [`Object`], provided for every clonable, comparable object.
pub trait ObjectBase: Any + fmt::Debug {
    /// Fully-qualified Rust type name.
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    fn clone_object(&self) -> Box<dyn Object>;
    fn eq_object(&self, other: &dyn Object) -> bool;
}

impl<T: Object + Clone + PartialEq> ObjectBase for T {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_object(&self) -> Box<dyn Object> {
        Box::new(self.clone())
    }

    fn eq_object(&self, other: &dyn Object) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }
}

/// A domain object that can travel inside a [`Value`].
///
/// The capability methods drive collection coercion; an object that
/// overrides none of them is opaque and is rejected by typed collections
/// that do not bind its exact type.
pub trait Object: ObjectBase {
    /// Plain structure of this object, if it is array-convertible.
    fn to_plain(&self) -> Option<Value> {
        None
    }

    /// Elements of this object, if it is itself a collection.
    fn collection_items(&self) -> Option<Vec<Value>> {
        None
    }

    /// Fields of this object, if it is a plain-data carrier with no
    /// behaviour of its own.
    fn plain_record(&self) -> Option<Record> {
        None
    }
}

/// An owned, type-erased [`Object`].
pub struct Instance(Box<dyn Object>);

impl Instance {
    /// Wrap a typed object.
    pub fn new<T: Object + Clone + PartialEq>(object: T) -> Self {
        Self(Box::new(object))
    }

    /// Fully-qualified type name of the wrapped object.
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Check whether the wrapped object is exactly `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.0.as_any().is::<T>()
    }

    /// Borrow the object as `T`, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Take the wrapped object out as `T`, or get the instance back.
    pub fn downcast<T: Any>(self) -> Result<T, Instance> {
        if self.is::<T>() {
            match self.0.into_any().downcast::<T>() {
                Ok(object) => Ok(*object),
                Err(_) => unreachable!("type id checked before downcast"),
            }
        } else {
            Err(self)
        }
    }

    /// Borrow the underlying object.
    pub fn as_object(&self) -> &dyn Object {
        self.0.as_ref()
    }

    /// Plain form of the object, if it has one.
    pub fn to_plain(&self) -> Option<Value> {
        self.0.to_plain()
    }

    /// Items of the object, if it is a collection.
    pub fn collection_items(&self) -> Option<Vec<Value>> {
        self.0.collection_items()
    }

    /// Record of the object, if it is plain data.
    pub fn plain_record(&self) -> Option<Record> {
        self.0.plain_record()
    }
}

impl Clone for Instance {
    fn clone(&self) -> Self {
        Self(self.0.clone_object())
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_object(other.0.as_ref())
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
