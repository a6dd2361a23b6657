//! Typed collections with insertion-time coercion.
//!
//! A [`Collection<T>`] only ever holds instances of `T` or nested
//! collections of the same type. Every raw value inserted through
//! [`Collection::push`], [`Collection::from_values`] or `makeable` goes
//! through the coercion rules in [`coerce`] and either becomes a `T` or is
//! rejected. `Collection<Value>` is the untyped mode: items are kept as they
//! are.

mod coerce;
mod fake;

pub use fake::DEFAULT_FAKE_COUNT;

use std::any::type_name;

use tracing::debug;

use crate::args::Args;
use crate::error::Result;
use crate::factory::{self, InstanceFactory};
use crate::makeable::{Construction, Instantiable, Makeable};
use crate::object::{Instance, Object};
use crate::value::Value;

/// Constructor parameter the items are passed under.
const ITEMS: &str = "items";

/// One slot of a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Element<T> {
    /// An item of the declared type.
    Item(T),
    /// A nested collection of the same type.
    Nested(Collection<T>),
}

impl<T: Instantiable> Element<T> {
    /// Try to get as a typed item.
    pub fn as_item(&self) -> Option<&T> {
        match self {
            Element::Item(item) => Some(item),
            Element::Nested(_) => None,
        }
    }

    /// Try to get as a nested collection.
    pub fn as_nested(&self) -> Option<&Collection<T>> {
        match self {
            Element::Item(_) => None,
            Element::Nested(nested) => Some(nested),
        }
    }

    /// Put the element into a [`Value`], keeping typed objects.
    pub fn into_value(self) -> Value {
        match self {
            Element::Item(item) => item.into_value(),
            Element::Nested(nested) => nested.into_value(),
        }
    }

    /// Plain form of the element.
    pub fn to_plain_value(&self) -> Value {
        match self {
            Element::Item(item) => item
                .to_plain()
                .unwrap_or_else(|| item.clone().into_value()),
            Element::Nested(nested) => Value::List(nested.to_array()),
        }
    }
}

/// An ordered sequence of `T` items.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    elements: Vec<Element<T>>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

impl<T: Instantiable> Collection<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection from already typed items.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            elements: items.into_iter().map(Element::Item).collect(),
        }
    }

    /// Create a collection from raw values, coercing each one.
    pub fn from_values(
        values: impl IntoIterator<Item = Value>,
        factory: &dyn InstanceFactory,
    ) -> Result<Self> {
        let mut collection = Self::new();
        for value in values {
            collection.push(value, factory)?;
        }
        Ok(collection)
    }

    /// Coerce `item` and append it.
    pub fn push(
        &mut self,
        item: impl Into<Value>,
        factory: &dyn InstanceFactory,
    ) -> Result<&mut Self> {
        let element = coerce::coerce::<T>(item.into(), factory)?;
        self.elements.push(element);
        Ok(self)
    }

    /// Coerce `item` and insert it at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(
        &mut self,
        index: usize,
        item: impl Into<Value>,
        factory: &dyn InstanceFactory,
    ) -> Result<&mut Self> {
        let element = coerce::coerce::<T>(item.into(), factory)?;
        self.elements.insert(index, element);
        Ok(self)
    }

    /// Append an item of the declared type.
    pub fn push_item(&mut self, item: T) -> &mut Self {
        self.elements.push(Element::Item(item));
        self
    }

    /// Append every element of `other`, each coerced like a single push.
    pub fn push_many<U: Instantiable>(
        &mut self,
        other: Collection<U>,
        factory: &dyn InstanceFactory,
    ) -> Result<&mut Self> {
        debug!(
            collection = type_name::<Self>(),
            source = type_name::<Collection<U>>(),
            count = other.len(),
            "pushing many"
        );
        for element in other.into_elements() {
            self.push(element.into_value(), factory)?;
        }
        Ok(self)
    }

    /// Number of top-level elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the collection has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<&Element<T>> {
        self.elements.get(index)
    }

    /// First element.
    pub fn first(&self) -> Option<&Element<T>> {
        self.elements.first()
    }

    /// Last element.
    pub fn last(&self) -> Option<&Element<T>> {
        self.elements.last()
    }

    /// Iterate over elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element<T>> {
        self.elements.iter()
    }

    /// Top-level items of the declared type, skipping nested collections.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.elements.iter().filter_map(Element::as_item)
    }

    /// All elements as a slice.
    pub fn elements(&self) -> &[Element<T>] {
        &self.elements
    }

    /// Consume the collection into its elements.
    pub fn into_elements(self) -> Vec<Element<T>> {
        self.elements
    }

    /// Value of `key` in each element's plain form, null where absent.
    pub fn pluck(&self, key: &str) -> Vec<Value> {
        self.elements
            .iter()
            .map(|element| match element.to_plain_value() {
                Value::Record(record) => record.get(key).cloned().unwrap_or_default(),
                _ => Value::Null,
            })
            .collect()
    }

    /// Plain form of every element.
    pub fn to_array(&self) -> Vec<Value> {
        self.elements.iter().map(Element::to_plain_value).collect()
    }

    /// Convert every element into a `U`.
    ///
    /// When `U` is the declared item type the collection is returned as it
    /// is. Otherwise each element is passed to `U`'s constructor through
    /// the factory.
    pub fn map_into<U: Instantiable>(
        self,
        factory: &dyn InstanceFactory,
    ) -> Result<Collection<U>> {
        let instance = match Instance::new(self).downcast::<Collection<U>>() {
            Ok(same) => return Ok(same),
            Err(instance) => instance,
        };

        debug!(
            source = instance.type_name(),
            target = type_name::<U>(),
            "mapping collection into another type"
        );
        instance
            .collection_items()
            .unwrap_or_default()
            .into_iter()
            .map(|item| factory::make::<U>(factory, Args::single(item)))
            .collect::<Result<Vec<U>>>()
            .map(Collection::from_items)
    }
}

impl<T: Instantiable> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

impl<T: Instantiable> Extend<T> for Collection<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter.into_iter().map(Element::Item));
    }
}

impl<T> IntoIterator for Collection<T> {
    type Item = Element<T>;
    type IntoIter = std::vec::IntoIter<Element<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a Element<T>;
    type IntoIter = std::slice::Iter<'a, Element<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: Instantiable> Object for Collection<T> {
    fn to_plain(&self) -> Option<Value> {
        Some(Value::List(self.to_array()))
    }

    fn collection_items(&self) -> Option<Vec<Value>> {
        Some(
            self.elements
                .iter()
                .cloned()
                .map(Element::into_value)
                .collect(),
        )
    }
}

impl<T: Instantiable> Instantiable for Collection<T> {
    const CONSTRUCTION: Construction = Construction::Collection;

    fn instantiate(args: Args, factory: &dyn InstanceFactory) -> Result<Self> {
        let items = match args.into_argument(ITEMS) {
            Value::Object(instance) => match instance.downcast::<Self>() {
                Ok(collection) => return Ok(collection),
                Err(instance) => object_items(instance),
            },
            Value::List(items) => items,
            Value::Record(record) => record.into_values().collect(),
            Value::Null => Vec::new(),
            scalar => vec![scalar],
        };
        Self::from_values(items, factory)
    }
}

impl<T: Instantiable> Makeable for Collection<T> {
    const MAKE_ARGUMENT: &'static str = ITEMS;
}

/// Items of a foreign object passed as a whole collection.
fn object_items(instance: Instance) -> Vec<Value> {
    if let Some(items) = instance.collection_items() {
        return items;
    }
    match instance.to_plain() {
        Some(Value::List(items)) => items,
        _ => vec![Value::Object(instance)],
    }
}
