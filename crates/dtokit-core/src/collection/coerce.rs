//! Per-item coercion into a collection's declared item type.

use std::any::type_name;

use tracing::trace;

use crate::args::Args;
use crate::error::{Error, Result};
use crate::factory::{self, InstanceFactory};
use crate::makeable::{Construction, Instantiable};
use crate::object::Instance;
use crate::value::Value;

use super::{Collection, Element};

/// Constructor parameter raw items are passed under when the item type is
/// built from attributes.
const ATTRIBUTES: &str = "attributes";

/// Coerce one inserted item.
///
/// Rules, first match wins:
/// 1. a collection of the same type is nested as it is;
/// 2. an instance of `T` is kept as it is;
/// 3. untyped collections keep every item as it is;
/// 4. a foreign collection is rebuilt from its items;
/// 5. an array-convertible object builds a `T` from its plain form;
/// 6. a plain-data object continues as its record, any other object fails;
/// 7. a list of objects or records becomes a nested collection;
/// 8. anything else builds a `T` from `attributes`, if `T` accepts them.
pub(crate) fn coerce<T: Instantiable>(
    item: Value,
    factory: &dyn InstanceFactory,
) -> Result<Element<T>> {
    let collection = type_name::<Collection<T>>();

    let item = match item {
        Value::Object(instance) => {
            let instance = match instance.downcast::<Collection<T>>() {
                Ok(nested) => {
                    trace!(collection, rule = "same collection", "coerced item");
                    return Ok(Element::Nested(nested));
                }
                Err(instance) => instance,
            };
            match instance.downcast::<T>() {
                Ok(typed) => {
                    trace!(collection, rule = "item type", "coerced item");
                    return Ok(Element::Item(typed));
                }
                Err(instance) => Value::Object(instance),
            }
        }
        other => other,
    };

    if T::CONSTRUCTION == Construction::Untyped {
        return T::instantiate(Args::single(item), factory).map(Element::Item);
    }

    let item = match item {
        Value::Object(instance) => match coerce_object::<T>(instance, factory)? {
            Coerced::Done(element) => return Ok(element),
            Coerced::Raw(raw) => raw,
        },
        other => other,
    };

    match item {
        Value::List(elements)
            if matches!(elements.first(), Some(Value::Object(_) | Value::Record(_))) =>
        {
            trace!(collection, rule = "nested list", "coerced item");
            Collection::from_values(elements, factory).map(Element::Nested)
        }
        raw => {
            let construction = factory::construction_of::<T>(factory);
            if construction.accepts_attributes() {
                trace!(collection, rule = "attributes", ?construction, "coerced item");
                factory::make::<T>(factory, Args::named(ATTRIBUTES, raw)).map(Element::Item)
            } else {
                Err(Error::UnsupportedItemType {
                    item_type: type_name::<T>(),
                })
            }
        }
    }
}

enum Coerced<T> {
    Done(Element<T>),
    Raw(Value),
}

/// Rules 4 to 6, for objects that are neither the collection nor `T`.
fn coerce_object<T: Instantiable>(
    instance: Instance,
    factory: &dyn InstanceFactory,
) -> Result<Coerced<T>> {
    let collection = type_name::<Collection<T>>();

    if let Some(items) = instance.collection_items() {
        trace!(
            collection,
            found = instance.type_name(),
            rule = "foreign collection",
            "coerced item"
        );
        return Collection::from_values(items, factory)
            .map(|nested| Coerced::Done(Element::Nested(nested)));
    }

    if let Some(plain) = instance.to_plain() {
        trace!(
            collection,
            found = instance.type_name(),
            rule = "arrayable",
            "coerced item"
        );
        return factory::make::<T>(factory, Args::single(plain))
            .map(|item| Coerced::Done(Element::Item(item)));
    }

    match instance.plain_record() {
        Some(record) => Ok(Coerced::Raw(Value::Record(record))),
        None => Err(Error::UnsupportedItem {
            collection,
            found: instance.type_name(),
        }),
    }
}
