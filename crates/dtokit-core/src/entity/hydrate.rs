//! Attribute-bag hydration.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::factory::InstanceFactory;
use crate::record::Record;
use crate::value::Value;

use super::Entity;

/// Constructor parameter the attributes bag is passed under.
pub(crate) const ATTRIBUTES: &str = "attributes";

/// Whether missing fields are an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fill {
    /// Building a new instance; every field without a default must be supplied.
    Fresh,
    /// Updating a live instance; missing keys keep the current values.
    Existing,
}

/// Normalise a hydration input into an attributes record.
///
/// Accepts a record, null (empty bag), or an object that exposes a plain
/// record form.
pub(crate) fn attributes(value: Value) -> Result<Record> {
    match value {
        Value::Record(record) => Ok(record),
        Value::Null => Ok(Record::new()),
        Value::Object(instance) => {
            if let Some(record) = instance.plain_record() {
                return Ok(record);
            }
            match instance.to_plain() {
                Some(Value::Record(record)) => Ok(record),
                _ => Err(Error::mismatch("record", &Value::Object(instance))),
            }
        }
        other => Err(Error::mismatch("record", &other)),
    }
}

/// Build a new entity from an attributes record.
pub(crate) fn build<E: Entity>(attributes: &Record, factory: &dyn InstanceFactory) -> Result<E> {
    let mut entity = E::default();
    hydrate(&mut entity, attributes, Fill::Fresh, factory)?;
    Ok(entity)
}

/// Assign every declared field found in `attributes`.
///
/// Each field is looked up by its declared name first, then by its
/// snake_case form. The value passes through the field mutator, if any,
/// before it is converted to the declared type.
pub(crate) fn hydrate<E: Entity>(
    entity: &mut E,
    attributes: &Record,
    fill: Fill,
    factory: &dyn InstanceFactory,
) -> Result<()> {
    let schema = E::schema();
    debug!(
        entity = schema.name(),
        fields = schema.len(),
        keys = attributes.len(),
        ?fill,
        "hydrating entity"
    );

    for field in schema.fields() {
        let raw = attributes
            .get(field.name())
            .or_else(|| attributes.get(field.snake_name()));

        match raw {
            Some(raw) => {
                field
                    .mutate(raw.clone(), attributes)
                    .and_then(|value| field.write(entity, value, factory))
                    .map_err(|err| err.at_field(schema.name(), field.name()))?;
                trace!(entity = schema.name(), field = field.name(), "assigned field");
            }
            None if fill == Fill::Existing || field.has_default() => {}
            None => {
                debug!(
                    entity = schema.name(),
                    field = field.name(),
                    "required field missing"
                );
                return Err(Error::Initialization {
                    entity: schema.name(),
                    field: field.name(),
                });
            }
        }
    }

    Ok(())
}
