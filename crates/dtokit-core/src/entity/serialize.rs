//! Entity to plain record conversion.

use crate::record::Record;

use super::Entity;

/// Serialize every declared field, keyed by the entity's key case.
pub(crate) fn to_array<E: Entity>(entity: &E) -> Record {
    let schema = E::schema();
    let case = E::key_case();

    let mut record = Record::with_capacity(schema.len());
    for field in schema.fields() {
        let key = case.apply(field.name(), field.snake_name());
        record.insert(key, field.read(entity));
    }
    record
}

/// Drop every null entry.
pub(crate) fn without_nullables(mut record: Record) -> Record {
    record.retain(|_, value| !value.is_null());
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    #[test]
    fn test_without_nullables() {
        let record = record! { "a" => 1, "b" => crate::Value::Null, "c" => "x" };
        assert_eq!(without_nullables(record), record! { "a" => 1, "c" => "x" });
    }
}
