//! Fixture generation.

use std::any::type_name;

use tracing::debug;

use crate::error::{Error, Result};
use crate::factory::InstanceFactory;
use crate::makeable::Instantiable;
use crate::value::Value;

use super::Collection;

/// Number of items generated when the caller has no preference.
pub const DEFAULT_FAKE_COUNT: usize = 5;

impl<T: Instantiable> Collection<T> {
    /// Generate `count` items with the item type's own faker.
    ///
    /// Fails before generating anything when `T` cannot fake itself.
    pub fn fake(count: usize, factory: &dyn InstanceFactory) -> Result<Self> {
        let faker = T::fake_capability().ok_or(Error::FakeGeneratorRequired {
            collection: type_name::<Self>(),
            item_type: type_name::<T>(),
        })?;

        debug!(collection = type_name::<Self>(), count, "faking collection");
        let mut collection = Self::new();
        for _ in 0..count {
            let item = faker(factory)?;
            collection.push(item.into_value(), factory)?;
        }
        Ok(collection)
    }

    /// Generate `count` items by calling `generator` once per item.
    ///
    /// Generated values are coerced like any pushed value.
    pub fn fake_with<V, G>(
        count: usize,
        mut generator: G,
        factory: &dyn InstanceFactory,
    ) -> Result<Self>
    where
        V: Into<Value>,
        G: FnMut() -> V,
    {
        debug!(collection = type_name::<Self>(), count, "faking collection");
        let mut collection = Self::new();
        for _ in 0..count {
            collection.push(generator(), factory)?;
        }
        Ok(collection)
    }
}
