//! Instance factory and the default container.
//!
//! Hydration and coercion never construct nested types directly. They ask
//! an [`InstanceFactory`] to resolve the target type, which lets callers
//! inject custom constructors, override construction strategies, or refuse
//! unregistered types altogether.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use tracing::{debug, trace};

use crate::args::Args;
use crate::config::ContainerConfig;
use crate::error::{BindingError, Result};
use crate::makeable::{Construction, Instantiable};
use crate::object::Instance;

/// Identifies a constructible type.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key of `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Runtime type id.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully-qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Outcome of resolving a type.
#[derive(Debug)]
pub enum Resolution {
    /// A binding built the instance.
    Built(Instance),
    /// No custom binding; the type builds itself from these arguments.
    Autowire(Args),
}

/// Resolves type identifiers to live instances.
pub trait InstanceFactory {
    /// Resolve `key` with constructor arguments `args`.
    fn resolve(&self, key: TypeKey, args: Args) -> Result<Resolution>;

    /// Construction strategy registered for `key`, if overridden.
    fn construction(&self, key: TypeKey) -> Option<Construction>;
}

/// Build a `T` through `factory`.
///
/// Binding errors are returned as produced by the factory.
pub fn make<T: Instantiable>(factory: &dyn InstanceFactory, args: Args) -> Result<T> {
    let key = TypeKey::of::<T>();
    match factory.resolve(key, args)? {
        Resolution::Built(instance) => instance.downcast::<T>().map_err(|instance| {
            BindingError::WrongInstance {
                expected: key.name(),
                found: instance.type_name(),
            }
            .into()
        }),
        Resolution::Autowire(args) => T::instantiate(args, factory),
    }
}

/// Effective construction strategy of `T` under `factory`.
pub fn construction_of<T: Instantiable>(factory: &dyn InstanceFactory) -> Construction {
    factory
        .construction(TypeKey::of::<T>())
        .unwrap_or(T::CONSTRUCTION)
}

type Build = Box<dyn Fn(Args, &dyn InstanceFactory) -> Result<Instance>>;

struct Binding {
    construction: Option<Construction>,
    build: Option<Build>,
}

/// Default [`InstanceFactory`]: a registry of bindings with autowiring.
///
/// Registration happens once at startup through the builder methods; the
/// container is then passed by reference into every hydration call.
pub struct Container {
    config: ContainerConfig,
    bindings: HashMap<TypeKey, Binding>,
}

impl Container {
    /// Create a container with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// Create a container with the given configuration.
    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            config,
            bindings: HashMap::new(),
        }
    }

    /// Container configuration.
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Register `T` so it resolves through its own constructor.
    pub fn register<T: Instantiable>(mut self) -> Self {
        let key = TypeKey::of::<T>();
        debug!(type_name = key.name(), "registered type");
        self.bindings.entry(key).or_insert(Binding {
            construction: None,
            build: None,
        });
        self
    }

    /// Register `T` with an explicit construction strategy.
    pub fn register_as<T: Instantiable>(mut self, construction: Construction) -> Self {
        let key = TypeKey::of::<T>();
        debug!(type_name = key.name(), ?construction, "registered construction");
        self.bindings
            .entry(key)
            .or_insert(Binding {
                construction: None,
                build: None,
            })
            .construction = Some(construction);
        self
    }

    /// Bind `T` to a custom constructor.
    pub fn bind<T, F>(mut self, build: F) -> Self
    where
        T: Instantiable,
        F: Fn(Args, &dyn InstanceFactory) -> Result<T> + 'static,
    {
        let key = TypeKey::of::<T>();
        debug!(type_name = key.name(), "bound constructor");
        let build: Build =
            Box::new(move |args: Args, factory: &dyn InstanceFactory| {
                build(args, factory).map(Instance::new)
            });
        self.bindings
            .entry(key)
            .or_insert(Binding {
                construction: None,
                build: None,
            })
            .build = Some(build);
        self
    }

    /// Check whether `T` has been registered or bound.
    pub fn is_bound<T: Any>(&self) -> bool {
        self.bindings.contains_key(&TypeKey::of::<T>())
    }

    /// Build a `T`.
    pub fn make<T: Instantiable>(&self, args: impl Into<Args>) -> Result<T> {
        make::<T>(self, args.into())
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.bindings.keys().map(TypeKey::name).collect();
        names.sort_unstable();
        f.debug_struct("Container")
            .field("config", &self.config)
            .field("bindings", &names)
            .finish()
    }
}

impl InstanceFactory for Container {
    fn resolve(&self, key: TypeKey, args: Args) -> Result<Resolution> {
        match self.bindings.get(&key) {
            Some(Binding {
                build: Some(build), ..
            }) => {
                trace!(type_name = key.name(), "resolving through binding");
                build(args, self).map(Resolution::Built)
            }
            Some(_) => Ok(Resolution::Autowire(args)),
            None if self.config.autowire => {
                trace!(type_name = key.name(), "autowiring unbound type");
                Ok(Resolution::Autowire(args))
            }
            None => Err(BindingError::Unresolvable {
                type_name: key.name(),
            }
            .into()),
        }
    }

    fn construction(&self, key: TypeKey) -> Option<Construction> {
        self.bindings
            .get(&key)
            .and_then(|binding| binding.construction)
    }
}
