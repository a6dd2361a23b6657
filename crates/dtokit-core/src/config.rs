//! Container configuration.

/// Configuration for a [`Container`](crate::Container).
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Build unbound types through their own constructor.
    ///
    /// When disabled, every type must be registered before it can be made
    /// and resolving an unregistered type fails with a binding error.
    pub autowire: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self { autowire: true }
    }
}

impl ContainerConfig {
    /// Create a configuration that only builds registered types.
    pub fn strict() -> Self {
        Self { autowire: false }
    }

    /// Set whether unbound types are autowired.
    pub fn autowire(mut self, autowire: bool) -> Self {
        self.autowire = autowire;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert!(ContainerConfig::default().autowire);
        assert!(!ContainerConfig::strict().autowire);
        assert!(ContainerConfig::strict().autowire(true).autowire);
    }
}
