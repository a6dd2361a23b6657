//! Constructor arguments handed to an instance factory.

use crate::record::Record;
use crate::value::Value;

/// Positional and named constructor arguments.
///
/// Both call shapes of the factory are supported: `make(x: 1, y: 2)` maps to
/// named arguments, `make({x: 1, y: 2})` to a single positional record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Args {
    positional: Vec<Value>,
    named: Record,
}

impl Args {
    /// Create an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single positional argument.
    pub fn single(value: impl Into<Value>) -> Self {
        Self {
            positional: vec![value.into()],
            named: Record::new(),
        }
    }

    /// A single named argument.
    pub fn named(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            positional: Vec::new(),
            named: Record::new().with(name, value),
        }
    }

    /// Add a named argument.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name, value);
        self
    }

    /// Add a positional argument.
    pub fn push(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Positional arguments, in order.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Named arguments.
    pub fn named_args(&self) -> &Record {
        &self.named
    }

    /// Named argument `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Remove and return a named argument.
    pub fn take(&mut self, name: &str) -> Option<Value> {
        self.named.remove(name)
    }

    /// Total number of arguments.
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// Whether no argument was given.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    /// Collapse the arguments into one value.
    ///
    /// A lone positional argument is unwrapped. Named-only arguments become
    /// a record, positional-only arguments a list. Mixed arguments become a
    /// record with positional entries keyed by their index.
    pub fn into_value(self) -> Value {
        let Self {
            mut positional,
            named,
        } = self;

        if named.is_empty() {
            return match positional.len() {
                0 => Value::Record(Record::new()),
                1 => positional.pop().unwrap_or_default(),
                _ => Value::List(positional),
            };
        }

        if positional.is_empty() {
            return Value::Record(named);
        }

        let mut record = Record::with_capacity(positional.len() + named.len());
        for (index, value) in positional.into_iter().enumerate() {
            record.insert(index.to_string(), value);
        }
        record.extend(named);
        Value::Record(record)
    }

    /// The value of the constructor parameter `name`.
    ///
    /// Uses the named argument when present, otherwise collapses the whole
    /// argument list with [`Args::into_value`].
    pub fn into_argument(mut self, name: &str) -> Value {
        match self.take(name) {
            Some(value) => value,
            None => self.into_value(),
        }
    }
}

impl From<Record> for Args {
    fn from(named: Record) -> Self {
        Self {
            positional: Vec::new(),
            named,
        }
    }
}

impl From<Value> for Args {
    fn from(value: Value) -> Self {
        Self::single(value)
    }
}

impl From<Vec<Value>> for Args {
    fn from(items: Vec<Value>) -> Self {
        Self::single(Value::List(items))
    }
}
