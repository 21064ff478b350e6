//! Collection methods callable from a query.
//!
//! A method turns the compiled lambda of a call into a [`Stage`], a
//! transform from one record sequence to the next. The registry is the only
//! place method names are resolved: the evaluator asks it for a builder, and
//! the parser asks it whether a name exists when strict validation is on.
//!
//! ```
//! use json_linq::methods::{MethodRegistry, Predicate, Stage};
//!
//! fn reject(predicate: Predicate) -> Stage {
//!     Box::new(move |records: Vec<json_linq::Value>| {
//!         records.into_iter().filter(|r| !predicate(r)).collect()
//!     })
//! }
//!
//! let mut registry = MethodRegistry::new();
//! registry.register("Reject", reject);
//! assert_eq!(registry.names(), ["Reject", "Where"]);
//! ```

use std::{collections::HashMap, fmt};

use crate::Value;

/// Compiled lambda body: a pure test of one record.
pub type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Compiled method call: consumes its input sequence, returns its output.
pub type Stage = Box<dyn Fn(Vec<Value>) -> Vec<Value> + Send + Sync>;

/// Builds the stage for one call of a method from the call's predicate.
pub type StageBuilder = fn(Predicate) -> Stage;

/// Maps method names to stage builders.
#[derive(Clone)]
pub struct MethodRegistry {
    builders: HashMap<String, StageBuilder>,
}

impl MethodRegistry {
    /// Registry with the built-in methods.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("Where", where_stage);
        registry
    }

    /// Registry with no methods at all.
    pub fn empty() -> Self {
        MethodRegistry {
            builders: HashMap::new(),
        }
    }

    /// Add or replace a method.
    pub fn register(&mut self, name: impl Into<String>, builder: StageBuilder) -> &mut Self {
        self.builders.insert(name.into(), builder);
        self
    }

    pub fn get(&self, name: &str) -> Option<StageBuilder> {
        self.builders.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.builders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// `Where`: keep the records the predicate accepts, in their original order.
pub fn where_stage(predicate: Predicate) -> Stage {
    Box::new(move |records: Vec<Value>| records.into_iter().filter(|r| predicate(r)).collect())
}
