//! The object store: a class-name keyed registry of prototypes.
//!
//! During restore the input stream asks the store for a fresh instance of every typed group
//! it meets. The store is built once, before the first document is read, and is then only
//! borrowed immutably.
//!
//! ```rust
//! use atv::{ObjectStore, OutputStream, Serializable};
//!
//! #[derive(Clone, Default)]
//! struct Spacer;
//!
//! impl Serializable for Spacer {
//!     fn class_name(&self) -> &'static str {
//!         "Spacer"
//!     }
//!
//!     fn store(&self, _out: &mut OutputStream) {}
//! }
//!
//! let mut store = ObjectStore::new();
//! store.register(Spacer);
//! assert!(store.is_registered("Spacer"));
//! assert!(store.clone_object("Spacer").is_some());
//! assert!(store.clone_object("Missing").is_none());
//! ```

use crate::Serializable;
use indexmap::IndexMap;

/// Registry of prototypes keyed by [`Serializable::class_name`].
///
/// Type names are kept in registration order.
#[derive(Default)]
pub struct ObjectStore {
    prototypes: IndexMap<&'static str, Box<dyn Serializable>>,
}

impl ObjectStore {
    #[must_use]
    pub fn new() -> Self {
        ObjectStore {
            prototypes: IndexMap::new(),
        }
    }

    /// Registers `prototype` under its class name, taking ownership of it.
    ///
    /// A prototype registered earlier under the same name is replaced.
    pub fn register<T: Serializable>(&mut self, prototype: T) {
        self.register_boxed(Box::new(prototype));
    }

    /// Registers an already boxed prototype.
    pub fn register_boxed(&mut self, prototype: Box<dyn Serializable>) {
        let name = prototype.class_name();
        if self.prototypes.insert(name, prototype).is_some() {
            log::warn!("object store: replaced prototype for '{}'", name);
        } else {
            log::debug!("object store: registered '{}'", name);
        }
    }

    /// Returns a fresh copy of the prototype registered as `type_name`.
    ///
    /// An unknown name yields `None` and logs the known names.
    #[must_use]
    pub fn clone_object(&self, type_name: &str) -> Option<Box<dyn Serializable>> {
        match self.prototypes.get(type_name) {
            Some(prototype) => Some((**prototype).clone_box()),
            None => {
                log::warn!(
                    "object store: unknown type '{}', known types: {}",
                    type_name,
                    self.type_names().collect::<Vec<_>>().join(", ")
                );
                None
            }
        }
    }

    #[must_use]
    pub fn is_registered(&self, type_name: &str) -> bool {
        self.prototypes.contains_key(type_name)
    }

    /// Registered type names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.prototypes.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputStream;

    #[derive(Clone, Debug, PartialEq)]
    struct Label {
        text: String,
    }

    impl Serializable for Label {
        fn class_name(&self) -> &'static str {
            "Label"
        }

        fn store(&self, out: &mut OutputStream) {
            out.store("text", &self.text);
        }
    }

    #[derive(Clone)]
    struct Frame;

    impl Serializable for Frame {
        fn class_name(&self) -> &'static str {
            "Frame"
        }

        fn store(&self, _out: &mut OutputStream) {}
    }

    #[test]
    fn test_clone_is_independent_of_prototype() {
        let mut store = ObjectStore::new();
        store.register(Label {
            text: "proto".to_string(),
        });

        let object = store.clone_object("Label").unwrap();
        let mut label = crate::serializable::downcast::<Label>(object).unwrap();
        label.text = "changed".to_string();

        let again = store.clone_object("Label").unwrap();
        let again = crate::serializable::downcast::<Label>(again).unwrap();
        assert_eq!(again.text, "proto");
    }

    #[test]
    fn test_unknown_type_does_not_corrupt_store() {
        let mut store = ObjectStore::new();
        store.register(Frame);
        store.register(Label {
            text: String::new(),
        });

        assert!(store.clone_object("NoSuchType").is_none());
        assert_eq!(store.len(), 2);
        assert!(store.clone_object("Frame").is_some());
        assert_eq!(store.type_names().collect::<Vec<_>>(), vec!["Frame", "Label"]);
    }

    #[test]
    fn test_register_replaces() {
        let mut store = ObjectStore::new();
        store.register(Label {
            text: "a".to_string(),
        });
        store.register(Label {
            text: "b".to_string(),
        });
        assert_eq!(store.len(), 1);
        let object = store.clone_object("Label").unwrap();
        let label = crate::serializable::downcast::<Label>(object).unwrap();
        assert_eq!(label.text, "b");
    }

    #[test]
    fn test_empty_store() {
        let store = ObjectStore::default();
        assert!(store.is_empty());
        assert!(!store.is_registered("Frame"));
    }
}
