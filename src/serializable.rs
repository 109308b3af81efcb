//! The contract every persisted type implements.
//!
//! A serializable type names itself with [`Serializable::class_name`], writes its fields in
//! [`Serializable::store`] and claims its fields back one event at a time in
//! [`Serializable::restore`]:
//!
//! ```rust
//! use atv::{InputStream, OutputStream, Result, Serializable};
//!
//! #[derive(Clone, Default)]
//! struct Button {
//!     label: String,
//!     width: u32,
//! }
//!
//! impl Serializable for Button {
//!     fn class_name(&self) -> &'static str {
//!         "toad::TButton"
//!     }
//!
//!     fn store(&self, out: &mut OutputStream) {
//!         out.store("label", &self.label);
//!         out.store("width", &self.width);
//!     }
//!
//!     fn restore(&mut self, input: &mut InputStream<'_>) -> Result<bool> {
//!         Ok(input.restore("label", &mut self.label)?
//!             || input.restore("width", &mut self.width)?
//!             || input.at_boundary())
//!     }
//! }
//! ```
//!
//! Types composed of a "base" part chain to it by calling the base's `restore` last, the
//! same way they would fall back to [`InputStream::at_boundary`].

use crate::{InputStream, OutputStream, Result};
use std::any::Any;

/// Downcasting support, implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Boxed cloning, implemented for every `Clone` serializable type.
pub trait CloneSerializable {
    fn clone_box(&self) -> Box<dyn Serializable>;
}

impl<T: Serializable + Clone> CloneSerializable for T {
    fn clone_box(&self) -> Box<dyn Serializable> {
        Box::new(self.clone())
    }
}

/// A type that can be written to and restored from ATV text.
pub trait Serializable: AsAny + CloneSerializable {
    /// Stable key for the object store, written as the group type.
    fn class_name(&self) -> &'static str;

    /// Writes this object's fields. The surrounding group is already open.
    fn store(&self, out: &mut OutputStream);

    /// Handles one event of this object's group.
    ///
    /// Returns `Ok(true)` if the event was claimed, `Ok(false)` to reject it. The default
    /// accepts only the group boundaries.
    ///
    /// # Errors
    ///
    /// Returns an error if a claimed field cannot be converted.
    fn restore(&mut self, input: &mut InputStream<'_>) -> Result<bool> {
        Ok(input.at_boundary())
    }
}

impl Clone for Box<dyn Serializable> {
    fn clone(&self) -> Self {
        (**self).clone_box()
    }
}

/// Moves a boxed object into its concrete type. The object is dropped if it is not a `T`.
pub fn downcast<T: Serializable>(object: Box<dyn Serializable>) -> Option<Box<T>> {
    object.into_any().downcast::<T>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Circle {
        radius: u32,
    }

    impl Serializable for Circle {
        fn class_name(&self) -> &'static str {
            "Circle"
        }

        fn store(&self, out: &mut OutputStream) {
            out.store("radius", &self.radius);
        }
    }

    #[derive(Clone)]
    struct Square;

    impl Serializable for Square {
        fn class_name(&self) -> &'static str {
            "Square"
        }

        fn store(&self, _out: &mut OutputStream) {}
    }

    #[test]
    fn test_clone_box_is_independent() {
        let original: Box<dyn Serializable> = Box::new(Circle { radius: 3 });
        let copy = original.clone();
        assert_eq!(copy.class_name(), "Circle");
        let circle = downcast::<Circle>(copy).unwrap();
        assert_eq!(*circle, Circle { radius: 3 });
    }

    #[test]
    fn test_downcast_mismatch() {
        let object: Box<dyn Serializable> = Box::new(Square);
        assert!((*object).as_any().is::<Square>());
        assert!(downcast::<Circle>(object).is_none());
    }
}
