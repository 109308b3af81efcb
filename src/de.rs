//! ATV input.
//!
//! [`InputStream`] binds a [`Parser`] to an [`ObjectStore`] and rebuilds object graphs.
//! Restoring a document runs in two states:
//!
//! 1. wait for a typed group and clone a fresh instance of that type from the store;
//! 2. forward every event of the group to the instance's
//!    [`Serializable::restore`] until the group's FINISHED.
//!
//! Inside `restore` an object claims its fields with the helpers on this type:
//!
//! - [`InputStream::restore`] for a named primitive,
//! - [`InputStream::restore_at`] for a primitive matched by position,
//! - [`InputStream::restore_raw`] for binary data stored as base64,
//! - [`InputStream::restore_ptr`] / [`InputStream::restore_dyn`] for owned child objects,
//! - [`InputStream::restore_embedded`] for a by-value child object,
//! - [`InputStream::restore_code`] for a raw code block.
//!
//! Every helper returns `Ok(false)` when the current event is not the field it restores,
//! so they chain with `||`.

use crate::codec::{self, Primitive, BASE64_TYPE, NULL_TYPE};
use crate::serializable::downcast;
use crate::{Error, Event, ObjectStore, Parser, Result, Serializable};
use std::io;

/// Reader of serializable objects from ATV text.
pub struct InputStream<'s> {
    parser: Parser,
    store: &'s ObjectStore,
}

impl<'s> InputStream<'s> {
    pub fn new(parser: Parser, store: &'s ObjectStore) -> Self {
        InputStream { parser, store }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str, store: &'s ObjectStore) -> Self {
        InputStream::new(Parser::from_str(input), store)
    }

    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails.
    pub fn from_reader<R: io::Read>(reader: R, store: &'s ObjectStore) -> Result<Self> {
        Ok(InputStream::new(Parser::from_reader(reader)?, store))
    }

    /// Names the source in accumulated diagnostics.
    #[must_use]
    pub fn with_source_name(self, name: &str) -> Self {
        InputStream {
            parser: self.parser.with_source_name(name),
            store: self.store,
        }
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn parser_mut(&mut self) -> &mut Parser {
        &mut self.parser
    }

    pub fn store(&self) -> &'s ObjectStore {
        self.store
    }

    pub fn what(&self) -> Event {
        self.parser.what()
    }

    pub fn attribute(&self) -> Option<&str> {
        self.parser.attribute()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.parser.type_name()
    }

    pub fn value(&self) -> Option<&str> {
        self.parser.value()
    }

    pub fn position(&self) -> usize {
        self.parser.position()
    }

    pub fn line(&self) -> usize {
        self.parser.line()
    }

    pub fn error_text(&self) -> &str {
        self.parser.error_text()
    }

    /// True on START and FINISHED, the events every object accepts.
    pub fn at_boundary(&self) -> bool {
        matches!(self.parser.what(), Event::Start | Event::Finished)
    }

    fn fail(&mut self, error: Error) -> Error {
        self.parser.fail(error)
    }

    /// Reads the next top-level object.
    ///
    /// Returns `None` for a `NULL {}` group and at the end of the document.
    ///
    /// # Errors
    ///
    /// Fails on malformed input, on a VALUE where an object was expected, on an unknown
    /// type, and on any error raised by the object's `restore`.
    pub fn read_object(&mut self) -> Result<Option<Box<dyn Serializable>>> {
        loop {
            match self.parser.next_event()? {
                Event::Start => continue,
                Event::Finished => return Ok(None),
                Event::Value => {
                    let err = self.parser.rejected("expected an object group, found");
                    return Err(self.fail(err));
                }
                Event::Group => {
                    if self.parser.type_name() == Some(NULL_TYPE) {
                        self.parser.skip_group()?;
                        return Ok(None);
                    }
                    let mut object = self.clone_group_type()?;
                    self.restore_into(&mut *object)?;
                    return Ok(Some(object));
                }
            }
        }
    }

    /// Reads the next top-level object and downcasts it to `T`.
    ///
    /// # Errors
    ///
    /// As [`InputStream::read_object`], plus a type mismatch if the object is not a `T`.
    pub fn read_as<T: Serializable>(&mut self) -> Result<Option<Box<T>>> {
        let object = match self.read_object()? {
            Some(object) => object,
            None => return Ok(None),
        };
        let found = object.class_name();
        match downcast::<T>(object) {
            Some(concrete) => Ok(Some(concrete)),
            None => {
                let err = Error::type_mismatch(self.line(), std::any::type_name::<T>(), found);
                Err(self.fail(err))
            }
        }
    }

    /// Feeds the events of the group just entered to `object` until its FINISHED.
    ///
    /// Called on a fresh stream it feeds the whole document instead. A
    /// [`Parser::stop`](crate::Parser::stop) issued while restoring ends this call and
    /// every enclosing one.
    ///
    /// # Errors
    ///
    /// Fails off a fresh stream or a freshly opened group, on malformed input, when
    /// `object.restore` fails, or when it rejects an event.
    pub fn restore_into(&mut self, object: &mut dyn Serializable) -> Result<()> {
        let depth = self.parser.enter_scope()?;
        let result = self.feed(object, depth);
        self.parser.leave_scope();
        result
    }

    fn feed(&mut self, object: &mut dyn Serializable, depth: usize) -> Result<()> {
        loop {
            let event = self.parser.next_event()?;
            let closing = event == Event::Finished
                && (self.parser.depth() < depth || self.parser.is_done());
            match object.restore(self) {
                Ok(true) => {}
                Ok(false) => {
                    let msg = format!("'{}' does not accept", object.class_name());
                    let err = self.parser.rejected(&msg);
                    return Err(self.fail(err));
                }
                Err(err) => return Err(self.fail(err)),
            }
            if closing || self.parser.is_stopped() {
                return Ok(());
            }
        }
    }

    fn clone_group_type(&mut self) -> Result<Box<dyn Serializable>> {
        let type_name = self.parser.type_name().unwrap_or("").to_string();
        match self.store.clone_object(&type_name) {
            Some(object) => Ok(object),
            None => {
                let err = Error::unknown_type(self.line(), &type_name);
                Err(self.fail(err))
            }
        }
    }

    /// Checks that the current event is a group named `name`.
    fn group_named(&self, name: &str) -> Result<bool> {
        if self.parser.attribute() != Some(name) {
            return Ok(false);
        }
        if self.parser.what() != Event::Group {
            return Err(Error::type_mismatch(
                self.line(),
                &format!("group for '{}'", name),
                &self.parser.what().to_string(),
            ));
        }
        Ok(true)
    }

    fn read_primitive<T: Primitive>(&self, target: &mut T) -> Result<()> {
        if self.parser.what() != Event::Value {
            return Err(Error::type_mismatch(
                self.line(),
                &format!("{} value", T::KIND),
                &self.parser.what().to_string(),
            ));
        }
        let text = self.parser.value().unwrap_or("");
        match T::decode(text) {
            Some(value) => {
                *target = value;
                Ok(())
            }
            None => {
                let attribute = match self.parser.attribute() {
                    Some(attribute) => attribute.to_string(),
                    None => format!("#{}", self.parser.position()),
                };
                Err(Error::conversion(self.line(), &attribute, text, T::KIND))
            }
        }
    }

    /// Restores `target` from the VALUE named `name`.
    ///
    /// # Errors
    ///
    /// Fails if `name` is a group or its value does not convert.
    pub fn restore<T: Primitive>(&mut self, name: &str, target: &mut T) -> Result<bool> {
        if self.parser.attribute() != Some(name) {
            return Ok(false);
        }
        self.read_primitive(target)?;
        Ok(true)
    }

    /// Restores `target` from the entry at `position` within the current group.
    ///
    /// # Errors
    ///
    /// Fails if that entry is a group or its value does not convert.
    pub fn restore_at<T: Primitive>(&mut self, position: usize, target: &mut T) -> Result<bool> {
        if !matches!(self.parser.what(), Event::Value | Event::Group)
            || self.parser.position() != position
        {
            return Ok(false);
        }
        self.read_primitive(target)?;
        Ok(true)
    }

    /// Restores bytes written by [`OutputStream::store_raw`](crate::OutputStream::store_raw).
    ///
    /// Consumes the whole `BASE64` group, decoding chunk by chunk.
    ///
    /// # Errors
    ///
    /// Fails if the group has another type, holds nested groups, or a chunk is not valid
    /// base64.
    pub fn restore_raw(&mut self, name: &str, target: &mut Vec<u8>) -> Result<bool> {
        if !self.group_named(name)? {
            return Ok(false);
        }
        if self.parser.type_name() != Some(BASE64_TYPE) {
            return Err(Error::type_mismatch(
                self.line(),
                BASE64_TYPE,
                self.parser.type_name().unwrap_or("untyped group"),
            ));
        }
        target.clear();
        loop {
            match self.parser.next_event()? {
                Event::Value => {
                    let chunk = self.parser.value().unwrap_or("");
                    if let Err(e) = codec::decode_base64_chunk(chunk, target) {
                        log::debug!("base64 decode failed: {}", e);
                        return Err(Error::conversion(self.line(), name, chunk, "base64"));
                    }
                }
                Event::Finished => return Ok(true),
                other => {
                    return Err(Error::type_mismatch(
                        self.line(),
                        "base64 chunk",
                        &other.to_string(),
                    ))
                }
            }
        }
    }

    /// Restores an owned child object of concrete type `T` from the group named `name`.
    ///
    /// A `NULL` group sets `None` and is skipped. Otherwise a fresh instance is cloned
    /// from the store by the group's type and must be a `T`; on mismatch it is dropped and
    /// the call fails.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type, a type that is not `T`, or an error while restoring the
    /// child.
    pub fn restore_ptr<T: Serializable>(
        &mut self,
        name: &str,
        target: &mut Option<Box<T>>,
    ) -> Result<bool> {
        if !self.group_named(name)? {
            return Ok(false);
        }
        if self.parser.type_name() == Some(NULL_TYPE) {
            *target = None;
            self.parser.skip_group()?;
            return Ok(true);
        }
        let object = self.clone_group_type()?;
        let found = object.class_name();
        let mut object = match downcast::<T>(object) {
            Some(object) => object,
            None => {
                let err = Error::type_mismatch(self.line(), std::any::type_name::<T>(), found);
                return Err(self.fail(err));
            }
        };
        self.restore_into(&mut *object)?;
        *target = Some(object);
        Ok(true)
    }

    /// Like [`InputStream::restore_ptr`] for a child of any registered type.
    ///
    /// # Errors
    ///
    /// Fails on an unknown type or an error while restoring the child.
    pub fn restore_dyn(
        &mut self,
        name: &str,
        target: &mut Option<Box<dyn Serializable>>,
    ) -> Result<bool> {
        if !self.group_named(name)? {
            return Ok(false);
        }
        if self.parser.type_name() == Some(NULL_TYPE) {
            *target = None;
            self.parser.skip_group()?;
            return Ok(true);
        }
        let mut object = self.clone_group_type()?;
        self.restore_into(&mut *object)?;
        *target = Some(object);
        Ok(true)
    }

    /// Restores a child object held by value, in place.
    ///
    /// The group type must equal the child's class name.
    ///
    /// # Errors
    ///
    /// Fails on a different group type or an error while restoring the child.
    pub fn restore_embedded<T: Serializable>(
        &mut self,
        name: &str,
        target: &mut T,
    ) -> Result<bool> {
        if !self.group_named(name)? {
            return Ok(false);
        }
        if self.parser.type_name() != Some(target.class_name()) {
            return Err(Error::type_mismatch(
                self.line(),
                target.class_name(),
                self.parser.type_name().unwrap_or("untyped group"),
            ));
        }
        self.restore_into(target)?;
        Ok(true)
    }

    /// Captures the body of the group named `name` as raw text.
    ///
    /// # Errors
    ///
    /// Fails if `name` is a value or the block is unterminated.
    pub fn restore_code(&mut self, name: &str, target: &mut String) -> Result<bool> {
        if !self.group_named(name)? {
            return Ok(false);
        }
        *target = self.parser.get_code()?;
        Ok(true)
    }

    /// Skips the group just entered.
    ///
    /// # Errors
    ///
    /// Fails off a freshly opened group or if the skipped content is malformed.
    pub fn skip_group(&mut self) -> Result<()> {
        self.parser.skip_group()
    }
}
