//! # atv
//!
//! Object persistence in the ATV (attribute-type-value) text format.
//!
//! ## What is ATV?
//!
//! ATV is a small, human-editable format for trees of objects. A document is a sequence of
//! entries, each either a value or a brace-delimited group:
//!
//! ```text
//! // line comments and /* block comments */ are skipped
//! toad::TWindow {
//!   name = main
//!   title = "Hello World"
//!   child = toad::TButton { label = OK }
//!   icon = NULL {}
//!   data = BASE64 { "AP8Q" }
//! }
//! ```
//!
//! Entries may carry an attribute name (`name = ...`); groups may carry a type name, which
//! on restore selects the prototype cloned from the [`ObjectStore`].
//!
//! ## Key Features
//!
//! - **Pull Parser**: [`Parser`] yields one [`Event`] per call and supports recursive
//!   delegation of nested groups to other [`Interpreter`]s
//! - **Object Graphs**: types implement [`Serializable`]; the [`OutputStream`] writes them
//!   and the [`InputStream`] rebuilds them, polymorphic children included
//! - **Binary Payloads**: raw bytes travel as chunked base64 groups
//! - **Code Blocks**: a group body can be captured verbatim as text
//! - **Document Trees**: [`parse_tree`] reads any document without a store
//!
//! ## Quick Start
//!
//! ```rust
//! use atv::{from_str_as, to_string, InputStream, ObjectStore, OutputStream, Result, Serializable};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Serializable for Point {
//!     fn class_name(&self) -> &'static str {
//!         "Point"
//!     }
//!
//!     fn store(&self, out: &mut OutputStream) {
//!         out.store("x", &self.x);
//!         out.store("y", &self.y);
//!     }
//!
//!     fn restore(&mut self, input: &mut InputStream<'_>) -> Result<bool> {
//!         Ok(input.restore("x", &mut self.x)?
//!             || input.restore("y", &mut self.y)?
//!             || input.at_boundary())
//!     }
//! }
//!
//! let mut store = ObjectStore::new();
//! store.register(Point::default());
//!
//! let text = to_string(&Point { x: 1, y: 2 });
//! assert_eq!(text, "Point {\n  x = 1\n  y = 2\n}");
//!
//! let point = from_str_as::<Point>(&text, &store).unwrap().unwrap();
//! assert_eq!(*point, Point { x: 1, y: 2 });
//! ```
//!
//! ## Error Reporting
//!
//! Errors are terminal: the first failure stops the parser, is returned as an [`Error`] and
//! is recorded in the parser's diagnostics together with the line it occurred on.
//! Diagnostics are prefixed with a source name when one is set with
//! [`Parser::with_source_name`].
//!
//! ## Logging
//!
//! The crate logs through the `log` facade: parser events at `trace`, registrations at
//! `debug`, unknown types at `warn`. No logger is installed.

pub mod codec;
pub mod de;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod ser;
pub mod serializable;
pub mod store;
pub mod tree;

pub use codec::Primitive;
pub use de::InputStream;
pub use error::{Error, Result};
pub use lexer::{Lexer, Token};
pub use options::OutputOptions;
pub use parser::{Event, Ignore, Interpreter, Parser};
pub use ser::OutputStream;
pub use serializable::{AsAny, CloneSerializable, Serializable};
pub use store::ObjectStore;
pub use tree::{Content, Node, TreeBuilder};

use std::io;

/// Renders `object` as a top-level ATV group with default options.
#[must_use]
pub fn to_string<T>(object: &T) -> String
where
    T: ?Sized + Serializable,
{
    to_string_with_options(object, OutputOptions::default())
}

/// Renders `object` with custom formatting options.
///
/// # Examples
///
/// ```rust
/// use atv::{to_string_with_options, OutputOptions, OutputStream, Serializable};
///
/// #[derive(Clone)]
/// struct Blob(Vec<u8>);
///
/// impl Serializable for Blob {
///     fn class_name(&self) -> &'static str {
///         "Blob"
///     }
///
///     fn store(&self, out: &mut OutputStream) {
///         out.store_raw("data", &self.0);
///     }
/// }
///
/// let text = to_string_with_options(&Blob(vec![1, 2, 3, 4]), OutputOptions::compact());
/// assert_eq!(text, "Blob {\ndata = BASE64 {\n\"AQIDBA==\"\n}\n}");
/// ```
#[must_use]
pub fn to_string_with_options<T>(object: &T, options: OutputOptions) -> String
where
    T: ?Sized + Serializable,
{
    let mut out = OutputStream::new(options);
    out.store_object(None, object);
    out.into_inner()
}

/// Writes `object` to `writer` with default options.
///
/// # Errors
///
/// Returns an error if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, object: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serializable,
{
    let text = to_string(object);
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Restores the first top-level object of `text`, cloning instances from `store`.
///
/// Returns `None` for an empty document or a top-level `NULL {}`.
///
/// # Errors
///
/// Returns an error on malformed input, unknown types, and any failure reported while
/// restoring the object.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(text: &str, store: &ObjectStore) -> Result<Option<Box<dyn Serializable>>> {
    InputStream::from_str(text, store).read_object()
}

/// Like [`from_str`], reading the document from `reader`.
///
/// # Errors
///
/// Returns an error if reading fails or the document does not restore.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(reader: R, store: &ObjectStore) -> Result<Option<Box<dyn Serializable>>>
where
    R: io::Read,
{
    InputStream::from_reader(reader, store)?.read_object()
}

/// Restores the first top-level object of `text` as a `T`.
///
/// # Errors
///
/// As [`from_str`], plus a type mismatch when the restored object is not a `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_as<T: Serializable>(text: &str, store: &ObjectStore) -> Result<Option<Box<T>>> {
    InputStream::from_str(text, store).read_as::<T>()
}

/// Reads `text` into a tree of [`Node`]s without an object store.
///
/// # Errors
///
/// Returns an error if `text` is not a well-formed ATV document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_tree(text: &str) -> Result<Vec<Node>> {
    let mut parser = Parser::from_str(text);
    let mut builder = TreeBuilder::new();
    parser.parse(&mut builder)?;
    Ok(builder.into_nodes())
}
