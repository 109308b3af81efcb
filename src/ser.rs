//! ATV output.
//!
//! [`OutputStream`] renders serializable objects as ATV text. Each entry goes on its own
//! line, indented by nesting depth; a group with no entries is closed on the line that
//! opened it:
//!
//! ```text
//! toad::TWindow {
//!   name = main
//!   width = 640
//!   icon = NULL {}
//!   child = toad::TButton {
//!     label = OK
//!   }
//! }
//! ```
//!
//! Strings are written bare when the lexer would read them back unchanged and quoted
//! otherwise, see [`codec::needs_quotes`](crate::codec::needs_quotes).

use crate::codec::{self, Primitive, BASE64_TYPE, CODE_TYPE, NULL_TYPE};
use crate::{OutputOptions, Serializable};

/// Writer of ATV text into an in-memory buffer.
pub struct OutputStream {
    output: String,
    options: OutputOptions,
    depth: usize,
    open: Vec<bool>, // Per open group: has anything been written inside it
    after_value: bool,
}

impl OutputStream {
    pub fn new(options: OutputOptions) -> Self {
        OutputStream {
            output: String::with_capacity(256),
            options,
            depth: 0,
            open: Vec::new(),
            after_value: false,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Number of currently open groups.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn begin_line(&mut self) {
        self.after_value = false;
        if let Some(has_content) = self.open.last_mut() {
            *has_content = true;
        }
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        self.write_indent();
    }

    fn write_indent(&mut self) {
        for _ in 0..self.depth * self.options.indent {
            self.output.push(' ');
        }
    }

    /// Opens a group on a new line: `[attribute = ]type {`.
    ///
    /// A named group needs a type; a missing one is written as `""`. An anonymous untyped
    /// group directly after a value reads back as a group typed by that value.
    pub fn start_group(&mut self, attribute: Option<&str>, type_name: Option<&str>) {
        if attribute.is_none() && type_name.is_none() && self.after_value {
            log::warn!("untyped group after a value will read back as a typed group");
        }
        self.begin_line();
        if let Some(attribute) = attribute {
            codec::push_string(&mut self.output, attribute);
            self.output.push_str(" = ");
            codec::push_string(&mut self.output, type_name.unwrap_or(""));
            self.output.push_str(" {");
        } else if let Some(type_name) = type_name {
            codec::push_string(&mut self.output, type_name);
            self.output.push_str(" {");
        } else {
            self.output.push('{');
        }
        self.depth += 1;
        self.open.push(false);
    }

    /// Closes the innermost group.
    pub fn end_group(&mut self) {
        match self.open.pop() {
            Some(true) => {
                self.depth -= 1;
                self.output.push('\n');
                self.write_indent();
                self.output.push('}');
            }
            Some(false) => {
                self.depth -= 1;
                self.output.push('}');
            }
            None => log::warn!("end_group called with no open group"),
        }
        self.after_value = false;
    }

    /// Writes `[attribute = ]className { fields }`.
    pub fn store_object<T: Serializable + ?Sized>(&mut self, attribute: Option<&str>, object: &T) {
        self.start_group(attribute, Some(object.class_name()));
        object.store(self);
        self.end_group();
    }

    /// Writes a pointer-like member: the object, or `name = NULL {}` when absent.
    pub fn store_ptr<T: Serializable + ?Sized>(&mut self, name: &str, object: Option<&T>) {
        match object {
            Some(object) => self.store_object(Some(name), object),
            None => {
                self.start_group(Some(name), Some(NULL_TYPE));
                self.end_group();
            }
        }
    }

    /// Writes a member held by value; read back with
    /// [`InputStream::restore_embedded`](crate::InputStream::restore_embedded).
    pub fn store_embedded<T: Serializable + ?Sized>(&mut self, name: &str, object: &T) {
        self.store_object(Some(name), object);
    }

    /// Writes `name = value`.
    pub fn store<T: Primitive>(&mut self, name: &str, value: &T) {
        self.begin_line();
        codec::push_string(&mut self.output, name);
        self.output.push_str(" = ");
        codec::push_string(&mut self.output, &value.encode());
        self.after_value = true;
    }

    /// Writes an anonymous value, matched back by position.
    pub fn store_value<T: Primitive>(&mut self, value: &T) {
        self.begin_line();
        codec::push_string(&mut self.output, &value.encode());
        self.after_value = true;
    }

    /// Writes `name = BASE64 { "chunk" ... }`, one chunk per line.
    pub fn store_raw(&mut self, name: &str, bytes: &[u8]) {
        self.start_group(Some(name), Some(BASE64_TYPE));
        for chunk in codec::base64_chunks(bytes, self.options.base64_chunk) {
            self.begin_line();
            codec::push_quoted(&mut self.output, &chunk);
        }
        self.end_group();
    }

    /// Writes `name = CODE {text}` with `text` copied verbatim.
    ///
    /// The text must keep its braces balanced outside quoted strings and comments.
    pub fn store_code(&mut self, name: &str, text: &str) {
        self.begin_line();
        codec::push_string(&mut self.output, name);
        self.output.push_str(" = ");
        self.output.push_str(CODE_TYPE);
        self.output.push_str(" {");
        self.output.push_str(text);
        self.output.push('}');
    }

    /// Appends `text` as a quoted, backslash-escaped string at the current position.
    pub fn write_quoted(&mut self, text: &str) {
        codec::push_quoted(&mut self.output, text);
        self.after_value = true;
    }
}

impl Default for OutputStream {
    fn default() -> Self {
        OutputStream::new(OutputOptions::default())
    }
}
