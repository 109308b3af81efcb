//! Configuration options for ATV output.
//!
//! ## Examples
//!
//! ```rust
//! use atv::OutputOptions;
//!
//! // Four-space indentation, 30 source bytes per base64 line
//! let options = OutputOptions::new().with_indent(4).with_base64_chunk(30);
//! assert_eq!(options.indent, 4);
//! ```

/// Default number of source bytes encoded per base64 line.
pub const DEFAULT_BASE64_CHUNK: usize = 48;

/// Formatting options for [`OutputStream`](crate::OutputStream).
///
/// # Examples
///
/// ```rust
/// use atv::OutputOptions;
///
/// let options = OutputOptions::new();
/// assert_eq!(options.indent, 2);
/// assert_eq!(options.base64_chunk, 48);
///
/// let options = OutputOptions::compact();
/// assert_eq!(options.indent, 0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct OutputOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Source bytes per base64 chunk; rounded down to a multiple of 3.
    pub base64_chunk: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions {
            indent: 2,
            base64_chunk: DEFAULT_BASE64_CHUNK,
        }
    }
}

impl OutputOptions {
    /// Creates default options (2-space indent, 48 bytes per base64 chunk).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options without indentation. Entries still go on separate lines.
    #[must_use]
    pub fn compact() -> Self {
        OutputOptions {
            indent: 0,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_base64_chunk(mut self, bytes: usize) -> Self {
        self.base64_chunk = bytes;
        self
    }
}
