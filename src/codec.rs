//! Text encodings for primitive values.
//!
//! Every primitive travels as the value of a single VALUE event. [`Primitive`] maps a Rust
//! type to and from that text:
//!
//! | Type | Text |
//! |------|------|
//! | `i8`..`i64`, `isize`, `u8`..`u64`, `usize` | decimal digits, optional sign |
//! | `bool` | `true` or `false` |
//! | `f32`, `f64` | shortest round-tripping decimal, `.` separator regardless of locale |
//! | `String` | the literal text |
//!
//! The module also holds the quoting rules shared by the output stream and the base64
//! chunking used for raw binary payloads.

use base64::prelude::*;

/// Type name marking a group of base64 chunks.
pub const BASE64_TYPE: &str = "BASE64";

/// Type name written for an absent pointer.
pub const NULL_TYPE: &str = "NULL";

/// Type name marking a group captured as raw code.
pub const CODE_TYPE: &str = "CODE";

/// A value stored as one VALUE event.
pub trait Primitive: Sized {
    /// Human-readable kind, used in conversion errors.
    const KIND: &'static str;

    fn encode(&self) -> String;

    fn decode(text: &str) -> Option<Self>;
}

macro_rules! impl_primitive_int {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const KIND: &'static str = $kind;

                fn encode(&self) -> String {
                    self.to_string()
                }

                fn decode(text: &str) -> Option<Self> {
                    text.parse().ok()
                }
            }
        )*
    };
}

impl_primitive_int! {
    i8 => "signed char",
    i16 => "short integer",
    i32 => "integer",
    i64 => "long integer",
    isize => "integer",
    u8 => "unsigned char",
    u16 => "unsigned short integer",
    u32 => "unsigned integer",
    u64 => "unsigned long integer",
    usize => "unsigned integer",
}

impl Primitive for bool {
    const KIND: &'static str = "boolean";

    fn encode(&self) -> String {
        let text = if *self { "true" } else { "false" };
        text.to_string()
    }

    fn decode(text: &str) -> Option<Self> {
        match text {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

impl Primitive for f32 {
    const KIND: &'static str = "float";

    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl Primitive for f64 {
    const KIND: &'static str = "double";

    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

impl Primitive for String {
    const KIND: &'static str = "string";

    fn encode(&self) -> String {
        self.clone()
    }

    fn decode(text: &str) -> Option<Self> {
        Some(text.to_string())
    }
}

/// Returns true if `s` cannot be written as a bare token.
#[inline]
pub fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.starts_with('"')
        || s.chars().any(|ch| {
            ch.is_whitespace()
                || ch.is_control()
                || matches!(ch, '{' | '}' | '=' | '/' | '"' | '\\')
        })
}

/// Appends `s` as a quoted string with backslash escapes.
///
/// `"` and `\` get a backslash, control characters become `\xHH`.
pub fn push_quoted(output: &mut String, s: &str) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            c if (c as u32) < 0x100 && c.is_control() => {
                output.push_str(&format!("\\x{:02X}", c as u32));
            }
            c => output.push(c),
        }
    }
    output.push('"');
}

/// Appends `s` bare when possible, quoted otherwise.
pub fn push_string(output: &mut String, s: &str) {
    if needs_quotes(s) {
        push_quoted(output, s);
    } else {
        output.push_str(s);
    }
}

/// Splits `bytes` into base64 chunks of `chunk_size` source bytes each.
///
/// `chunk_size` is rounded down to a multiple of 3 (minimum 3) so only the last chunk
/// carries padding and every chunk decodes on its own.
pub fn base64_chunks(bytes: &[u8], chunk_size: usize) -> Vec<String> {
    let size = (chunk_size / 3).max(1) * 3;
    bytes
        .chunks(size)
        .map(|chunk| BASE64_STANDARD.encode(chunk))
        .collect()
}

/// Decodes one base64 chunk, appending to `out`.
pub fn decode_base64_chunk(chunk: &str, out: &mut Vec<u8>) -> Result<(), base64::DecodeError> {
    BASE64_STANDARD.decode_vec(chunk.trim(), out)
}
