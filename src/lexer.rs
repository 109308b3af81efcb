//! Tokenizer for ATV text.
//!
//! The lexer turns characters into [`Token`]s: bare and quoted strings, the three
//! punctuation atoms `{`, `}` and `=`, end of input, and error tokens carrying a message.
//! Comments (`// ...` and `/* ... */`) and whitespace are skipped.
//!
//! ```text
//! width = 640                  // bare strings
//! label = "OK \"now\"\x0a"     // quoted, with escapes
//! ```
//!
//! Besides token mode the lexer has a capture mode, [`Lexer::capture_block`], which reads
//! the raw text of a brace-balanced block without tokenizing it.

use std::fmt;

/// A lexical atom.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    String(String),
    OpenBrace,
    CloseBrace,
    Equals,
    Eof,
    Error(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::String(s) => write!(f, "string \"{}\"", s),
            Token::OpenBrace => f.write_str("'{'"),
            Token::CloseBrace => f.write_str("'}'"),
            Token::Equals => f.write_str("'='"),
            Token::Eof => f.write_str("end of input"),
            Token::Error(msg) => write!(f, "error ({})", msg),
        }
    }
}

/// Character-level scanner over an owned source text.
pub struct Lexer {
    input: String,
    position: usize,
    line: usize,
    line_text: String, // Characters read so far on the current line
}

impl Lexer {
    pub fn new(input: impl Into<String>) -> Self {
        Lexer {
            input: input.into(),
            position: 0,
            line: 1,
            line_text: String::new(),
        }
    }

    /// Current line number, starting at 1.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// The text read so far on the current line, for diagnostics.
    #[must_use]
    pub fn line_text(&self) -> &str {
        &self.line_text
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.line_text.clear();
        } else {
            self.line_text.push(ch);
        }
        Some(ch)
    }

    /// Reads the next token.
    pub fn next_token(&mut self) -> Token {
        loop {
            let ch = match self.peek_char() {
                Some(ch) => ch,
                None => return Token::Eof,
            };
            match ch {
                c if c.is_whitespace() => {
                    self.next_char();
                }
                '/' => {
                    if let Some(err) = self.skip_comment() {
                        return err;
                    }
                }
                '{' => {
                    self.next_char();
                    return Token::OpenBrace;
                }
                '}' => {
                    self.next_char();
                    return Token::CloseBrace;
                }
                '=' => {
                    self.next_char();
                    return Token::Equals;
                }
                '"' => return self.quoted_string(),
                _ => return self.bare_string(),
            }
        }
    }

    /// Skips a comment starting at the current `/`. Returns an error token if the
    /// comment is malformed.
    fn skip_comment(&mut self) -> Option<Token> {
        self.next_char(); // consume '/'
        match self.next_char() {
            Some('/') => {
                while let Some(ch) = self.next_char() {
                    if ch == '\n' {
                        break;
                    }
                }
                None
            }
            Some('*') => {
                let mut star = false;
                while let Some(ch) = self.next_char() {
                    if star && ch == '/' {
                        return None;
                    }
                    star = ch == '*';
                }
                Some(Token::Error("unterminated block comment".to_string()))
            }
            Some(other) => Some(Token::Error(format!(
                "unexpected character '{}' after '/'",
                other
            ))),
            None => Some(Token::Error("unexpected end of input after '/'".to_string())),
        }
    }

    fn bare_string(&mut self) -> Token {
        let start = self.position;
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() || matches!(ch, '{' | '}' | '=' | '/') {
                break;
            }
            self.next_char();
        }
        Token::String(self.input[start..self.position].to_string())
    }

    fn quoted_string(&mut self) -> Token {
        self.next_char(); // consume opening quote
        let mut result = String::new();

        while let Some(ch) = self.next_char() {
            match ch {
                '"' => return Token::String(result),
                '\\' => match self.next_char() {
                    Some('x') | Some('X') => match self.hex_byte() {
                        Some(byte) => result.push(char::from(byte)),
                        None => {
                            return Token::Error(
                                "invalid \\x escape (expected 2 hex digits)".to_string(),
                            )
                        }
                    },
                    Some(other) => result.push(other),
                    None => break,
                },
                other => result.push(other),
            }
        }
        Token::Error("unterminated string".to_string())
    }

    fn hex_byte(&mut self) -> Option<u8> {
        let mut byte = 0u8;
        for _ in 0..2 {
            let digit = self.peek_char()?.to_digit(16)?;
            self.next_char();
            byte = byte * 16 + digit as u8;
        }
        Some(byte)
    }

    /// Captures the raw text of a block whose opening `{` was already consumed.
    ///
    /// Nested braces must balance; braces inside quoted strings and comments do not
    /// count. The closing `}` is consumed but not part of the result. Returns
    /// [`Token::String`] with the captured text or [`Token::Error`].
    pub fn capture_block(&mut self) -> Token {
        let mut text = String::new();
        let mut level = 1usize;

        while let Some(ch) = self.next_char() {
            match ch {
                '{' => level += 1,
                '}' => {
                    level -= 1;
                    if level == 0 {
                        return Token::String(text);
                    }
                }
                '"' => {
                    text.push(ch);
                    if !self.copy_quoted(&mut text) {
                        return Token::Error("unterminated string in code block".to_string());
                    }
                    continue;
                }
                '/' if self.peek_char() == Some('/') => {
                    text.push(ch);
                    while let Some(c) = self.next_char() {
                        text.push(c);
                        if c == '\n' {
                            break;
                        }
                    }
                    continue;
                }
                '/' if self.peek_char() == Some('*') => {
                    text.push(ch);
                    if !self.copy_block_comment(&mut text) {
                        return Token::Error("unterminated comment in code block".to_string());
                    }
                    continue;
                }
                _ => {}
            }
            text.push(ch);
        }
        Token::Error("unterminated code block".to_string())
    }

    fn copy_quoted(&mut self, text: &mut String) -> bool {
        while let Some(ch) = self.next_char() {
            text.push(ch);
            match ch {
                '"' => return true,
                '\\' => match self.next_char() {
                    Some(c) => text.push(c),
                    None => return false,
                },
                _ => {}
            }
        }
        false
    }

    fn copy_block_comment(&mut self, text: &mut String) -> bool {
        if let Some(c) = self.next_char() {
            text.push(c); // the '*'
        }
        let mut star = false;
        while let Some(ch) = self.next_char() {
            text.push(ch);
            if star && ch == '/' {
                return true;
            }
            star = ch == '*';
        }
        false
    }
}
