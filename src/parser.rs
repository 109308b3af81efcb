//! The ATV grammar state machine and the interpreter protocol.
//!
//! ## Grammar
//!
//! ```text
//! type { ... }               anonymous typed group
//! attribute = type { ... }   named typed group
//! attribute = value          named value
//! value                      anonymous value
//! { ... }                    anonymous untyped group
//! ```
//!
//! The [`Parser`] consumes tokens and produces one [`Event`] per step, with the
//! (attribute, type, value) triple of the event available through accessors.
//!
//! ## Driving the parser
//!
//! - **Pull mode**: [`Parser::next_event`] advances exactly one event.
//! - **Interpreter mode**: [`Parser::parse`] feeds every event of the current scope to an
//!   [`Interpreter`] until that scope's FINISHED. [`Parser::stop`] ends every running
//!   `parse`, nested ones included.
//!
//! While handling a GROUP event an interpreter may hand the group's content to another
//! interpreter by calling [`Parser::parse`] again. The nested call returns at the group's
//! FINISHED, so the outer interpreter resumes with its own state and position intact.
//!
//! ```rust
//! use atv::{Event, Parser};
//!
//! let mut parser = Parser::from_str("foo { bar = 1 }");
//! assert_eq!(parser.next_event().unwrap(), Event::Start);
//! assert_eq!(parser.next_event().unwrap(), Event::Group);
//! assert_eq!(parser.type_name(), Some("foo"));
//! assert_eq!(parser.next_event().unwrap(), Event::Value);
//! assert_eq!(parser.attribute(), Some("bar"));
//! assert_eq!(parser.value(), Some("1"));
//! ```

use crate::lexer::{Lexer, Token};
use crate::{Error, Result};
use std::fmt;
use std::io;

/// Kind of the event the parser stopped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Start,
    Value,
    Group,
    Finished,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Event::Start => "START",
            Event::Value => "VALUE",
            Event::Group => "GROUP",
            Event::Finished => "FINISHED",
        })
    }
}

/// Consumer of parser events.
///
/// `interpret` is called once per event. Returning `Ok(false)` rejects the event and
/// aborts parsing with a semantic error.
pub trait Interpreter {
    fn interpret(&mut self, parser: &mut Parser) -> Result<bool>;
}

impl<F> Interpreter for F
where
    F: FnMut(&mut Parser) -> Result<bool>,
{
    fn interpret(&mut self, parser: &mut Parser) -> Result<bool> {
        self(parser)
    }
}

/// The null interpreter: accepts and discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ignore;

impl Interpreter for Ignore {
    fn interpret(&mut self, _parser: &mut Parser) -> Result<bool> {
        Ok(true)
    }
}

#[derive(Debug)]
enum State {
    Entry,
    AfterString(String),
    AfterEquals(String),
    AfterValue(String, String),
}

/// Streaming ATV parser.
pub struct Parser {
    lexer: Lexer,
    state: State,
    lookahead: Option<Token>,
    what: Event,
    attribute: Option<String>,
    type_name: Option<String>,
    value: Option<String>,
    depth: usize,
    counters: Vec<usize>, // Entries seen so far, one counter per open scope
    position: usize,
    started: bool,
    done: bool,
    stopped: bool,
    frames: usize, // Active parse/restore calls
    fresh_group: bool,
    failure: Option<Error>,
    diagnostics: String,
    source_name: Option<String>,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Parser {
            lexer,
            state: State::Entry,
            lookahead: None,
            what: Event::Start,
            attribute: None,
            type_name: None,
            value: None,
            depth: 0,
            counters: vec![0],
            position: 0,
            started: false,
            done: false,
            stopped: false,
            frames: 0,
            fresh_group: false,
            failure: None,
            diagnostics: String::new(),
            source_name: None,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Self {
        Parser::new(Lexer::new(input))
    }

    /// Reads the whole reader and parses its contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading fails or the input is not UTF-8.
    pub fn from_reader<R: io::Read>(mut reader: R) -> Result<Self> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(Parser::new(Lexer::new(source)))
    }

    /// Names the source (a file name, say) in accumulated diagnostics.
    #[must_use]
    pub fn with_source_name(mut self, name: &str) -> Self {
        self.source_name = Some(name.to_string());
        self
    }

    pub fn what(&self) -> Event {
        self.what
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Current nesting depth. A GROUP event reports the depth of its children, a
    /// FINISHED event the depth of the scope it returned to.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Zero-based index of the current entry within its enclosing group.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn line(&self) -> usize {
        self.lexer.line()
    }

    /// True once the document's final FINISHED was produced.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Diagnostics accumulated by failed calls, one line per error.
    pub fn error_text(&self) -> &str {
        &self.diagnostics
    }

    /// Ends every running [`Parser::parse`], nested ones included, once the current event
    /// is handled. The parser stays on that event; [`Parser::next_event`] continues from it.
    pub fn stop(&mut self) {
        self.stopped = true;
    }

    /// True while a [`Parser::stop`] is unwinding the running interpreters.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Advances exactly one event.
    ///
    /// The first call yields [`Event::Start`]. Once the document is finished every call
    /// yields [`Event::Finished`] again.
    ///
    /// # Errors
    ///
    /// Returns a lexical or syntax error for malformed input. Errors are terminal: later
    /// calls return the same error.
    pub fn next_event(&mut self) -> Result<Event> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        self.fresh_group = false;
        if !self.started {
            self.started = true;
            self.set_triple(Event::Start, None, None, None);
            self.position = 0;
            return Ok(self.emit());
        }
        if self.done {
            self.set_triple(Event::Finished, None, None, None);
            return Ok(Event::Finished);
        }

        loop {
            let token = match self.lookahead.take() {
                Some(token) => token,
                None => self.lexer.next_token(),
            };
            let state = std::mem::replace(&mut self.state, State::Entry);
            match (state, token) {
                (_, Token::Error(msg)) => {
                    let err = Error::lexical(self.line(), &msg, self.lexer.line_text());
                    return Err(self.fail(err));
                }
                (State::Entry, Token::String(s)) => self.state = State::AfterString(s),
                (State::Entry, Token::OpenBrace) => return Ok(self.open_group(None, None)),
                (State::Entry, Token::CloseBrace) => return self.close_group(),
                (State::Entry, Token::Eof) => return self.finish_document(),
                (State::AfterString(s), Token::OpenBrace) => {
                    return Ok(self.open_group(None, Some(s)))
                }
                (State::AfterString(s), Token::Equals) => self.state = State::AfterEquals(s),
                (State::AfterString(s), other) => {
                    self.lookahead = Some(other);
                    return Ok(self.emit_value(None, s));
                }
                (State::AfterEquals(a), Token::String(v)) => self.state = State::AfterValue(a, v),
                (State::AfterValue(a, t), Token::OpenBrace) => {
                    return Ok(self.open_group(Some(a), Some(t)))
                }
                (State::AfterValue(a, v), other) => {
                    self.lookahead = Some(other);
                    return Ok(self.emit_value(Some(a), v));
                }
                (_, token) => return Err(self.unexpected(&token)),
            }
        }
    }

    /// Feeds events to `interpreter` until the FINISHED of the scope this call started
    /// in, or until [`Parser::stop`] is called.
    ///
    /// Called on a fresh parser this runs the whole document, START included. Called from
    /// inside a GROUP event, before any child was read, it delegates that group's content
    /// to `interpreter`.
    ///
    /// # Errors
    ///
    /// Fails on malformed input, when called anywhere else than on a fresh parser or a
    /// freshly opened group, when the interpreter returns an error, or when it rejects an
    /// event by returning `Ok(false)`.
    pub fn parse(&mut self, interpreter: &mut dyn Interpreter) -> Result<()> {
        let start = self.enter_scope()?;
        let result = self.run(interpreter, start);
        self.leave_scope();
        result
    }

    fn run(&mut self, interpreter: &mut dyn Interpreter, start: usize) -> Result<()> {
        loop {
            let event = self.next_event()?;
            let closing = event == Event::Finished && (self.depth < start || self.done);
            match interpreter.interpret(self) {
                Ok(true) => {}
                Ok(false) => {
                    let err = self.rejected("interpreter rejected");
                    return Err(self.fail(err));
                }
                Err(err) => return Err(self.fail(err)),
            }
            if self.stopped || closing {
                return Ok(());
            }
        }
    }

    /// Opens a delegation frame and returns the depth its scope ends below.
    ///
    /// Only a fresh parser or a GROUP event whose first child was not read yet can be
    /// handed to a new consumer.
    pub(crate) fn enter_scope(&mut self) -> Result<usize> {
        if self.started && !(self.what == Event::Group && self.fresh_group) {
            let err = Error::semantic(
                self.line(),
                &format!(
                    "cannot delegate on {} event, only on a freshly opened group",
                    self.what
                ),
                &self.triple_context(),
            );
            return Err(self.fail(err));
        }
        if self.frames == 0 {
            self.stopped = false;
        }
        self.frames += 1;
        Ok(self.depth)
    }

    /// Closes a frame opened by [`Parser::enter_scope`]; the outermost one clears a stop.
    pub(crate) fn leave_scope(&mut self) {
        self.frames = self.frames.saturating_sub(1);
        if self.frames == 0 {
            self.stopped = false;
        }
    }

    /// Skips the group just opened with the null interpreter.
    ///
    /// # Errors
    ///
    /// Fails off a freshly opened group or if the skipped content is malformed.
    pub fn skip_group(&mut self) -> Result<()> {
        self.parse(&mut Ignore)
    }

    /// Captures the raw body of the group just opened and closes that group.
    ///
    /// Only valid directly on a GROUP event. The captured text excludes the enclosing
    /// braces; quoted strings and comments inside are copied verbatim. No FINISHED is
    /// produced for the captured group.
    ///
    /// # Errors
    ///
    /// Fails if the current event is not a freshly opened group or the block is
    /// unterminated.
    pub fn get_code(&mut self) -> Result<String> {
        if self.what != Event::Group || !self.fresh_group {
            let err = Error::syntax(
                self.line(),
                "code capture requires a freshly opened group",
                "",
            );
            return Err(self.fail(err));
        }
        self.fresh_group = false;
        match self.lexer.capture_block() {
            Token::String(text) => {
                self.counters.pop();
                self.depth -= 1;
                log::trace!("captured {} bytes of code at depth {}", text.len(), self.depth);
                Ok(text)
            }
            Token::Error(msg) => {
                let err = Error::lexical(self.line(), &msg, self.lexer.line_text());
                Err(self.fail(err))
            }
            other => {
                let err = Error::syntax(self.line(), &format!("unexpected {}", other), "");
                Err(self.fail(err))
            }
        }
    }

    /// Records `error` as the terminal failure of this parser and returns it.
    ///
    /// Only the first failure is recorded; later calls return it unchanged.
    pub fn fail(&mut self, error: Error) -> Error {
        if let Some(existing) = &self.failure {
            return existing.clone();
        }
        let line = match &self.source_name {
            Some(name) => format!("{}:{}: {}", name, self.line(), error),
            None => format!("{}: {}", self.line(), error),
        };
        log::debug!("parse failed: {}", line);
        self.diagnostics.push_str(&line);
        self.diagnostics.push('\n');
        self.failure = Some(error.clone());
        error
    }

    /// Builds a semantic error describing the current event and its triple.
    pub fn rejected(&self, msg: &str) -> Error {
        Error::semantic(
            self.line(),
            &format!("{} {} event", msg, self.what),
            &self.triple_context(),
        )
    }

    fn triple_context(&self) -> String {
        let mut context = String::new();
        if let Some(attribute) = &self.attribute {
            context.push_str(&format!("attribute='{}' ", attribute));
        }
        if let Some(type_name) = &self.type_name {
            context.push_str(&format!("type='{}' ", type_name));
        }
        if let Some(value) = &self.value {
            context.push_str(&format!("value='{}' ", value));
        }
        context.trim_end().to_string()
    }

    fn unexpected(&mut self, token: &Token) -> Error {
        let err = Error::syntax(
            self.line(),
            &format!("unexpected {}", token),
            self.lexer.line_text(),
        );
        self.fail(err)
    }

    fn set_triple(
        &mut self,
        what: Event,
        attribute: Option<String>,
        type_name: Option<String>,
        value: Option<String>,
    ) {
        self.what = what;
        self.attribute = attribute;
        self.type_name = type_name;
        self.value = value;
    }

    fn next_position(&mut self) -> usize {
        let counter = &mut self.counters[self.depth];
        let position = *counter;
        *counter += 1;
        position
    }

    fn emit(&self) -> Event {
        log::trace!(
            "{} depth={} position={} {}",
            self.what,
            self.depth,
            self.position,
            self.triple_context()
        );
        self.what
    }

    fn emit_value(&mut self, attribute: Option<String>, value: String) -> Event {
        self.position = self.next_position();
        self.set_triple(Event::Value, attribute, None, Some(value));
        self.emit()
    }

    fn open_group(&mut self, attribute: Option<String>, type_name: Option<String>) -> Event {
        self.position = self.next_position();
        self.depth += 1;
        self.counters.push(0);
        self.fresh_group = true;
        self.set_triple(Event::Group, attribute, type_name, None);
        self.emit()
    }

    fn close_group(&mut self) -> Result<Event> {
        if self.depth == 0 {
            return Err(self.unexpected(&Token::CloseBrace));
        }
        self.position = self.counters.pop().unwrap_or(0);
        self.depth -= 1;
        self.set_triple(Event::Finished, None, None, None);
        Ok(self.emit())
    }

    fn finish_document(&mut self) -> Result<Event> {
        if self.depth > 0 {
            let err = Error::syntax(
                self.line(),
                &format!("unexpected end of input, {} unclosed group(s)", self.depth),
                self.lexer.line_text(),
            );
            return Err(self.fail(err));
        }
        self.position = self.counters[0];
        self.done = true;
        self.set_triple(Event::Finished, None, None, None);
        log::debug!("document finished after {} top-level entries", self.position);
        Ok(self.emit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Seen {
        what: Event,
        attribute: Option<String>,
        type_name: Option<String>,
        value: Option<String>,
        depth: usize,
        position: usize,
    }

    fn record(parser: &Parser) -> Seen {
        Seen {
            what: parser.what(),
            attribute: parser.attribute().map(str::to_string),
            type_name: parser.type_name().map(str::to_string),
            value: parser.value().map(str::to_string),
            depth: parser.depth(),
            position: parser.position(),
        }
    }

    fn events(input: &str) -> Result<Vec<Event>> {
        let mut parser = Parser::from_str(input);
        let mut out = Vec::new();
        loop {
            let event = parser.next_event()?;
            out.push(event);
            if parser.is_done() {
                return Ok(out);
            }
        }
    }

    use Event::{Finished, Group, Start, Value};

    #[test]
    fn test_entry_forms() {
        let mut parser = Parser::from_str("a = 1 b c { } d = e { } { }");
        let mut seen = Vec::new();
        while !parser.is_done() {
            parser.next_event().unwrap();
            seen.push(record(&parser));
        }
        let s = |x: &str| Some(x.to_string());
        let seen_at = |what: Event,
                       attribute: Option<String>,
                       type_name: Option<String>,
                       value: Option<String>,
                       depth: usize,
                       position: usize| Seen {
            what,
            attribute,
            type_name,
            value,
            depth,
            position,
        };
        assert_eq!(seen[1], seen_at(Value, s("a"), None, s("1"), 0, 0));
        assert_eq!(seen[2], seen_at(Value, None, None, s("b"), 0, 1));
        assert_eq!(seen[3], seen_at(Group, None, s("c"), None, 1, 2));
        assert_eq!(seen[4].what, Finished);
        assert_eq!(seen[5], seen_at(Group, s("d"), s("e"), None, 1, 3));
        assert_eq!(seen[7], seen_at(Group, None, None, None, 1, 4));
        assert_eq!(seen[9], seen_at(Finished, None, None, None, 0, 5));
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_single_step_sequence() {
        assert_eq!(
            events("foo { bar = 1 baz = \"hi\" }").unwrap(),
            vec![Start, Group, Value, Value, Finished, Finished]
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(events("").unwrap(), vec![Start, Finished]);
        assert_eq!(events("  // only a comment\n").unwrap(), vec![Start, Finished]);
    }

    #[test]
    fn test_finished_repeats_after_document_end() {
        let mut parser = Parser::from_str("x");
        while !parser.is_done() {
            parser.next_event().unwrap();
        }
        assert_eq!(parser.next_event().unwrap(), Finished);
        assert_eq!(parser.next_event().unwrap(), Finished);
    }

    #[test]
    fn test_missing_value_is_syntax_error() {
        let err = events("foo { bar = }").unwrap_err();
        match err {
            Error::Syntax { msg, line, .. } => {
                assert!(msg.contains("'}'"), "message was {}", msg);
                assert_eq!(line, 1);
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_unbalanced_braces() {
        assert!(matches!(events("a { b"), Err(Error::Syntax { .. })));
        assert!(matches!(events("a }"), Err(Error::Syntax { .. })));
        assert!(matches!(events("= a"), Err(Error::Syntax { .. })));
    }

    #[test]
    fn test_failure_is_terminal_and_recorded() {
        let mut parser = Parser::from_str("a {\n b = \n}").with_source_name("doc.atv");
        let first = loop {
            match parser.next_event() {
                Ok(_) => continue,
                Err(err) => break err,
            }
        };
        assert_eq!(parser.next_event().unwrap_err(), first);
        assert!(parser.error_text().starts_with("doc.atv:3:"));
        assert_eq!(parser.error_text().matches("Syntax error").count(), 1);
    }

    #[test]
    fn test_lexical_error_surfaces() {
        assert!(matches!(events("a = \"open"), Err(Error::Lexical { .. })));
    }

    #[test]
    fn test_interpreter_runs_whole_document() {
        let mut seen = Vec::new();
        let mut parser = Parser::from_str("a = 1 g { b = 2 }");
        parser
            .parse(&mut |p: &mut Parser| -> Result<bool> {
                seen.push((p.what(), p.depth()));
                Ok(true)
            })
            .unwrap();
        assert_eq!(
            seen,
            vec![(Start, 0), (Value, 0), (Group, 1), (Value, 1), (Finished, 0), (Finished, 0)]
        );
    }

    #[test]
    fn test_interpreter_rejection() {
        let mut parser = Parser::from_str("a = 1 b = 2");
        let err = parser
            .parse(&mut |p: &mut Parser| -> Result<bool> { Ok(p.attribute() != Some("b")) })
            .unwrap_err();
        match err {
            Error::Semantic { context, .. } => assert!(context.contains("attribute='b'")),
            other => panic!("expected semantic error, got {:?}", other),
        }
        assert!(!parser.error_text().is_empty());
    }

    struct Counter {
        values: usize,
        nested: Vec<usize>,
    }

    impl Interpreter for Counter {
        fn interpret(&mut self, parser: &mut Parser) -> Result<bool> {
            match parser.what() {
                Event::Value => self.values += 1,
                Event::Group => {
                    let mut inner = Counter { values: 0, nested: Vec::new() };
                    parser.parse(&mut inner)?;
                    self.nested.push(inner.values);
                }
                Event::Start | Event::Finished => {}
            }
            Ok(true)
        }
    }

    #[test]
    fn test_nested_delegation_restores_outer_scope() {
        let mut parser = Parser::from_str("x = 1 g { a b c } y = 2 h { k { z } }");
        let mut counter = Counter { values: 0, nested: Vec::new() };
        parser.parse(&mut counter).unwrap();
        assert_eq!(counter.values, 2);
        assert_eq!(counter.nested, vec![3, 0]);
        assert!(parser.is_done());
    }

    #[test]
    fn test_position_survives_delegation() {
        let mut positions = Vec::new();
        let mut parser = Parser::from_str("a g { b c } d");
        parser
            .parse(&mut |p: &mut Parser| -> Result<bool> {
                if p.what() == Event::Group {
                    p.skip_group()?;
                } else if p.what() == Event::Value {
                    positions.push(p.position());
                }
                Ok(true)
            })
            .unwrap();
        assert_eq!(positions, vec![0, 2]);
    }

    #[test]
    fn test_stop_ends_parse_early() {
        let mut parser = Parser::from_str("a b c");
        let mut count = 0;
        parser
            .parse(&mut |p: &mut Parser| -> Result<bool> {
                count += 1;
                if p.value() == Some("b") {
                    p.stop();
                }
                Ok(true)
            })
            .unwrap();
        assert_eq!(count, 3);
        assert_eq!(parser.next_event().unwrap(), Event::Value);
        assert_eq!(parser.value(), Some("c"));
    }

    #[test]
    fn test_stop_in_delegated_group_ends_every_parse() {
        let mut parser = Parser::from_str("g { a b c } d");
        let mut outer = Vec::new();
        let mut inner = Vec::new();
        parser
            .parse(&mut |p: &mut Parser| -> Result<bool> {
                outer.push(p.what());
                if p.what() == Event::Group {
                    p.parse(&mut |q: &mut Parser| -> Result<bool> {
                        inner.push(q.value().map(str::to_string));
                        if q.value() == Some("a") {
                            q.stop();
                        }
                        Ok(true)
                    })?;
                }
                Ok(true)
            })
            .unwrap();
        assert_eq!(outer, vec![Start, Group]);
        assert_eq!(inner, vec![Some("a".to_string())]);
        assert!(!parser.is_stopped());
        assert_eq!(parser.depth(), 1);
        assert_eq!(parser.next_event().unwrap(), Value);
        assert_eq!(parser.value(), Some("b"));
    }

    #[test]
    fn test_delegation_from_value_is_rejected() {
        let mut parser = Parser::from_str("x y z");
        let mut inner_events = 0;
        let err = parser
            .parse(&mut |p: &mut Parser| -> Result<bool> {
                if p.what() == Event::Value {
                    p.parse(&mut |_: &mut Parser| -> Result<bool> {
                        inner_events += 1;
                        Ok(true)
                    })?;
                }
                Ok(true)
            })
            .unwrap_err();
        match err {
            Error::Semantic { msg, .. } => assert!(msg.contains("VALUE"), "message was {}", msg),
            other => panic!("expected semantic error, got {:?}", other),
        }
        assert_eq!(inner_events, 0);
        assert_eq!(parser.error_text().matches("cannot delegate").count(), 1);
    }

    #[test]
    fn test_delegation_after_first_child_is_rejected() {
        let mut parser = Parser::from_str("g { a b }");
        parser.next_event().unwrap();
        assert_eq!(parser.next_event().unwrap(), Group);
        assert_eq!(parser.next_event().unwrap(), Value);
        assert!(matches!(parser.skip_group(), Err(Error::Semantic { .. })));
    }

    #[test]
    fn test_get_code() {
        let mut parser = Parser::from_str("script = CODE { if (a) { b(\"}\") } } after = 1");
        parser.next_event().unwrap();
        assert_eq!(parser.next_event().unwrap(), Event::Group);
        assert_eq!(parser.get_code().unwrap(), " if (a) { b(\"}\") } ");
        assert_eq!(parser.depth(), 0);
        assert_eq!(parser.next_event().unwrap(), Event::Value);
        assert_eq!(parser.attribute(), Some("after"));
        assert_eq!(parser.position(), 1);
        assert_eq!(parser.next_event().unwrap(), Event::Finished);
        assert!(parser.is_done());
    }

    #[test]
    fn test_get_code_outside_group_fails() {
        let mut parser = Parser::from_str("a = 1");
        parser.next_event().unwrap();
        parser.next_event().unwrap();
        assert!(parser.get_code().is_err());
    }
}
