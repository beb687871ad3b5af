//! The single-segment reader: the main state machine (§4.13) layered
//! over the byte cursor and the scanner/extended-literal primitives.
//!
//! Mirrors the shape of the teacher's `frontend/lexer` module: one
//! parent file owning the struct and the cursor/dispatch core, with
//! the leaf scanners split into child files (`scanner/`, `extended/`)
//! that reach into `Reader`'s fields directly, the way
//! `frontend/lexer/numbers.rs` and `frontend/lexer/escape.rs` reach
//! into `Lexer`'s fields from alongside `frontend/lexer/mod.rs`.

mod extended;
mod scanner;
mod skip;
mod text_equals;

use crate::container::ContainerKind;
use crate::error::{ReasonCode, RdnError};
use crate::options::ReaderOptions;
use crate::position::Position;
use crate::state::{Expect, ReaderState};
use crate::token::{TokenKind, ValueSequence};

/// The outcome of one internal dispatch step.
pub(crate) enum StepOutcome {
    /// A token was produced; `read()` returns `Ok(true)`.
    TokenEmitted,
    /// A structural byte (`:`, `,`, `=>`) was consumed without
    /// producing a token; the dispatch loop runs again immediately.
    ContinueLoop,
    /// The buffer ended mid-token; `read()` rolls back and returns
    /// `Ok(false)`.
    NeedMoreData,
}

/// A forward-only, zero-copy reader over one contiguous buffer.
///
/// `Reader` never spans more than the buffer it was constructed with:
/// when a token would require bytes beyond the end of `buf`, `read()`
/// returns `Ok(false)` with every observable field restored to its
/// pre-call value (§3 invariant 6). Resuming across a segment
/// boundary is the job of [`crate::MultiSegmentReader`], which
/// constructs a fresh `Reader` from a saved [`ReaderState`] and a new
/// buffer.
pub struct Reader<'a> {
    buf: &'a [u8],
    is_final_block: bool,
    state: ReaderState,
    token_start_index: usize,
    value_start: usize,
    value_end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a reader over `buf` with default options.
    pub fn new(buf: &'a [u8], is_final_block: bool) -> Self {
        Self::with_options(buf, is_final_block, ReaderOptions::default())
    }

    /// Creates a reader over `buf` with explicit options.
    pub fn with_options(buf: &'a [u8], is_final_block: bool, options: ReaderOptions) -> Self {
        Self {
            buf,
            is_final_block,
            state: ReaderState::new(options),
            token_start_index: 0,
            value_start: 0,
            value_end: 0,
        }
    }

    /// Creates a reader over a new buffer `buf`, resuming from a
    /// previously saved [`ReaderState`] (§6.3 `new(buffer,
    /// is_final_block, state)`).
    pub fn from_state(buf: &'a [u8], is_final_block: bool, state: ReaderState) -> Self {
        Self {
            buf,
            is_final_block,
            state,
            token_start_index: 0,
            value_start: 0,
            value_end: 0,
        }
    }

    // ---- public accessors (§6.3) ------------------------------------

    pub fn token_kind(&self) -> TokenKind {
        self.state.current_kind
    }

    /// The token's value as a byte slice borrowed from `buf`. Empty for
    /// structural tokens (`StartObject`, `EndArray`, ...).
    pub fn value_span(&self) -> &'a [u8] {
        &self.buf[self.value_start..self.value_end]
    }

    /// Always `None` for a single-segment `Reader`; straddling values
    /// are only ever produced by [`crate::MultiSegmentReader`].
    pub fn value_sequence(&self) -> Option<&ValueSequence> {
        None
    }

    pub fn has_value_sequence(&self) -> bool {
        false
    }

    pub fn value_is_escaped(&self) -> bool {
        self.state.value_is_escaped
    }

    pub fn token_start_index(&self) -> usize {
        self.token_start_index
    }

    pub fn bytes_consumed(&self) -> usize {
        self.state.bytes_consumed
    }

    pub fn current_depth(&self) -> usize {
        self.state.container_stack.current_depth()
    }

    pub fn position(&self) -> Position {
        self.state.position
    }

    /// A cloneable snapshot that a later `Reader` can resume from.
    pub fn current_state(&self) -> ReaderState {
        self.state.clone()
    }

    pub fn is_final_block(&self) -> bool {
        self.is_final_block
    }

    pub fn is_in_array(&self) -> bool {
        self.state.container_stack.is_in_array()
    }

    pub fn options(&self) -> ReaderOptions {
        self.state.options
    }

    // ---- the read step -----------------------------------------------

    /// Advances to the next token. Returns `Ok(true)` with the token
    /// accessors valid, `Ok(false)` if the buffer ended mid-token (not
    /// an error; state is unchanged), or `Err` on a syntax error.
    pub fn read(&mut self) -> Result<bool, RdnError> {
        let snapshot = self.state.clone();
        match self.read_inner() {
            Ok(true) => Ok(true),
            Ok(false) => {
                self.state = snapshot;
                Ok(false)
            }
            Err(err) => {
                self.state = snapshot;
                Err(err)
            }
        }
    }

    fn read_inner(&mut self) -> Result<bool, RdnError> {
        loop {
            match self.skip_whitespace_and_comments()? {
                scanner::whitespace::SkipOutcome::NeedMoreData => return Ok(false),
                scanner::whitespace::SkipOutcome::CommentEmitted => return Ok(true),
                scanner::whitespace::SkipOutcome::Done => {}
            }

            if self.current_byte().is_none() {
                return self.handle_eof();
            }

            match self.step()? {
                StepOutcome::TokenEmitted => return Ok(true),
                StepOutcome::ContinueLoop => continue,
                StepOutcome::NeedMoreData => return Ok(false),
            }
        }
    }

    fn handle_eof(&mut self) -> Result<bool, RdnError> {
        if self.current_depth() != 0 {
            return if self.is_final_block {
                Err(self.error(ReasonCode::ZeroDepthAtEnd))
            } else {
                Ok(false)
            };
        }
        if self.state.expect == Expect::RootValue {
            return if self.is_final_block {
                Err(self.error(ReasonCode::ExpectedStartOfValueNotFound))
            } else {
                Ok(false)
            };
        }
        Ok(false)
    }

    fn step(&mut self) -> Result<StepOutcome, RdnError> {
        match self.state.expect {
            Expect::RootValue => {
                let b0 = self.current_byte().expect("checked by caller");
                self.consume_value_dispatch(b0)
            }
            Expect::AfterRoot => {
                if !self.state.options.allow_multiple_values {
                    return Err(self.error(ReasonCode::ExpectedEndAfterSingleRdn));
                }
                let b0 = self.current_byte().expect("checked by caller");
                self.consume_value_dispatch(b0)
            }

            Expect::ObjectJustOpened => self.object_key_or_close(false),
            Expect::ObjectAfterComma => self.object_key_or_close(true),
            Expect::ObjectColon => self.consume_colon(),
            Expect::ObjectValue => {
                let b0 = self.current_byte().expect("checked by caller");
                self.consume_value_dispatch(b0)
            }
            Expect::ObjectCommaOrClose => self.comma_or_close(
                b'}',
                ContainerKind::Object,
                TokenKind::EndObject,
                Expect::ObjectAfterComma,
            ),

            Expect::ArrayJustOpened => {
                self.value_or_close(b']', ContainerKind::Array, TokenKind::EndArray, false)
            }
            Expect::ArrayAfterComma => {
                self.value_or_close(b']', ContainerKind::Array, TokenKind::EndArray, true)
            }
            Expect::ArrayCommaOrClose => self.comma_or_close(
                b']',
                ContainerKind::Array,
                TokenKind::EndArray,
                Expect::ArrayAfterComma,
            ),

            Expect::SetJustOpened => {
                self.value_or_close(b'}', ContainerKind::Set, TokenKind::EndSet, false)
            }
            Expect::SetAfterComma => {
                self.value_or_close(b'}', ContainerKind::Set, TokenKind::EndSet, true)
            }
            Expect::SetCommaOrClose => self.comma_or_close(
                b'}',
                ContainerKind::Set,
                TokenKind::EndSet,
                Expect::SetAfterComma,
            ),

            Expect::TupleJustOpened => {
                self.value_or_close(b')', ContainerKind::Tuple, TokenKind::EndArray, false)
            }
            Expect::TupleAfterComma => {
                self.value_or_close(b')', ContainerKind::Tuple, TokenKind::EndArray, true)
            }
            Expect::TupleCommaOrClose => self.comma_or_close(
                b')',
                ContainerKind::Tuple,
                TokenKind::EndArray,
                Expect::TupleAfterComma,
            ),

            Expect::MapJustOpened => self.map_key_or_close(false),
            Expect::MapAfterComma => self.map_key_or_close(true),
            Expect::MapArrow => self.consume_map_arrow(),
            Expect::MapValue => {
                let b0 = self.current_byte().expect("checked by caller");
                self.consume_value_dispatch(b0)
            }
            Expect::MapCommaOrClose => self.comma_or_close(
                b'}',
                ContainerKind::Map,
                TokenKind::EndMap,
                Expect::MapAfterComma,
            ),
        }
    }

    // ---- object / map entry plumbing ---------------------------------

    fn object_key_or_close(&mut self, trailing: bool) -> Result<StepOutcome, RdnError> {
        let b0 = self.current_byte().expect("checked by caller");
        if b0 == b'}' {
            return self.close_container(ContainerKind::Object, TokenKind::EndObject, trailing);
        }
        if b0 == b'"' {
            return self.consume_property_name();
        }
        Err(self.error(ReasonCode::ExpectedStartOfPropertyNotFound))
    }

    fn map_key_or_close(&mut self, trailing: bool) -> Result<StepOutcome, RdnError> {
        let b0 = self.current_byte().expect("checked by caller");
        if b0 == b'}' {
            return self.close_container(ContainerKind::Map, TokenKind::EndMap, trailing);
        }
        self.consume_value_dispatch(b0)
    }

    fn consume_colon(&mut self) -> Result<StepOutcome, RdnError> {
        let b0 = self.current_byte().expect("checked by caller");
        if b0 != b':' {
            return Err(self.error(ReasonCode::ExpectedSeparatorAfterPropertyNameNotFound));
        }
        self.advance_one();
        self.state.expect = Expect::ObjectValue;
        Ok(StepOutcome::ContinueLoop)
    }

    fn consume_map_arrow(&mut self) -> Result<StepOutcome, RdnError> {
        let b0 = self.current_byte().expect("checked by caller");
        if b0 != b'=' {
            return Err(self.error(ReasonCode::ExpectedSeparatorAfterPropertyNameNotFound));
        }
        if self.remaining() < 2 {
            return if self.is_final_block {
                Err(self.error(ReasonCode::ExpectedSeparatorAfterPropertyNameNotFound))
            } else {
                Ok(StepOutcome::NeedMoreData)
            };
        }
        if self.byte_at(1) != Some(b'>') {
            return Err(self.error(ReasonCode::ExpectedSeparatorAfterPropertyNameNotFound));
        }
        self.advance_n(2);
        self.state.expect = Expect::MapValue;
        Ok(StepOutcome::ContinueLoop)
    }

    // ---- value-or-close / comma-or-close helpers ----------------------

    fn value_or_close(
        &mut self,
        close_byte: u8,
        kind: ContainerKind,
        end_kind: TokenKind,
        trailing: bool,
    ) -> Result<StepOutcome, RdnError> {
        let b0 = self.current_byte().expect("checked by caller");
        if b0 == close_byte {
            return self.close_container(kind, end_kind, trailing);
        }
        self.consume_value_dispatch(b0)
    }

    fn comma_or_close(
        &mut self,
        close_byte: u8,
        kind: ContainerKind,
        end_kind: TokenKind,
        after_comma: Expect,
    ) -> Result<StepOutcome, RdnError> {
        let b0 = self.current_byte().expect("checked by caller");
        if b0 == b',' {
            self.advance_one();
            self.state.expect = after_comma;
            return Ok(StepOutcome::ContinueLoop);
        }
        if b0 == close_byte {
            return self.close_container(kind, end_kind, false);
        }
        if matches!(b0, b'}' | b']' | b')') {
            return Err(self.error(ReasonCode::MismatchedObjectArray));
        }
        Err(self.error(ReasonCode::FoundInvalidCharacter))
    }

    fn close_container(
        &mut self,
        expected: ContainerKind,
        end_kind: TokenKind,
        trailing: bool,
    ) -> Result<StepOutcome, RdnError> {
        if trailing && !self.state.options.allow_trailing_commas {
            let reason = if expected == ContainerKind::Object {
                ReasonCode::TrailingCommaNotAllowedBeforeObjectEnd
            } else {
                ReasonCode::TrailingCommaNotAllowedBeforeArrayEnd
            };
            return Err(self.error(reason));
        }
        self.begin_token();
        let popped = self.state.container_stack.pop();
        debug_assert_eq!(popped, Some(expected));
        self.advance_one();
        self.finish_token(end_kind, self.token_start_index, self.token_start_index, false);
        self.after_value_consumed();
        Ok(StepOutcome::TokenEmitted)
    }

    /// Called once a value (scalar, or a container that just closed)
    /// has fully completed, to decide what the enclosing frame expects
    /// next (§3 invariant 4 for maps).
    fn after_value_consumed(&mut self) {
        match self.state.container_stack.top_kind() {
            None => self.state.expect = Expect::AfterRoot,
            Some(ContainerKind::Object) => self.state.expect = Expect::ObjectCommaOrClose,
            Some(ContainerKind::Array) => self.state.expect = Expect::ArrayCommaOrClose,
            Some(ContainerKind::Set) => self.state.expect = Expect::SetCommaOrClose,
            Some(ContainerKind::Tuple) => self.state.expect = Expect::TupleCommaOrClose,
            Some(ContainerKind::Map) => {
                let was_key = self.state.container_stack.map_expects_key();
                self.state.container_stack.flip_map_expectation();
                self.state.expect = if was_key {
                    Expect::MapArrow
                } else {
                    Expect::MapCommaOrClose
                };
            }
        }
    }

    // ---- value dispatch (§6.1 grammar) --------------------------------

    fn consume_value_dispatch(&mut self, b0: u8) -> Result<StepOutcome, RdnError> {
        match b0 {
            b'{' => self.consume_brace(),
            b'[' => self.push_and_emit_start(ContainerKind::Array, TokenKind::StartArray, 1),
            b'(' => self.push_and_emit_start(ContainerKind::Tuple, TokenKind::StartArray, 1),
            b'"' => self.consume_string_value(),
            b'/' => self.consume_regex(),
            b'@' => self.consume_temporal(),
            b'b' if self.byte_at(1) == Some(b'"') => self.consume_binary(false),
            b'x' if self.byte_at(1) == Some(b'"') => self.consume_binary(true),
            b'S' => self.consume_explicit_prefix(
                b"Set{",
                ContainerKind::Set,
                TokenKind::StartSet,
            ),
            b'M' => self.consume_explicit_prefix(
                b"Map{",
                ContainerKind::Map,
                TokenKind::StartMap,
            ),
            b't' => self.consume_literal(b"true", TokenKind::True),
            b'f' => self.consume_literal(b"false", TokenKind::False),
            b'n' => self.consume_literal(b"null", TokenKind::Null),
            b'N' => self.consume_literal(b"NaN", TokenKind::Number),
            b'I' => self.consume_literal(b"Infinity", TokenKind::Number),
            b'-' if self.byte_at(1) == Some(b'I') => {
                self.consume_literal(b"-Infinity", TokenKind::Number)
            }
            b'-' | b'0'..=b'9' => self.consume_number(),
            _ => Err(self.error(ReasonCode::ExpectedStartOfValueNotFound)),
        }
    }

    fn push_and_emit_start(
        &mut self,
        kind: ContainerKind,
        start_kind: TokenKind,
        len: usize,
    ) -> Result<StepOutcome, RdnError> {
        if self.current_depth() + 1 > self.state.options.max_depth {
            let reason = if kind == ContainerKind::Object {
                ReasonCode::ObjectDepthTooLarge
            } else {
                ReasonCode::ArrayDepthTooLarge
            };
            return Err(self.error(reason));
        }
        self.begin_token();
        self.state.container_stack.push(kind);
        for _ in 0..len {
            self.advance_one();
        }
        self.finish_token(start_kind, self.token_start_index, self.token_start_index, false);
        self.state.expect = just_opened_expect(kind);
        Ok(StepOutcome::TokenEmitted)
    }

    // ---- cursor primitives, usable from sibling scanner modules -------

    pub(crate) fn current_byte(&self) -> Option<u8> {
        self.buf.get(self.state.bytes_consumed).copied()
    }

    pub(crate) fn byte_at(&self, offset: usize) -> Option<u8> {
        self.buf.get(self.state.bytes_consumed + offset).copied()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.buf.len() - self.state.bytes_consumed
    }

    pub(crate) fn buf(&self) -> &'a [u8] {
        self.buf
    }

    pub(crate) fn index(&self) -> usize {
        self.state.bytes_consumed
    }

    pub(crate) fn advance_one(&mut self) -> u8 {
        let b = self.buf[self.state.bytes_consumed];
        self.state.bytes_consumed += 1;
        match b {
            b'\n' => {
                if self.state.pending_cr {
                    self.state.pending_cr = false;
                } else {
                    self.state.position.line_number += 1;
                    self.state.position.byte_position_in_line = 0;
                }
            }
            b'\r' => {
                self.state.position.line_number += 1;
                self.state.position.byte_position_in_line = 0;
                self.state.pending_cr = true;
            }
            _ => {
                self.state.position.byte_position_in_line += 1;
                self.state.pending_cr = false;
            }
        }
        b
    }

    pub(crate) fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance_one();
        }
    }

    pub(crate) fn begin_token(&mut self) {
        self.token_start_index = self.state.bytes_consumed;
    }

    pub(crate) fn finish_token(
        &mut self,
        kind: TokenKind,
        value_start: usize,
        value_end: usize,
        escaped: bool,
    ) {
        self.value_start = value_start;
        self.value_end = value_end;
        self.state.value_is_escaped = escaped;
        self.state.current_kind = kind;
        self.state.previous_kind = kind;
    }

    /// Completes a scalar value token and routes the enclosing frame to
    /// its next expected byte; used by every scanner that produces a
    /// value (string/number/literal/temporal/regex/binary).
    pub(crate) fn finish_value(
        &mut self,
        kind: TokenKind,
        value_start: usize,
        value_end: usize,
        escaped: bool,
    ) -> StepOutcome {
        self.finish_token(kind, value_start, value_end, escaped);
        self.after_value_consumed();
        StepOutcome::TokenEmitted
    }

    pub(crate) fn error(&self, reason: ReasonCode) -> RdnError {
        RdnError::new(reason, self.state.position)
    }

    pub(crate) fn max_depth(&self) -> usize {
        self.state.options.max_depth
    }

    pub(crate) fn comment_handling(&self) -> crate::options::CommentHandling {
        self.state.options.comment_handling
    }

    pub(crate) fn set_expect(&mut self, expect: Expect) {
        self.state.expect = expect;
    }

    /// The current token's value range as local indices into `buf`,
    /// used by [`crate::MultiSegmentReader`] to translate a completed
    /// read back into either a plain span or a [`crate::ValueSequence`].
    pub(crate) fn value_range(&self) -> (usize, usize) {
        (self.value_start, self.value_end)
    }
}

fn just_opened_expect(kind: ContainerKind) -> Expect {
    match kind {
        ContainerKind::Object => Expect::ObjectJustOpened,
        ContainerKind::Array => Expect::ArrayJustOpened,
        ContainerKind::Set => Expect::SetJustOpened,
        ContainerKind::Tuple => Expect::TupleJustOpened,
        ContainerKind::Map => Expect::MapJustOpened,
    }
}
