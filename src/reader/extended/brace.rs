//! `ConsumeBrace`: disambiguating a bare `{` into *Object*, *Set*, or
//! *Map* by bounded lookahead (§4.6).
//!
//! Every helper here only peeks, via [`super::super::Reader::byte_at`]
//! offsets from the `{`; none of them advance the cursor or raise
//! errors of their own — an incomplete or malformed lookahead simply
//! resolves to *Object* and leaves the real error (unterminated
//! string, bad byte, ...) to be raised again, properly, by the actual
//! token consumption that follows. Disambiguation therefore never
//! needs more data: any time the lookahead runs past the end of the
//! buffer, even mid-final-block, it defaults to *Object* per §4.6's
//! closing statement ("if indeterminate before EOB, the conservative
//! default is Object to preserve the common case's resumability").

use crate::container::ContainerKind;
use crate::error::RdnError;
use crate::token::TokenKind;

use super::super::{Reader, StepOutcome};

impl<'a> Reader<'a> {
    pub(crate) fn consume_brace(&mut self) -> Result<StepOutcome, RdnError> {
        debug_assert_eq!(self.current_byte(), Some(b'{'));
        match self.disambiguate_brace() {
            ContainerKind::Object => {
                self.push_and_emit_start(ContainerKind::Object, TokenKind::StartObject, 1)
            }
            ContainerKind::Set => {
                self.push_and_emit_start(ContainerKind::Set, TokenKind::StartSet, 1)
            }
            ContainerKind::Map => {
                self.push_and_emit_start(ContainerKind::Map, TokenKind::StartMap, 1)
            }
            _ => unreachable!("brace disambiguation only yields Object/Set/Map"),
        }
    }

    fn disambiguate_brace(&self) -> ContainerKind {
        let after_ws = self.skip_ws_offset(1);
        match self.byte_at(after_ws) {
            None => ContainerKind::Object,
            Some(b'}') => ContainerKind::Object,
            Some(b'"') => self.disambiguate_after_string(after_ws),
            Some(_) => self.disambiguate_after_non_string_value(after_ws),
        }
    }

    fn disambiguate_after_string(&self, string_start: usize) -> ContainerKind {
        let after = match self.scan_past_string_for_brace(string_start) {
            Some(after) => after,
            None => return ContainerKind::Object,
        };
        let sep = self.skip_ws_offset(after);
        match self.byte_at(sep) {
            None => ContainerKind::Object,
            Some(b':') => ContainerKind::Object,
            Some(b',' | b'}') => ContainerKind::Set,
            Some(b'=') => self.disambiguate_arrow(sep),
            Some(_) => ContainerKind::Object,
        }
    }

    fn disambiguate_after_non_string_value(&self, value_start: usize) -> ContainerKind {
        let after = match self.scan_past_non_string_value(value_start) {
            Some(after) => after,
            None => return ContainerKind::Object,
        };
        let sep = self.skip_ws_offset(after);
        match self.byte_at(sep) {
            Some(b'=') => self.disambiguate_arrow(sep),
            _ => ContainerKind::Set,
        }
    }

    fn disambiguate_arrow(&self, eq_offset: usize) -> ContainerKind {
        match self.byte_at(eq_offset + 1) {
            Some(b'>') => ContainerKind::Map,
            _ => ContainerKind::Object,
        }
    }

    fn skip_ws_offset(&self, mut offset: usize) -> usize {
        while matches!(self.byte_at(offset), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            offset += 1;
        }
        offset
    }

    /// Peeks past a string starting at `offset` (the opening `"`),
    /// treating `\` as "skip the next byte" without validating escapes
    /// (§4.6 point 4). Returns the offset just past the closing quote,
    /// or `None` if the buffer ends first.
    fn scan_past_string_for_brace(&self, mut offset: usize) -> Option<usize> {
        debug_assert_eq!(self.byte_at(offset), Some(b'"'));
        offset += 1;
        loop {
            match self.byte_at(offset) {
                None => return None,
                Some(b'"') => return Some(offset + 1),
                Some(b'\\') => {
                    self.byte_at(offset + 1)?;
                    offset += 2;
                }
                Some(_) => offset += 1,
            }
        }
    }

    /// Peeks past one non-string value (number, keyword, `@`-literal,
    /// or a nested `{…}`/`[…]`/`(…)`, recursively skipping its own
    /// strings and nesting) starting at `offset`.
    fn scan_past_non_string_value(&self, mut offset: usize) -> Option<usize> {
        loop {
            match self.byte_at(offset) {
                Some(b'{' | b'[' | b'(') => return self.scan_past_nested_for_brace(offset),
                Some(b) if !crate::tables::is_terminator(b) => offset += 1,
                Some(_) => return Some(offset),
                None => return None,
            }
        }
    }

    /// Peeks past a bracketed run (`{…}`, `[…]`, or `(…)`) starting at
    /// `offset` on the opening byte, tracking nesting depth and
    /// skipping over string bodies so an embedded `}`/`]`/`)` inside a
    /// string never miscounts.
    fn scan_past_nested_for_brace(&self, mut offset: usize) -> Option<usize> {
        let mut depth: i64 = 0;
        loop {
            match self.byte_at(offset) {
                Some(b'"') => offset = self.scan_past_string_for_brace(offset)?,
                Some(b'{' | b'[' | b'(') => {
                    depth += 1;
                    offset += 1;
                }
                Some(b'}' | b']' | b')') => {
                    depth -= 1;
                    offset += 1;
                    if depth == 0 {
                        return Some(offset);
                    }
                }
                Some(_) => offset += 1,
                None => return None,
            }
        }
    }
}
