//! `Skip` / `TrySkip` (§4.14): advancing past the value that follows a
//! `PropertyName`, or past a whole container, without the caller
//! reading every intervening token itself.

use crate::error::{ReasonCode, RdnError};
use crate::token::TokenKind;

use super::Reader;

impl<'a> Reader<'a> {
    /// Skips the current value, assuming the whole of it is already
    /// present in the buffer. Errors if the buffer runs out first —
    /// callers that can't guarantee that should use
    /// [`Self::try_skip`] instead.
    pub fn skip(&mut self) -> Result<(), RdnError> {
        match self.skip_steps()? {
            true => Ok(()),
            false => Err(self.error(ReasonCode::ExpectedRdnTokens)),
        }
    }

    /// As [`Self::skip`], but atomic: on `NeedMoreData` the reader is
    /// restored exactly as `read()` restores it, and `Ok(false)` is
    /// returned instead of an error.
    pub fn try_skip(&mut self) -> Result<bool, RdnError> {
        let snapshot = self.state.clone();
        let (token_start, value_start, value_end) =
            (self.token_start_index, self.value_start, self.value_end);
        match self.skip_steps() {
            Ok(true) => Ok(true),
            Ok(false) => {
                self.restore(snapshot, token_start, value_start, value_end);
                Ok(false)
            }
            Err(err) => {
                self.restore(snapshot, token_start, value_start, value_end);
                Err(err)
            }
        }
    }

    /// As [`Self::try_skip`], but not atomic: progress already made
    /// before a `NeedMoreData` is kept. Used by a document builder that
    /// drains tokens incrementally across segments rather than needing
    /// the whole skip to succeed in one shot.
    pub(crate) fn try_skip_partial(&mut self) -> Result<bool, RdnError> {
        self.skip_steps()
    }

    fn restore(
        &mut self,
        state: crate::state::ReaderState,
        token_start: usize,
        value_start: usize,
        value_end: usize,
    ) {
        self.state = state;
        self.token_start_index = token_start;
        self.value_start = value_start;
        self.value_end = value_end;
    }

    /// `Ok(true)`: fully skipped. `Ok(false)`: a nested `read()` hit
    /// `NeedMoreData` partway through.
    fn skip_steps(&mut self) -> Result<bool, RdnError> {
        match self.token_kind() {
            TokenKind::PropertyName => {
                if !self.read()? {
                    return Ok(false);
                }
                self.skip_steps()
            }
            TokenKind::StartObject | TokenKind::StartArray | TokenKind::StartSet | TokenKind::StartMap => {
                let target_depth = self.current_depth().saturating_sub(1);
                while self.current_depth() > target_depth {
                    if !self.read()? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(true),
        }
    }
}
