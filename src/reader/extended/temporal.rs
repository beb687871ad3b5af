//! `@`-prefixed temporal literals (§4.9): durations, time-only values,
//! and date-times (including bare Unix-epoch milliseconds).

use crate::error::{ReasonCode, RdnError};
use crate::token::TokenKind;

use super::super::{Reader, StepOutcome};

impl<'a> Reader<'a> {
    pub(crate) fn consume_temporal(&mut self) -> Result<StepOutcome, RdnError> {
        debug_assert_eq!(self.current_byte(), Some(b'@'));
        self.begin_token();
        self.advance_one();
        let body_start = self.index();

        match self.current_byte() {
            Some(b'P') => self.consume_duration(body_start),
            Some(b'0'..=b'9') => self.consume_digit_temporal(body_start),
            Some(_) => Err(self.error(ReasonCode::FoundInvalidCharacter)),
            None => {
                if self.is_final_block() {
                    Err(self.error(ReasonCode::FoundInvalidCharacter))
                } else {
                    Ok(StepOutcome::NeedMoreData)
                }
            }
        }
    }

    fn consume_duration(&mut self, body_start: usize) -> Result<StepOutcome, RdnError> {
        if self.scan_duration_run().is_none() {
            return Ok(StepOutcome::NeedMoreData);
        }
        let body_end = self.index();
        if body_end - body_start < 2 {
            return Err(self.error(ReasonCode::FoundInvalidCharacter));
        }
        if !self.check_temporal_delimiter()? {
            return Ok(StepOutcome::NeedMoreData);
        }
        Ok(self.finish_value(TokenKind::Duration, body_start, body_end, false))
    }

    /// Consumes the longest run of [`crate::tables::is_duration_char`]
    /// bytes. `None` means the buffer ended before a non-duration byte
    /// (or EOF at the final block, which also terminates the run).
    fn scan_duration_run(&mut self) -> Option<()> {
        loop {
            match self.current_byte() {
                Some(b) if crate::tables::is_duration_char(b) => {
                    self.advance_one();
                }
                Some(_) => return Some(()),
                None => {
                    return if self.is_final_block() { Some(()) } else { None };
                }
            }
        }
    }

    fn consume_digit_temporal(&mut self, body_start: usize) -> Result<StepOutcome, RdnError> {
        if self.scan_until_terminator().is_none() {
            return Ok(StepOutcome::NeedMoreData);
        }
        let body_end = self.index();
        if !self.check_temporal_delimiter()? {
            return Ok(StepOutcome::NeedMoreData);
        }
        let body = &self.buf()[body_start..body_end];
        let kind = classify_digit_temporal(body);
        Ok(self.finish_value(kind, body_start, body_end, false))
    }

    fn scan_until_terminator(&mut self) -> Option<()> {
        loop {
            match self.current_byte() {
                Some(b) if crate::tables::is_terminator(b) => return Some(()),
                Some(_) => {
                    self.advance_one();
                }
                None => {
                    return if self.is_final_block() { Some(()) } else { None };
                }
            }
        }
    }

    /// `None` means the buffer ended and `is_final_block` is false — the
    /// caller should wait for more data rather than decide yet.
    fn check_temporal_delimiter(&self) -> Result<bool, RdnError> {
        match self.current_byte() {
            None => Ok(self.is_final_block()),
            Some(b) if crate::tables::is_value_delimiter(b) => Ok(true),
            Some(_) => Err(self.error(ReasonCode::FoundInvalidCharacter)),
        }
    }
}

/// Fixed-position classification of a digit-led temporal body (§4.9):
/// `HH:MM:SS` shaped → *TimeOnly*; `YYYY-MM-DD...` shaped → *DateTime*;
/// otherwise a bare integer is treated as epoch milliseconds, still
/// *DateTime*.
fn classify_digit_temporal(body: &[u8]) -> TokenKind {
    if body.len() >= 3 && body[2] == b':' {
        TokenKind::TimeOnly
    } else {
        TokenKind::DateTime
    }
}
