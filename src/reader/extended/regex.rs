//! Regex literals (§4.10): `/pattern/flags`.

use crate::error::{ReasonCode, RdnError};
use crate::token::TokenKind;

use super::super::{Reader, StepOutcome};

impl<'a> Reader<'a> {
    pub(crate) fn consume_regex(&mut self) -> Result<StepOutcome, RdnError> {
        debug_assert_eq!(self.current_byte(), Some(b'/'));
        self.begin_token();
        self.advance_one();
        let start = self.index();

        let escaped = match self.scan_pattern()? {
            Some(escaped) => escaped,
            None => return Ok(StepOutcome::NeedMoreData),
        };

        if self.scan_flags().is_none() {
            return Ok(StepOutcome::NeedMoreData);
        }

        let end = self.index();
        if !self.check_regex_delimiter()? {
            return Ok(StepOutcome::NeedMoreData);
        }
        Ok(self.finish_value(TokenKind::Regex, start, end, escaped))
    }

    /// Entry: the cursor sits just past the opening `/`. Scans the
    /// pattern body (`\`-escapes skip the next byte unconditionally)
    /// up to and including the closing `/`. Rejects an empty pattern
    /// (`//`). Returns whether any escape was seen.
    fn scan_pattern(&mut self) -> Result<Option<bool>, RdnError> {
        let body_start = self.index();
        let mut escaped = false;
        loop {
            match self.current_byte() {
                None => {
                    return if self.is_final_block() {
                        Err(self.error(ReasonCode::FoundInvalidCharacter))
                    } else {
                        Ok(None)
                    };
                }
                Some(b'/') => {
                    if self.index() == body_start {
                        return Err(self.error(ReasonCode::FoundInvalidCharacter));
                    }
                    self.advance_one();
                    return Ok(Some(escaped));
                }
                Some(0) => return Err(self.error(ReasonCode::FoundInvalidCharacter)),
                Some(b'\\') => {
                    escaped = true;
                    self.advance_one();
                    match self.current_byte() {
                        Some(_) => {
                            self.advance_one();
                        }
                        None => {
                            return if self.is_final_block() {
                                Err(self.error(ReasonCode::FoundInvalidCharacter))
                            } else {
                                Ok(None)
                            };
                        }
                    }
                }
                Some(_) => {
                    self.advance_one();
                }
            }
        }
    }

    fn scan_flags(&mut self) -> Option<()> {
        loop {
            match self.current_byte() {
                Some(b) if crate::tables::is_regex_flag(b) => {
                    self.advance_one();
                }
                Some(_) => return Some(()),
                None => {
                    return if self.is_final_block() { Some(()) } else { None };
                }
            }
        }
    }

    /// `Ok(false)` means wait for more data; `Ok(true)` means the byte
    /// following the flags run is a valid delimiter (or EOF at the
    /// final block), per §4.10's "the following byte must be a
    /// delimiter".
    fn check_regex_delimiter(&self) -> Result<bool, RdnError> {
        match self.current_byte() {
            None => Ok(self.is_final_block()),
            Some(b) if crate::tables::is_value_delimiter(b) => Ok(true),
            Some(_) => Err(self.error(ReasonCode::FoundInvalidCharacter)),
        }
    }
}
