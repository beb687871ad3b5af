//! Binary literals (§4.11): `b"…"` base64 and `x"…"` hex.

use crate::error::{ReasonCode, RdnError};
use crate::token::TokenKind;

use super::super::{Reader, StepOutcome};

impl<'a> Reader<'a> {
    /// Entry: the cursor sits on the prefix letter (`b` or `x`), with
    /// the opening `"` already confirmed by the dispatcher's one-byte
    /// lookahead. `value_is_escaped` is repurposed here to record the
    /// encoding: `false` for base64, `true` for hex.
    pub(crate) fn consume_binary(&mut self, is_hex: bool) -> Result<StepOutcome, RdnError> {
        debug_assert!(matches!(self.current_byte(), Some(b'b') | Some(b'x')));
        debug_assert_eq!(self.byte_at(1), Some(b'"'));
        self.begin_token();
        self.advance_n(2);
        let body_start = self.index();

        let body_end = if is_hex {
            self.scan_hex_body()?
        } else {
            self.scan_base64_body()?
        };
        let body_end = match body_end {
            Some(end) => end,
            None => return Ok(StepOutcome::NeedMoreData),
        };

        if !self.check_binary_delimiter()? {
            return Ok(StepOutcome::NeedMoreData);
        }

        Ok(self.finish_value(TokenKind::Binary, body_start, body_end, is_hex))
    }

    fn scan_hex_body(&mut self) -> Result<Option<usize>, RdnError> {
        let mut count = 0usize;
        loop {
            match self.current_byte() {
                Some(b'"') => {
                    if count % 2 != 0 {
                        return Err(self.error(ReasonCode::FoundInvalidCharacter));
                    }
                    let end = self.index();
                    self.advance_one();
                    return Ok(Some(end));
                }
                Some(b) if crate::tables::is_hex_digit(b) => {
                    self.advance_one();
                    count += 1;
                }
                Some(_) => return Err(self.error(ReasonCode::FoundInvalidCharacter)),
                None => {
                    return if self.is_final_block() {
                        Err(self.error(ReasonCode::EndOfStringNotFound))
                    } else {
                        Ok(None)
                    };
                }
            }
        }
    }

    fn scan_base64_body(&mut self) -> Result<Option<usize>, RdnError> {
        let mut count = 0usize;
        let mut padding_started = false;
        loop {
            match self.current_byte() {
                Some(b'"') => {
                    if count != 0 && count % 4 != 0 {
                        return Err(self.error(ReasonCode::FoundInvalidCharacter));
                    }
                    let end = self.index();
                    self.advance_one();
                    return Ok(Some(end));
                }
                Some(b'=') => {
                    padding_started = true;
                    self.advance_one();
                    count += 1;
                }
                Some(b) if !padding_started && crate::tables::is_base64_char(b) => {
                    self.advance_one();
                    count += 1;
                }
                Some(_) => return Err(self.error(ReasonCode::FoundInvalidCharacter)),
                None => {
                    return if self.is_final_block() {
                        Err(self.error(ReasonCode::EndOfStringNotFound))
                    } else {
                        Ok(None)
                    };
                }
            }
        }
    }

    /// `Ok(false)` means wait for more data; `Ok(true)` means the
    /// literal is validly terminated (either a real delimiter byte or
    /// EOF at the final block).
    fn check_binary_delimiter(&self) -> Result<bool, RdnError> {
        match self.current_byte() {
            None => Ok(self.is_final_block()),
            Some(b) if crate::tables::is_value_delimiter(b) => Ok(true),
            Some(_) => Err(self.error(ReasonCode::FoundInvalidCharacter)),
        }
    }
}
