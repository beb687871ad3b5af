//! The number lexer (§4.4): optional sign, integer part (no leading
//! zero unless the integer is exactly `0`), optional fraction, optional
//! exponent, optional trailing `n` marking a `BigInteger`.

use crate::error::{ReasonCode, RdnError};
use crate::token::TokenKind;

use super::super::{Reader, StepOutcome};

impl<'a> Reader<'a> {
    pub(crate) fn consume_number(&mut self) -> Result<StepOutcome, RdnError> {
        self.begin_token();
        let start = self.index();

        if self.current_byte() == Some(b'-') {
            self.advance_one();
            if !matches!(self.current_byte(), Some(b'0'..=b'9')) {
                return self.number_need_more_or_err(ReasonCode::RequiredDigitNotFoundAfterSign);
            }
        }

        match self.scan_integer_part()? {
            Some(()) => {}
            None => return Ok(StepOutcome::NeedMoreData),
        }

        if self.current_byte() == Some(b'n') {
            let end = self.index();
            self.advance_one();
            return Ok(self.finish_value(TokenKind::BigInteger, start, end, false));
        }

        if self.current_byte() == Some(b'.') {
            self.advance_one();
            match self.scan_digit_run(ReasonCode::RequiredDigitNotFoundAfterDecimal)? {
                Some(()) => {}
                None => return Ok(StepOutcome::NeedMoreData),
            }
        }

        if matches!(self.current_byte(), Some(b'e' | b'E')) {
            self.advance_one();
            if matches!(self.current_byte(), Some(b'+' | b'-')) {
                self.advance_one();
            }
            match self.scan_digit_run(ReasonCode::RequiredDigitNotFoundAfterDecimal)? {
                Some(()) => {}
                None => return Ok(StepOutcome::NeedMoreData),
            }
        }

        match self.check_number_terminator()? {
            Some(()) => {}
            None => return Ok(StepOutcome::NeedMoreData),
        }

        let end = self.index();
        Ok(self.finish_value(TokenKind::Number, start, end, false))
    }

    /// Scans `0` or a non-zero-led digit run; `§4.4`'s leading-zero
    /// rule (`01` is invalid, `0` and `0.5` are fine).
    fn scan_integer_part(&mut self) -> Result<Option<()>, RdnError> {
        match self.current_byte() {
            Some(b'0') => {
                self.advance_one();
                if matches!(self.current_byte(), Some(b'0'..=b'9')) {
                    return Err(self.error(ReasonCode::InvalidLeadingZeroInNumber));
                }
                Ok(Some(()))
            }
            Some(b'1'..=b'9') => {
                while matches!(self.current_byte(), Some(b'0'..=b'9')) {
                    self.advance_one();
                }
                Ok(Some(()))
            }
            Some(_) => unreachable!("dispatcher only enters consume_number on a digit or '-'"),
            None => {
                if self.is_final_block() {
                    Err(self.error(ReasonCode::RequiredDigitNotFoundAfterSign))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Scans one or more digits, failing with `missing` if the first
    /// byte isn't a digit.
    fn scan_digit_run(&mut self, missing: ReasonCode) -> Result<Option<()>, RdnError> {
        let mut count = 0;
        loop {
            match self.current_byte() {
                Some(b'0'..=b'9') => {
                    self.advance_one();
                    count += 1;
                }
                Some(_) => break,
                None => {
                    return if self.is_final_block() {
                        if count == 0 {
                            Err(self.error(missing))
                        } else {
                            Ok(Some(()))
                        }
                    } else {
                        Ok(None)
                    };
                }
            }
        }
        if count == 0 {
            return Err(self.error(missing));
        }
        Ok(Some(()))
    }

    fn check_number_terminator(&mut self) -> Result<Option<()>, RdnError> {
        match self.current_byte() {
            None => {
                if self.is_final_block() {
                    Ok(Some(()))
                } else {
                    Ok(None)
                }
            }
            Some(b) if crate::tables::is_terminator(b) => Ok(Some(())),
            Some(_) => Err(self.error(ReasonCode::ExpectedEndOfDigitNotFound)),
        }
    }

    fn number_need_more_or_err(&mut self, reason: ReasonCode) -> Result<StepOutcome, RdnError> {
        if self.current_byte().is_none() && !self.is_final_block() {
            Ok(StepOutcome::NeedMoreData)
        } else {
            Err(self.error(reason))
        }
    }
}
