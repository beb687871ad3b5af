//! Keyword literals (§4.3, §4.4): `true`, `false`, `null`, and the
//! three bare numeric keywords `NaN`, `Infinity`, `-Infinity`, all
//! matched against a fixed byte string one byte at a time so a partial
//! match at the end of the buffer yields `NeedMoreData` rather than a
//! false rejection.

use crate::error::{ReasonCode, RdnError};
use crate::token::TokenKind;

use super::super::{Reader, StepOutcome};

impl<'a> Reader<'a> {
    pub(crate) fn consume_literal(
        &mut self,
        keyword: &'static [u8],
        kind: TokenKind,
    ) -> Result<StepOutcome, RdnError> {
        self.begin_token();
        let start = self.index();

        for (i, &expected) in keyword.iter().enumerate() {
            match self.current_byte() {
                Some(b) if b == expected => self.advance_one(),
                Some(_) => return Err(self.error(ReasonCode::ExpectedStartOfValueNotFound)),
                None => {
                    return if self.is_final_block() {
                        Err(self.error(ReasonCode::ExpectedStartOfValueNotFound))
                    } else {
                        let _ = i;
                        Ok(StepOutcome::NeedMoreData)
                    };
                }
            };
        }

        match self.current_byte() {
            None if !self.is_final_block() => return Ok(StepOutcome::NeedMoreData),
            Some(b) if !crate::tables::is_terminator(b) => {
                return Err(self.error(ReasonCode::ExpectedStartOfValueNotFound));
            }
            _ => {}
        }

        let end = self.index();
        Ok(self.finish_value(kind, start, end, false))
    }
}
