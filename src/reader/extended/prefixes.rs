//! Explicit container prefixes `Set{` and `Map{` (§4.7): four-byte
//! keywords consumed atomically, forcing the container kind without
//! any of the brace disambiguator's lookahead.

use crate::container::ContainerKind;
use crate::error::{ReasonCode, RdnError};
use crate::token::TokenKind;

use super::super::{Reader, StepOutcome};

impl<'a> Reader<'a> {
    pub(crate) fn consume_explicit_prefix(
        &mut self,
        keyword: &'static [u8],
        kind: ContainerKind,
        start_kind: TokenKind,
    ) -> Result<StepOutcome, RdnError> {
        for (offset, &expected) in keyword.iter().enumerate() {
            match self.byte_at(offset) {
                Some(b) if b == expected => {}
                Some(_) => return Err(self.error(ReasonCode::ExpectedStartOfValueNotFound)),
                None => {
                    return if self.is_final_block() {
                        Err(self.error(ReasonCode::ExpectedStartOfValueNotFound))
                    } else {
                        Ok(StepOutcome::NeedMoreData)
                    };
                }
            }
        }
        self.push_and_emit_start(kind, start_kind, keyword.len())
    }
}
