//! The string lexer (§4.5), shared by quoted string values and object
//! property names — the only difference between the two is what
//! `TokenKind` is emitted and what the reader expects next.

use crate::error::{ReasonCode, RdnError};
use crate::state::Expect;
use crate::token::TokenKind;

use super::super::{Reader, StepOutcome};

enum StringScan {
    Consumed { start: usize, end: usize, escaped: bool },
    NeedMoreData,
}

impl<'a> Reader<'a> {
    pub(crate) fn consume_string_value(&mut self) -> Result<StepOutcome, RdnError> {
        self.begin_token();
        match self.scan_string_body()? {
            StringScan::NeedMoreData => Ok(StepOutcome::NeedMoreData),
            StringScan::Consumed { start, end, escaped } => {
                Ok(self.finish_value(TokenKind::String, start, end, escaped))
            }
        }
    }

    pub(crate) fn consume_property_name(&mut self) -> Result<StepOutcome, RdnError> {
        self.begin_token();
        match self.scan_string_body()? {
            StringScan::NeedMoreData => Ok(StepOutcome::NeedMoreData),
            StringScan::Consumed { start, end, escaped } => {
                self.finish_token(TokenKind::PropertyName, start, end, escaped);
                self.set_expect(Expect::ObjectColon);
                Ok(StepOutcome::TokenEmitted)
            }
        }
    }

    /// Entry: the cursor sits on the opening `"`. Scans forward for the
    /// next byte in `{", \, < 0x20}` (§4.5): the fast path stops at an
    /// unescaped closing quote with `value_is_escaped = false`; the
    /// slow path validates every `\`-escape (and, after `\u`, its four
    /// hex digits) as it goes.
    fn scan_string_body(&mut self) -> Result<StringScan, RdnError> {
        debug_assert_eq!(self.current_byte(), Some(b'"'));
        self.advance_one(); // opening quote
        let start = self.index();
        let mut escaped = false;

        loop {
            match self.current_byte() {
                None => {
                    return if self.is_final_block() {
                        Err(self.error(ReasonCode::EndOfStringNotFound))
                    } else {
                        Ok(StringScan::NeedMoreData)
                    };
                }
                Some(b'"') => {
                    let end = self.index();
                    self.advance_one();
                    return Ok(StringScan::Consumed { start, end, escaped });
                }
                Some(b) if b < 0x20 => {
                    return Err(self.error(ReasonCode::InvalidCharacterWithinString));
                }
                Some(b'\\') => {
                    escaped = true;
                    self.advance_one();
                    match self.scan_escape_sequence()? {
                        Some(()) => {}
                        None => return Ok(StringScan::NeedMoreData),
                    }
                }
                Some(_) => {
                    self.advance_one();
                }
            }
        }
    }

    /// Entry: the cursor sits immediately after the `\`. Validates one
    /// escape: `" \ / b f n r t` consume a single byte; `u` additionally
    /// requires four hex digits. Returns `Ok(None)` for `NeedMoreData`.
    fn scan_escape_sequence(&mut self) -> Result<Option<()>, RdnError> {
        match self.current_byte() {
            None => {
                return if self.is_final_block() {
                    Err(self.error(ReasonCode::EndOfStringNotFound))
                } else {
                    Ok(None)
                };
            }
            Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => {
                self.advance_one();
            }
            Some(b'u') => {
                self.advance_one();
                for _ in 0..4 {
                    match self.current_byte() {
                        Some(b) if b.is_ascii_hexdigit() => {
                            self.advance_one();
                        }
                        Some(_) => return Err(self.error(ReasonCode::InvalidHexCharacterWithinString)),
                        None => {
                            return if self.is_final_block() {
                                Err(self.error(ReasonCode::InvalidHexCharacterWithinString))
                            } else {
                                Ok(None)
                            };
                        }
                    }
                }
            }
            Some(_) => return Err(self.error(ReasonCode::InvalidCharacterAfterEscapeWithinString)),
        }
        Ok(Some(()))
    }
}
