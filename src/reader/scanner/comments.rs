//! Comment scanning (§4.12): `// line` comments terminated by
//! LF/CR/CRLF/EOF, and `/* block */` comments. Neither form nests.

use crate::error::{ReasonCode, RdnError};

use super::super::Reader;

pub(crate) enum CommentOutcome {
    /// The comment body (excluding its delimiters) spans `start..end`.
    Consumed { start: usize, end: usize },
    /// The buffer ended before the comment could be classified or
    /// closed; the caller rolls back and waits for more data.
    NeedMoreData,
}

impl<'a> Reader<'a> {
    /// Entry: the cursor sits on `/`, and the caller has already
    /// confirmed the next byte is `/` or `*`. Consumes a full line or
    /// block comment.
    pub(crate) fn scan_comment(&mut self) -> Result<CommentOutcome, RdnError> {
        debug_assert_eq!(self.current_byte(), Some(b'/'));
        match self.byte_at(1) {
            Some(b'/') => self.scan_line_comment(),
            Some(b'*') => self.scan_block_comment(),
            Some(_) => Err(self.error(ReasonCode::InvalidCharacterAtStartOfComment)),
            None => {
                if self.is_final_block() {
                    Err(self.error(ReasonCode::UnexpectedEndOfDataWhileReadingComment))
                } else {
                    Ok(CommentOutcome::NeedMoreData)
                }
            }
        }
    }

    fn scan_line_comment(&mut self) -> Result<CommentOutcome, RdnError> {
        self.advance_n(2); // consume "//"
        let body_start = self.index();
        loop {
            match self.current_byte() {
                None => {
                    // EOF terminates a line comment just as a newline
                    // would, even at the final block (§8.10).
                    return if self.is_final_block() {
                        Ok(CommentOutcome::Consumed {
                            start: body_start,
                            end: self.index(),
                        })
                    } else {
                        Ok(CommentOutcome::NeedMoreData)
                    };
                }
                Some(b'\n' | b'\r') => {
                    return Ok(CommentOutcome::Consumed {
                        start: body_start,
                        end: self.index(),
                    });
                }
                Some(0xE2)
                    if self.byte_at(1) == Some(0x80) && matches!(self.byte_at(2), Some(0xA8 | 0xA9)) =>
                {
                    return Err(self.error(ReasonCode::UnexpectedEndOfLineSeparator));
                }
                Some(_) => {
                    self.advance_one();
                }
            }
        }
    }

    fn scan_block_comment(&mut self) -> Result<CommentOutcome, RdnError> {
        self.advance_n(2); // consume "/*"
        let body_start = self.index();
        loop {
            match (self.current_byte(), self.byte_at(1)) {
                (Some(b'*'), Some(b'/')) => {
                    let body_end = self.index();
                    self.advance_n(2);
                    return Ok(CommentOutcome::Consumed {
                        start: body_start,
                        end: body_end,
                    });
                }
                (Some(_), _) => {
                    self.advance_one();
                }
                (None, _) => {
                    return if self.is_final_block() {
                        Err(self.error(ReasonCode::EndOfCommentNotFound))
                    } else {
                        Ok(CommentOutcome::NeedMoreData)
                    };
                }
            }
        }
    }
}
