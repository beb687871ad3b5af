//! Whitespace and comment skipping (§4.12), run at the top of every
//! `read()` loop before the byte at the cursor is dispatched.
//!
//! A `/` is ambiguous the same way `{` is (§4.6), but the two bytes
//! following it disambiguate it outright rather than the container
//! position: `//` or `/*` is always a comment, in any position,
//! whenever comments aren't disallowed; any other second byte leaves
//! the `/` for [`super::super::consume_value_dispatch`] to read as a
//! regex. Comments are therefore recognized "everywhere whitespace is"
//! (§6.1), not only in structural positions.

use crate::error::RdnError;
use crate::options::CommentHandling;
use crate::token::TokenKind;

use super::super::Reader;
use super::comments::CommentOutcome;

pub(crate) enum SkipOutcome {
    /// The cursor now sits on the first significant byte (or at EOF);
    /// the main dispatcher should proceed.
    Done,
    /// The buffer ended while skipping whitespace or scanning a
    /// comment; the caller rolls back and returns `Ok(false)`.
    NeedMoreData,
    /// A `Comment` token was produced (`comment_handling = Allow`); the
    /// caller returns `Ok(true)` immediately.
    CommentEmitted,
}

impl<'a> Reader<'a> {
    pub(crate) fn skip_whitespace_and_comments(&mut self) -> Result<SkipOutcome, RdnError> {
        loop {
            while matches!(self.current_byte(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
                self.advance_one();
            }

            match self.comment_start_lookahead() {
                CommentLookahead::NotAComment => return Ok(SkipOutcome::Done),
                CommentLookahead::NeedMoreData => return Ok(SkipOutcome::NeedMoreData),
                CommentLookahead::Comment => {}
            }

            self.begin_token();
            match self.scan_comment()? {
                CommentOutcome::NeedMoreData => return Ok(SkipOutcome::NeedMoreData),
                CommentOutcome::Consumed { start, end } => {
                    if self.comment_handling() == CommentHandling::Skip {
                        continue;
                    }
                    self.finish_token(TokenKind::Comment, start, end, false);
                    return Ok(SkipOutcome::CommentEmitted);
                }
            }
        }
    }

    /// Looks at the cursor and the byte after it to decide whether a
    /// `/` here opens a comment, without consuming anything. A lone `/`
    /// at the end of a non-final buffer is ambiguous between an
    /// incomplete `//`/`/*` comment marker and a single-byte regex
    /// delimiter, so it reports `NeedMoreData` rather than guessing.
    fn comment_start_lookahead(&self) -> CommentLookahead {
        if self.current_byte() != Some(b'/') || self.comment_handling() == CommentHandling::Disallow {
            return CommentLookahead::NotAComment;
        }
        match self.byte_at(1) {
            Some(b'/') | Some(b'*') => CommentLookahead::Comment,
            Some(_) => CommentLookahead::NotAComment,
            None => {
                if self.is_final_block() {
                    CommentLookahead::NotAComment
                } else {
                    CommentLookahead::NeedMoreData
                }
            }
        }
    }
}

enum CommentLookahead {
    Comment,
    NotAComment,
    NeedMoreData,
}
