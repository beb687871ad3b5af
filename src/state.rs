//! The reader state snapshot (§3 "Reader state (for checkpointing)").

use crate::container::ContainerStack;
use crate::options::ReaderOptions;
use crate::position::Position;
use crate::token::TokenKind;

/// What the main state machine expects the next significant byte to
/// mean, given the top of the container stack and how far into the
/// current entry we are.
///
/// The spec's own snapshot description (§3) names four looser bits
/// instead (*in-object*, *is-not-primitive*, *trailing-comma-before-
/// comment*, current/previous kind). Those are exactly recoverable
/// from this single enum plus the container stack, so we carry this
/// richer value instead of the four bits separately; §4.12's
/// requirement that comments pause the machine without losing context
/// falls out for free, since emitting a `Comment` token never changes
/// `expect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Expect {
    /// No value has been read yet; the next token starts the document.
    RootValue,
    /// A root value has been read; another is permitted only under
    /// `allow_multiple_values`.
    AfterRoot,

    ObjectJustOpened,
    ObjectAfterComma,
    ObjectColon,
    ObjectValue,
    ObjectCommaOrClose,

    ArrayJustOpened,
    ArrayAfterComma,
    ArrayCommaOrClose,

    SetJustOpened,
    SetAfterComma,
    SetCommaOrClose,

    TupleJustOpened,
    TupleAfterComma,
    TupleCommaOrClose,

    MapJustOpened,
    MapAfterComma,
    MapArrow,
    MapValue,
    MapCommaOrClose,
}

/// An opaque, cloneable snapshot of everything a [`crate::Reader`]
/// needs to resume across a buffer boundary: line/column, the
/// container stack, the driving `expect` state, the last and previous
/// emitted token kinds, and the immutable options. Constructing a
/// fresh `Reader` from a `ReaderState` plus a new buffer segment
/// continues exactly where the previous `Reader` left off.
#[derive(Debug, Clone)]
pub struct ReaderState {
    pub(crate) position: Position,
    pub(crate) bytes_consumed: usize,
    pub(crate) container_stack: ContainerStack,
    pub(crate) expect: Expect,
    pub(crate) value_is_escaped: bool,
    pub(crate) current_kind: TokenKind,
    pub(crate) previous_kind: TokenKind,
    pub(crate) pending_cr: bool,
    pub(crate) options: ReaderOptions,
}

impl ReaderState {
    pub(crate) fn new(options: ReaderOptions) -> Self {
        Self {
            position: Position::default(),
            bytes_consumed: 0,
            container_stack: ContainerStack::new(),
            expect: Expect::RootValue,
            value_is_escaped: false,
            current_kind: TokenKind::None,
            previous_kind: TokenKind::None,
            pending_cr: false,
            options,
        }
    }

    pub fn current_depth(&self) -> usize {
        self.container_stack.current_depth()
    }

    pub fn options(&self) -> ReaderOptions {
        self.options
    }
}
