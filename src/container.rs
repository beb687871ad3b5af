//! Container-frame stack (§3 "Container-frame stack", §4.3).
//!
//! The spec's source repository records each frame's kind in four
//! parallel 64-bit bitmaps (`set`, `map`, `map_expect_arrow`, `tuple`),
//! which caps precise kind-disambiguation at depth 64 (§9 "Design
//! notes"). We take the design note's own recommendation instead: a
//! `Vec<ContainerKind>` parallel to the [`crate::bitstack::BitStack`],
//! so `max_depth` above 64 is honored uniformly for every kind rather
//! than only for the plain object-like/array-like bit. The BitStack is
//! still threaded through every push/pop so the two stay in lock-step
//! (§3 invariant 3), and `is_object_like` is derived from
//! `ContainerKind` rather than stored independently.

use crate::bitstack::BitStack;

/// The precise kind of an open container frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Array,
    Object,
    Set,
    Map,
    Tuple,
}

impl ContainerKind {
    /// Object frames are the only ones whose entries are read through
    /// the `PropertyName` mechanism; every other kind reads entries as
    /// plain values (maps alternate key/value by a separate flag, not
    /// via `PropertyName`).
    fn is_object_like(self) -> bool {
        matches!(self, ContainerKind::Object)
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: ContainerKind,
    /// For `Map` frames: true when the next value read is a key, false
    /// when it is the value half of the current entry (§4.8).
    map_expect_key: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ContainerStack {
    bits: BitStack,
    frames: Vec<Frame>,
}

impl ContainerStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn current_depth(&self) -> usize {
        debug_assert_eq!(self.bits.current_depth(), self.frames.len());
        self.frames.len()
    }

    pub(crate) fn push(&mut self, kind: ContainerKind) {
        self.bits.push(kind.is_object_like());
        self.frames.push(Frame {
            kind,
            map_expect_key: true,
        });
    }

    pub(crate) fn pop(&mut self) -> Option<ContainerKind> {
        self.bits.pop();
        self.frames.pop().map(|frame| frame.kind)
    }

    pub(crate) fn top_kind(&self) -> Option<ContainerKind> {
        self.frames.last().map(|frame| frame.kind)
    }

    pub(crate) fn is_in_array(&self) -> bool {
        self.bits.top().is_some_and(|object_like| !object_like)
    }

    /// True when the current (must be `Map`) frame expects the next
    /// value to be a key rather than a value.
    pub(crate) fn map_expects_key(&self) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.map_expect_key)
    }

    pub(crate) fn flip_map_expectation(&mut self) {
        if let Some(frame) = self.frames.last_mut() {
            frame.map_expect_key = !frame.map_expect_key;
        }
    }
}
