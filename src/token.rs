//! Token kinds and the cross-segment value view (§3 "Token").

/// The kind of the token most recently produced by a successful
/// `read()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    None,
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    StartSet,
    EndSet,
    StartMap,
    EndMap,
    PropertyName,
    String,
    Number,
    BigInteger,
    True,
    False,
    Null,
    Comment,
    DateTime,
    TimeOnly,
    Duration,
    Regex,
    Binary,
}

impl Default for TokenKind {
    fn default() -> Self {
        TokenKind::None
    }
}

/// A non-contiguous view over a token's value when it straddled a
/// segment boundary in the multi-segment driver (§3 "has_value_sequence").
///
/// Each piece is a byte range into one of the segments the
/// [`crate::MultiSegmentReader`] has retained; single-segment reads
/// never produce this — see invariant 5 in spec §3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSequence {
    /// `(segment_index, start, end)` triples, in order.
    pub(crate) pieces: Vec<(usize, usize, usize)>,
}

impl ValueSequence {
    pub(crate) fn new() -> Self {
        Self { pieces: Vec::new() }
    }

    pub(crate) fn push(&mut self, segment_index: usize, start: usize, end: usize) {
        if start < end {
            self.pieces.push((segment_index, start, end));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Materializes the sequence into a contiguous byte vector by
    /// copying each piece out of the provided segments. This is the
    /// only allocation point for a cross-segment token value.
    pub fn to_vec(&self, segments: &[&[u8]]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pieces.iter().map(|(_, s, e)| e - s).sum());
        for (segment_index, start, end) in &self.pieces {
            out.extend_from_slice(&segments[*segment_index][*start..*end]);
        }
        out
    }
}
