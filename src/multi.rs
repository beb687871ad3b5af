//! The multi-segment driver (§4.8, §2 component 8): layers the
//! single-segment [`crate::Reader`] over a sequence of independently
//! arriving byte segments.
//!
//! The single-segment reader is reused unchanged: every attempt to
//! read the next token constructs a fresh `Reader` over the
//! unconsumed tail of the current segment (or, when that alone isn't
//! enough, a buffer stitched from that tail plus whatever later
//! segments have already arrived) and resumes it from the saved
//! [`ReaderState`]. Most tokens resolve against a single segment's
//! tail and cost no allocation beyond the stitch buffer's own reuse;
//! a token that truly straddles a segment boundary is reported as a
//! [`ValueSequence`] rather than requiring the caller's segments to be
//! copied into one contiguous buffer up front.
//!
//! This generalizes past the restriction the source repository's own
//! multi-segment driver accepts (`@`-literals and regexes must lie
//! within one segment, per spec §9's design notes) — see `DESIGN.md`
//! for why every token kind is allowed to straddle here.

use crate::error::RdnError;
use crate::options::ReaderOptions;
use crate::position::Position;
use crate::reader::Reader;
use crate::state::ReaderState;
use crate::token::{TokenKind, ValueSequence};

/// Where a just-emitted token's value lives: the common case is a
/// single contiguous span into one retained segment; the rare case is
/// a sequence of spans across more than one.
#[derive(Debug, Clone)]
enum ValueView {
    Span { segment_index: usize, start: usize, end: usize },
    Sequence(ValueSequence),
}

/// Drives a [`Reader`] across a sequence of byte segments appended one
/// at a time, e.g. as they arrive from an async I/O source.
///
/// Every segment ever pushed is retained for the reader's lifetime
/// (§5 "the input buffer is borrowed, not owned" becomes, here, "the
/// segments are owned by the driver and never mutated once pushed") so
/// that a cross-segment [`ValueSequence`] can still be materialized
/// after the fact via [`MultiSegmentReader::value_bytes`].
pub struct MultiSegmentReader {
    segments: Vec<Box<[u8]>>,
    ended: bool,
    state: ReaderState,
    cursor_segment: usize,
    cursor_offset: usize,
    token_kind: TokenKind,
    value_is_escaped: bool,
    value: ValueView,
}

impl MultiSegmentReader {
    pub fn new() -> Self {
        Self::with_options(ReaderOptions::default())
    }

    pub fn with_options(options: ReaderOptions) -> Self {
        Self {
            segments: Vec::new(),
            ended: false,
            state: ReaderState::new(options),
            cursor_segment: 0,
            cursor_offset: 0,
            token_kind: TokenKind::None,
            value_is_escaped: false,
            value: ValueView::Span { segment_index: 0, start: 0, end: 0 },
        }
    }

    /// Appends a segment that is not yet known to be the last one.
    ///
    /// # Panics
    /// Panics if [`Self::push_final_segment`] has already been called.
    pub fn push_segment(&mut self, segment: impl Into<Box<[u8]>>) {
        assert!(!self.ended, "pushed a segment after the final one");
        self.segments.push(segment.into());
    }

    /// Appends the last segment of the stream; no further segments may
    /// be pushed afterwards.
    pub fn push_final_segment(&mut self, segment: impl Into<Box<[u8]>>) {
        self.push_segment(segment);
        self.ended = true;
    }

    // ---- accessors, mirroring Reader's (§6.3) -------------------------

    pub fn token_kind(&self) -> TokenKind {
        self.token_kind
    }

    pub fn value_is_escaped(&self) -> bool {
        self.value_is_escaped
    }

    pub fn has_value_sequence(&self) -> bool {
        matches!(self.value, ValueView::Sequence(_))
    }

    pub fn value_sequence(&self) -> Option<&ValueSequence> {
        match &self.value {
            ValueView::Sequence(seq) => Some(seq),
            ValueView::Span { .. } => None,
        }
    }

    /// `Some` for the common case where the token's value fits in one
    /// retained segment; `None` when it straddled a boundary, in which
    /// case use [`Self::value_sequence`] or [`Self::value_bytes`].
    pub fn value_span(&self) -> Option<&[u8]> {
        match &self.value {
            ValueView::Span { segment_index, start, end } => {
                Some(&self.segments[*segment_index][*start..*end])
            }
            ValueView::Sequence(_) => None,
        }
    }

    /// Materializes the current token's value regardless of whether it
    /// straddled a segment boundary. Allocates only in the straddling
    /// case.
    pub fn value_bytes(&self) -> Vec<u8> {
        match &self.value {
            ValueView::Span { segment_index, start, end } => {
                self.segments[*segment_index][*start..*end].to_vec()
            }
            ValueView::Sequence(seq) => {
                let refs: Vec<&[u8]> = self.segments.iter().map(|s| &**s).collect();
                seq.to_vec(&refs)
            }
        }
    }

    pub fn current_depth(&self) -> usize {
        self.state.current_depth()
    }

    pub fn position(&self) -> Position {
        self.state.position
    }

    pub fn current_state(&self) -> ReaderState {
        self.state.clone()
    }

    pub fn options(&self) -> ReaderOptions {
        self.state.options()
    }

    // ---- the read step -----------------------------------------------

    pub fn read(&mut self) -> Result<bool, RdnError> {
        let is_final_attempt = self.at_last_known_segment() && self.ended;
        let mut reader = Reader::from_state(self.current_tail(), is_final_attempt, self.fresh_state());

        if reader.read()? {
            self.commit_single_segment(&reader);
            return Ok(true);
        }
        if self.at_last_known_segment() {
            return Ok(false);
        }
        self.read_stitched()
    }

    fn current_tail(&self) -> &[u8] {
        if self.cursor_segment < self.segments.len() {
            &self.segments[self.cursor_segment][self.cursor_offset..]
        } else {
            &[]
        }
    }

    fn at_last_known_segment(&self) -> bool {
        self.cursor_segment + 1 >= self.segments.len()
    }

    /// A clone of the driver's resumption state with `bytes_consumed`
    /// reset: the single-segment `Reader` indexes its buffer by that
    /// field directly, and every attempt here starts at offset 0 of a
    /// freshly constructed slice, never at the absolute position the
    /// previous segment left off at.
    fn fresh_state(&self) -> ReaderState {
        let mut state = self.state.clone();
        state.bytes_consumed = 0;
        state
    }

    fn commit_single_segment(&mut self, reader: &Reader<'_>) {
        let (value_start, value_end) = reader.value_range();
        self.token_kind = reader.token_kind();
        self.value_is_escaped = reader.value_is_escaped();
        self.value = ValueView::Span {
            segment_index: self.cursor_segment,
            start: self.cursor_offset + value_start,
            end: self.cursor_offset + value_end,
        };
        self.cursor_offset += reader.bytes_consumed();
        self.state = reader.current_state();
    }

    /// The slow path: the tail of the current segment alone hit
    /// `NeedMoreData`, but at least one later segment has already
    /// arrived. Stitches segments into a scratch buffer, one at a
    /// time, retrying the whole read against the larger buffer each
    /// time, until either a token completes or the driver genuinely
    /// runs out of buffered segments.
    fn read_stitched(&mut self) -> Result<bool, RdnError> {
        let mut pieces: Vec<(usize, usize, usize)> = Vec::new();
        let mut buffer: Vec<u8> = Vec::new();

        let first_len = self.segments[self.cursor_segment].len();
        buffer.extend_from_slice(&self.segments[self.cursor_segment][self.cursor_offset..]);
        if self.cursor_offset < first_len {
            pieces.push((self.cursor_segment, self.cursor_offset, first_len));
        }
        let mut included_upto = self.cursor_segment;

        loop {
            let is_final_attempt = included_upto + 1 >= self.segments.len() && self.ended;
            let mut reader = Reader::from_state(&buffer, is_final_attempt, self.fresh_state());

            if reader.read()? {
                self.commit_stitched(&reader, &pieces);
                return Ok(true);
            }

            if included_upto + 1 >= self.segments.len() {
                return Ok(false);
            }
            included_upto += 1;
            let seg_len = self.segments[included_upto].len();
            buffer.extend_from_slice(&self.segments[included_upto]);
            pieces.push((included_upto, 0, seg_len));
        }
    }

    fn commit_stitched(&mut self, reader: &Reader<'_>, pieces: &[(usize, usize, usize)]) {
        let (value_start, value_end) = reader.value_range();
        self.token_kind = reader.token_kind();
        self.value_is_escaped = reader.value_is_escaped();

        let mapped = map_range_to_pieces(pieces, value_start, value_end);
        self.value = match mapped.as_slice() {
            [] => ValueView::Span {
                segment_index: self.cursor_segment,
                start: self.cursor_offset,
                end: self.cursor_offset,
            },
            [(segment_index, start, end)] => ValueView::Span {
                segment_index: *segment_index,
                start: *start,
                end: *end,
            },
            _ => {
                let mut seq = ValueSequence::new();
                for (segment_index, start, end) in mapped {
                    seq.push(segment_index, start, end);
                }
                ValueView::Sequence(seq)
            }
        };

        let (segment_index, offset) = map_offset(pieces, reader.bytes_consumed());
        self.cursor_segment = segment_index;
        self.cursor_offset = offset;
        self.state = reader.current_state();
    }
}

impl Default for MultiSegmentReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Translates a stitched-buffer offset back into `(segment_index,
/// local_offset)`, given the pieces that made up the stitch in order.
fn map_offset(pieces: &[(usize, usize, usize)], stitched_offset: usize) -> (usize, usize) {
    let mut consumed = 0;
    for &(segment_index, start, end) in pieces {
        let len = end - start;
        if stitched_offset <= consumed + len {
            return (segment_index, start + (stitched_offset - consumed));
        }
        consumed += len;
    }
    match pieces.last() {
        Some(&(segment_index, _, end)) => (segment_index, end),
        None => (0, 0),
    }
}

/// Splits the stitched-buffer range `[start, end)` back into one or
/// more `(segment_index, local_start, local_end)` pieces, in order.
fn map_range_to_pieces(
    pieces: &[(usize, usize, usize)],
    start: usize,
    end: usize,
) -> Vec<(usize, usize, usize)> {
    let mut consumed = 0;
    let mut out = Vec::new();
    for &(segment_index, seg_start, seg_end) in pieces {
        let len = seg_end - seg_start;
        let piece_start = consumed;
        let piece_end = consumed + len;
        let overlap_start = start.max(piece_start);
        let overlap_end = end.min(piece_end);
        if overlap_start < overlap_end {
            out.push((
                segment_index,
                seg_start + (overlap_start - piece_start),
                seg_start + (overlap_end - piece_start),
            ));
        }
        consumed += len;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(reader: &mut MultiSegmentReader) -> Result<Vec<(TokenKind, Vec<u8>)>, RdnError> {
        let mut out = Vec::new();
        while reader.read()? {
            out.push((reader.token_kind(), reader.value_bytes()));
        }
        Ok(out)
    }

    #[test]
    fn single_segment_document_reads_straight_through() {
        let mut reader = MultiSegmentReader::new();
        reader.push_final_segment(br#"{"a":1}"#.to_vec());
        let got = read_all(&mut reader).unwrap();
        assert_eq!(
            got.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            vec![
                TokenKind::StartObject,
                TokenKind::PropertyName,
                TokenKind::Number,
                TokenKind::EndObject,
            ]
        );
    }

    #[test]
    fn token_straddling_two_segments_reassembles_via_value_bytes() {
        let mut reader = MultiSegmentReader::new();
        reader.push_segment(br#"{"hel"#.to_vec());
        reader.push_final_segment(br#"lo":1}"#.to_vec());
        let got = read_all(&mut reader).unwrap();
        assert_eq!(got[1].0, TokenKind::PropertyName);
        assert_eq!(got[1].1, b"hello");
    }

    #[test]
    fn value_straddling_three_segments_is_reported_as_a_sequence() {
        let mut reader = MultiSegmentReader::new();
        reader.push_segment(b"[\"a".to_vec());
        reader.push_segment(b"bc".to_vec());
        reader.push_final_segment(b"d\"]".to_vec());
        assert!(reader.read().unwrap()); // StartArray
        assert!(reader.read().unwrap()); // String
        assert_eq!(reader.token_kind(), TokenKind::String);
        assert!(reader.has_value_sequence());
        assert_eq!(reader.value_bytes(), b"abcd");
    }

    #[test]
    fn needs_more_data_when_no_further_segment_has_arrived_yet() {
        let mut reader = MultiSegmentReader::new();
        reader.push_segment(b"[1, 2".to_vec());
        assert!(reader.read().unwrap()); // StartArray
        assert!(reader.read().unwrap()); // Number 1
        assert_eq!(reader.read().unwrap(), false);
    }
}
