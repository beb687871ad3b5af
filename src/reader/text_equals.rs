//! `ValueTextEquals` (§4.15): comparing the current `String` or
//! `PropertyName` token's value against a caller-supplied UTF-8 or
//! UTF-16 target without materializing the unescaped value unless the
//! token actually contains an escape.

use super::Reader;

impl<'a> Reader<'a> {
    /// Compares the current token's value against `target`, unescaping
    /// on the fly when `value_is_escaped()` is set.
    pub fn value_text_equals(&self, target: &str) -> bool {
        let source = self.value_span();
        if !self.value_is_escaped() {
            return source == target.as_bytes();
        }
        let target = target.as_bytes();
        if quick_reject(source.len(), target.len()) {
            return false;
        }
        let mut s_i = 0;
        let mut t_i = 0;
        while s_i < source.len() {
            let (scalar, next_s) = match decode_one_scalar(source, s_i) {
                Some(v) => v,
                None => return false,
            };
            let encoded = encode_utf8_scalar(scalar);
            let bytes = encoded.as_slice();
            if t_i + bytes.len() > target.len() || target[t_i..t_i + bytes.len()] != *bytes {
                return false;
            }
            t_i += bytes.len();
            s_i = next_s;
        }
        t_i == target.len()
    }

    /// As [`Self::value_text_equals`] but against a UTF-16 target,
    /// transcoding the (possibly unescaped) source a scalar at a time
    /// into a small stack buffer rather than allocating.
    pub fn value_text_equals_utf16(&self, target: &[u16]) -> bool {
        let source = self.value_span();
        if !self.value_is_escaped() {
            return utf8_equals_utf16(source, target);
        }
        if quick_reject(source.len(), target.len()) {
            return false;
        }
        let mut s_i = 0;
        let mut t_i = 0;
        while s_i < source.len() {
            let (scalar, next_s) = match decode_one_scalar(source, s_i) {
                Some(v) => v,
                None => return false,
            };
            let (units, len) = encode_utf16_scalar(scalar);
            if t_i + len > target.len() || target[t_i..t_i + len] != units[..len] {
                return false;
            }
            t_i += len;
            s_i = next_s;
        }
        t_i == target.len()
    }
}

/// Unescaping only ever shrinks the source, and the least efficient
/// escape (`\uXXXX`) turns 6 source bytes into one decoded unit — the
/// same 6x bound the spec gives for escape expansion also covers the
/// looser utf16-transcode factor, since a decoded unit is never more
/// than 2 bytes wide either way.
fn quick_reject(source_len: usize, target_units: usize) -> bool {
    target_units > source_len || source_len > target_units.saturating_mul(6)
}

struct Small {
    buf: [u8; 4],
    len: u8,
}

impl Small {
    fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }
}

fn encode_utf8_scalar(scalar: u32) -> Small {
    let ch = char::from_u32(scalar).unwrap_or('\u{FFFD}');
    let mut buf = [0u8; 4];
    let written = ch.encode_utf8(&mut buf).len();
    Small { buf, len: written as u8 }
}

fn encode_utf16_scalar(scalar: u32) -> ([u16; 2], usize) {
    match char::from_u32(scalar) {
        Some(ch) => {
            let mut buf = [0u16; 2];
            let len = ch.encode_utf16(&mut buf).len();
            (buf, len)
        }
        // An unpaired surrogate has no valid `char` but is still a
        // legal single UTF-16 code unit.
        None => ([scalar as u16, 0], 1),
    }
}

fn utf8_len(lead: u8) -> usize {
    if lead & 0x80 == 0 {
        1
    } else if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}

fn parse_hex4(source: &[u8], i: usize) -> Option<u32> {
    if i + 4 > source.len() {
        return None;
    }
    let mut v: u32 = 0;
    for &b in &source[i..i + 4] {
        v = v * 16 + (b as char).to_digit(16)?;
    }
    Some(v)
}

/// Decodes one logical unit (a raw UTF-8 char, or one `\`-escape,
/// including a surrogate-pair `\uXXXX\uXXXX`) starting at `source[i]`,
/// already known to be well-formed since the lexer validated it.
fn decode_one_scalar(source: &[u8], i: usize) -> Option<(u32, usize)> {
    if source[i] != b'\\' {
        let len = utf8_len(source[i]);
        if i + len > source.len() {
            return None;
        }
        let s = std::str::from_utf8(&source[i..i + len]).ok()?;
        let ch = s.chars().next()?;
        return Some((ch as u32, i + len));
    }

    match *source.get(i + 1)? {
        b'"' => Some((b'"' as u32, i + 2)),
        b'\\' => Some((b'\\' as u32, i + 2)),
        b'/' => Some((b'/' as u32, i + 2)),
        b'b' => Some((0x08, i + 2)),
        b'f' => Some((0x0C, i + 2)),
        b'n' => Some((b'\n' as u32, i + 2)),
        b'r' => Some((b'\r' as u32, i + 2)),
        b't' => Some((b'\t' as u32, i + 2)),
        b'u' => {
            let high = parse_hex4(source, i + 2)?;
            let mut next = i + 6;
            let scalar = if (0xD800..=0xDBFF).contains(&high) {
                if source.get(next) == Some(&b'\\') && source.get(next + 1) == Some(&b'u') {
                    match parse_hex4(source, next + 2) {
                        Some(low) if (0xDC00..=0xDFFF).contains(&low) => {
                            next += 6;
                            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                        }
                        _ => high,
                    }
                } else {
                    high
                }
            } else {
                high
            };
            Some((scalar, next))
        }
        _ => None,
    }
}

fn utf8_equals_utf16(source: &[u8], target: &[u16]) -> bool {
    let s = match std::str::from_utf8(source) {
        Ok(s) => s,
        Err(_) => return false,
    };
    let mut t_i = 0;
    for ch in s.chars() {
        let mut buf = [0u16; 2];
        let units = ch.encode_utf16(&mut buf);
        if t_i + units.len() > target.len() || target[t_i..t_i + units.len()] != *units {
            return false;
        }
        t_i += units.len();
    }
    t_i == target.len()
}
