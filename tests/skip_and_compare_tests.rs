//! `skip`/`try_skip` (spec §4.14) and `value_text_equals` (§4.15).

use rdn::{Reader, TokenKind};

#[test]
fn skip_past_property_name_lands_on_the_following_sibling() {
    let mut reader = Reader::new(br#"{"a": [1, 2, {"deep": true}], "b": 9}"#, true);
    assert!(reader.read().unwrap()); // StartObject
    assert!(reader.read().unwrap()); // PropertyName "a"
    assert_eq!(reader.token_kind(), TokenKind::PropertyName);
    reader.skip().unwrap();
    // After skipping the whole array value, the next token is the
    // second property name.
    assert!(reader.read().unwrap());
    assert_eq!(reader.token_kind(), TokenKind::PropertyName);
    assert_eq!(reader.value_span(), b"b");
}

#[test]
fn skip_on_a_scalar_value_is_a_no_op_advance() {
    let mut reader = Reader::new(b"[1, 2, 3]", true);
    assert!(reader.read().unwrap()); // StartArray
    assert!(reader.read().unwrap()); // Number 1
    assert_eq!(reader.token_kind(), TokenKind::Number);
    reader.skip().unwrap();
    assert_eq!(reader.token_kind(), TokenKind::Number);
    assert_eq!(reader.value_span(), b"1");
}

#[test]
fn skip_over_a_whole_container_from_its_start_token() {
    let mut reader = Reader::new(b"[[1, 2], 3]", true);
    assert!(reader.read().unwrap()); // StartArray (outer)
    assert!(reader.read().unwrap()); // StartArray (inner)
    assert_eq!(reader.token_kind(), TokenKind::StartArray);
    assert_eq!(reader.current_depth(), 2);
    reader.skip().unwrap();
    assert_eq!(reader.token_kind(), TokenKind::EndArray);
    assert_eq!(reader.current_depth(), 1);
    assert!(reader.read().unwrap()); // Number 3
    assert_eq!(reader.value_span(), b"3");
}

#[test]
fn try_skip_is_atomic_on_incomplete_input() {
    let mut reader = Reader::new(b"[1, 2, ", false);
    assert!(reader.read().unwrap()); // StartArray
    assert_eq!(reader.token_kind(), TokenKind::StartArray);
    let before = reader.bytes_consumed();
    let before_depth = reader.current_depth();
    assert_eq!(reader.try_skip().unwrap(), false);
    assert_eq!(reader.bytes_consumed(), before, "try_skip must roll back on NeedMoreData");
    assert_eq!(reader.current_depth(), before_depth);
    assert_eq!(reader.token_kind(), TokenKind::StartArray);
}

#[test]
fn skip_on_a_property_name_is_a_no_op_when_the_value_is_scalar() {
    let mut reader = Reader::new(br#"{"a": 1, "b": 2}"#, true);
    assert!(reader.read().unwrap()); // StartObject
    assert!(reader.read().unwrap()); // PropertyName "a"
    reader.skip().unwrap();
    assert_eq!(reader.token_kind(), TokenKind::Number);
    assert_eq!(reader.value_span(), b"1");
}

#[test]
fn value_text_equals_without_escapes() {
    let mut reader = Reader::new(br#"["hello"]"#, true);
    assert!(reader.read().unwrap()); // StartArray
    assert!(reader.read().unwrap()); // String
    assert!(reader.value_text_equals("hello"));
    assert!(!reader.value_text_equals("hellp"));
    assert!(!reader.value_text_equals("hello!"));
}

#[test]
fn value_text_equals_unescapes_on_the_fly() {
    let mut reader = Reader::new(br#"["a\nb\tc"]"#, true);
    assert!(reader.read().unwrap()); // StartArray
    assert!(reader.read().unwrap()); // String
    assert!(reader.value_is_escaped());
    assert!(reader.value_text_equals("a\nb\tc"));
    assert!(!reader.value_text_equals("a\nb\tc "));
}

#[test]
fn value_text_equals_handles_unicode_escape() {
    let mut reader = Reader::new(br#"["café"]"#, true);
    assert!(reader.read().unwrap());
    assert!(reader.read().unwrap());
    assert!(reader.value_text_equals("café"));
}

#[test]
fn value_text_equals_utf16_matches_surrogate_pair() {
    // U+1F600 (grinning face) needs a surrogate pair in UTF-16.
    let mut reader = Reader::new(br#"["😀"]"#, true);
    assert!(reader.read().unwrap());
    assert!(reader.read().unwrap());
    let target: Vec<u16> = "😀".encode_utf16().collect();
    assert!(reader.value_text_equals_utf16(&target));
}

#[test]
fn property_name_text_equals() {
    let mut reader = Reader::new(br#"{"name": 1}"#, true);
    assert!(reader.read().unwrap()); // StartObject
    assert!(reader.read().unwrap()); // PropertyName
    assert_eq!(reader.token_kind(), TokenKind::PropertyName);
    assert!(reader.value_text_equals("name"));
}
