//! Fatal-error coverage (spec §7's closed `ReasonCode` set and §8's
//! boundary behaviours).

use rdn::{Reader, ReaderOptions, ReasonCode};

fn error_for(src: &[u8]) -> ReasonCode {
    let mut reader = Reader::new(src, true);
    loop {
        match reader.read() {
            Ok(true) => continue,
            Ok(false) => panic!("expected a fatal error reading {:?}, got NeedMoreData", String::from_utf8_lossy(src)),
            Err(err) => return err.reason,
        }
    }
}

#[test]
fn unterminated_string_at_final_block() {
    assert_eq!(error_for(b"\""), ReasonCode::EndOfStringNotFound);
}

#[test]
fn opening_quote_alone_needs_more_data_when_not_final() {
    let mut reader = Reader::new(b"\"", false);
    assert_eq!(reader.read().unwrap(), false);
    assert_eq!(reader.bytes_consumed(), 0);
}

#[test]
fn invalid_escape_character() {
    assert_eq!(error_for(br#""a\qb""#), ReasonCode::InvalidCharacterAfterEscapeWithinString);
}

#[test]
fn invalid_hex_in_unicode_escape() {
    assert_eq!(error_for(br#""\u12zz""#), ReasonCode::InvalidHexCharacterWithinString);
}

#[test]
fn control_character_inside_string_is_rejected() {
    assert_eq!(error_for(b"\"a\tb\""), ReasonCode::InvalidCharacterWithinString);
}

#[test]
fn leading_zero_in_number_is_rejected() {
    assert_eq!(error_for(b"[01]"), ReasonCode::InvalidLeadingZeroInNumber);
}

#[test]
fn lone_minus_sign_requires_a_digit() {
    assert_eq!(error_for(b"-"), ReasonCode::RequiredDigitNotFoundAfterSign);
}

#[test]
fn decimal_point_requires_a_digit() {
    assert_eq!(error_for(b"1."), ReasonCode::RequiredDigitNotFoundAfterDecimal);
}

#[test]
fn mismatched_close_token() {
    assert_eq!(error_for(b"[1, 2)"), ReasonCode::MismatchedObjectArray);
}

#[test]
fn tuple_closed_with_bracket_is_mismatched() {
    assert_eq!(error_for(b"(1, 2]"), ReasonCode::MismatchedObjectArray);
}

#[test]
fn array_depth_too_large() {
    let input = "[".repeat(3);
    let mut reader =
        Reader::with_options(input.as_bytes(), true, ReaderOptions::default().with_max_depth(2));
    assert!(reader.read().unwrap());
    assert!(reader.read().unwrap());
    let err = reader.read().unwrap_err();
    assert_eq!(err.reason, ReasonCode::ArrayDepthTooLarge);
}

#[test]
fn max_depth_k_plus_one_nested_arrays_errors() {
    for k in [1usize, 4, 10] {
        let input = "[".repeat(k + 1);
        let mut reader = Reader::with_options(
            input.as_bytes(),
            true,
            ReaderOptions::default().with_max_depth(k),
        );
        let mut last = Ok(true);
        while let Ok(true) = last {
            last = reader.read();
        }
        assert_eq!(last.unwrap_err().reason, ReasonCode::ArrayDepthTooLarge, "k={k}");
    }
}

#[test]
fn object_depth_too_large() {
    let input = r#"{"a":{"b":{"c":1}}}"#;
    let mut reader =
        Reader::with_options(input.as_bytes(), true, ReaderOptions::default().with_max_depth(2));
    let mut last = Ok(true);
    while let Ok(true) = last {
        last = reader.read();
    }
    assert_eq!(last.unwrap_err().reason, ReasonCode::ObjectDepthTooLarge);
}

#[test]
fn trailing_comma_rejected_by_default_in_object() {
    assert_eq!(error_for(br#"{"a":1,}"#), ReasonCode::TrailingCommaNotAllowedBeforeObjectEnd);
}

#[test]
fn trailing_comma_rejected_by_default_in_array() {
    assert_eq!(error_for(b"[1,]"), ReasonCode::TrailingCommaNotAllowedBeforeArrayEnd);
}

#[test]
fn single_top_level_value_then_extra_token_is_fatal_by_default() {
    assert_eq!(error_for(b"1 2"), ReasonCode::ExpectedEndAfterSingleRdn);
}

#[test]
fn empty_input_is_fatal_at_final_block() {
    assert_eq!(error_for(b""), ReasonCode::ExpectedStartOfValueNotFound);
}

#[test]
fn unclosed_container_at_eof_is_fatal_at_final_block() {
    assert_eq!(error_for(b"[1, 2"), ReasonCode::ZeroDepthAtEnd);
}

#[test]
fn unknown_byte_at_value_position() {
    assert_eq!(error_for(b"?"), ReasonCode::ExpectedStartOfValueNotFound);
}

#[test]
fn bare_numeric_key_disambiguates_as_set_not_object() {
    // A non-string first "key" never triggers the Object branch of the
    // brace disambiguator (§4.6 point 3 only chooses Map or Set), so
    // `{1:2}` is read as a Set whose first element must be terminated
    // by one of `, }`, not `:`.
    assert_eq!(error_for(b"{1:2}"), ReasonCode::ExpectedEndOfDigitNotFound);
}

#[test]
fn object_requires_quoted_property_names_after_the_first_entry() {
    assert_eq!(error_for(br#"{"a":1,2:3}"#), ReasonCode::ExpectedStartOfPropertyNotFound);
}

#[test]
fn colon_required_after_property_name() {
    assert_eq!(error_for(br#"{"a" 1}"#), ReasonCode::ExpectedSeparatorAfterPropertyNameNotFound);
}

#[test]
fn colon_after_first_key_disambiguates_as_object_not_map() {
    // The brace disambiguator only looks at the separator after the
    // *first* entry's key (§4.6): a leading `:` commits the whole `{`
    // to Object, so a later `=>` is simply an invalid byte where the
    // object expects `,` or `}`.
    assert_eq!(error_for(br#"{"a" : 1 => 2}"#), ReasonCode::FoundInvalidCharacter);
}

#[test]
fn unterminated_block_comment() {
    use rdn::CommentHandling;
    let mut reader = Reader::with_options(
        b"[1 /* unterminated",
        true,
        ReaderOptions::default().with_comment_handling(CommentHandling::Allow),
    );
    assert!(reader.read().unwrap());
    let err = reader.read().unwrap_err();
    assert_eq!(err.reason, ReasonCode::EndOfCommentNotFound);
}

#[test]
fn empty_regex_pattern_is_rejected() {
    assert_eq!(error_for(b"[//]"), ReasonCode::FoundInvalidCharacter);
}

#[test]
fn invalid_temporal_body_byte() {
    assert_eq!(error_for(b"@!"), ReasonCode::FoundInvalidCharacter);
}

#[test]
fn odd_length_hex_binary_is_rejected() {
    assert_eq!(error_for(br#"x"abc""#), ReasonCode::FoundInvalidCharacter);
}

#[test]
fn comment_only_document_is_fatal_at_final_block() {
    // A document consisting solely of a comment never reaches
    // `Expect::AfterRoot` (emitting a `Comment` token leaves `expect`
    // untouched, §4.12), so EOF afterwards must still report "no value
    // found" rather than being mistaken for a completed parse.
    use rdn::CommentHandling;
    let mut reader = Reader::with_options(
        b"// just a comment",
        true,
        ReaderOptions::default().with_comment_handling(CommentHandling::Allow),
    );
    assert!(reader.read().unwrap());
    assert_eq!(reader.token_kind(), rdn::TokenKind::Comment);
    let err = reader.read().unwrap_err();
    assert_eq!(err.reason, ReasonCode::ExpectedStartOfValueNotFound);
}

#[test]
fn unterminated_hex_binary() {
    assert_eq!(error_for(br#"x"ab"#), ReasonCode::EndOfStringNotFound);
}
