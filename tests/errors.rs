use flatjson::ErrorKind;
use rstest::rstest;

fn fail(text: &str) -> flatjson::Error {
    flatjson::parse_str(text).unwrap_err()
}

#[rstest]
fn empty_and_blank_inputs_are_missing_a_root() {
    for text in ["", "   ", "\t\r\n"] {
        let err = fail(text);
        assert_eq!(err.kind(), ErrorKind::MissingRootElement, "{text:?}");
        assert!(err.line() >= 1 && err.column() >= 1);
    }
}

#[rstest]
#[case("42")]
#[case("\"text\"")]
#[case("null")]
#[case("true")]
fn scalar_roots_are_rejected(#[case] text: &str) {
    assert_eq!(fail(text).kind(), ErrorKind::BadRoot);
}

#[rstest]
fn bad_root_location_counts_lines() {
    let err = fail("  \n\n  42");
    assert_eq!(err.kind(), ErrorKind::BadRoot);
    assert_eq!(err.line(), 3);
    assert_eq!(err.column(), 3);
}

#[rstest]
fn trailing_comma_in_array() {
    let err = fail("[1,]");
    assert_eq!(err.kind(), ErrorKind::ExpectedValue);
    assert_eq!((err.line(), err.column()), (1, 4));
}

#[rstest]
fn missing_comma_between_members() {
    let err = fail(r#"{"a":1  "b":2}"#);
    assert_eq!(err.kind(), ErrorKind::ExpectedComma);
    assert_eq!((err.line(), err.column()), (1, 9));
}

#[rstest]
fn unclosed_array() {
    let err = fail("[true");
    assert_eq!(err.kind(), ErrorKind::UnexpectedEnd);
    assert_eq!((err.line(), err.column()), (1, 6));
}

#[rstest]
#[case("[", ErrorKind::UnexpectedEnd)]
#[case("{", ErrorKind::UnexpectedEnd)]
#[case("[1", ErrorKind::UnexpectedEnd)]
#[case(r#"{"a""#, ErrorKind::ExpectedColon)]
#[case(r#"{"a" 1}"#, ErrorKind::ExpectedColon)]
#[case(r#"{"a":}"#, ErrorKind::ExpectedValue)]
#[case(r#"{"a":1,}"#, ErrorKind::MissingObjectKey)]
#[case(r#"{1:2}"#, ErrorKind::MissingObjectKey)]
#[case("[,]", ErrorKind::UnexpectedComma)]
#[case("[1,,2]", ErrorKind::UnexpectedComma)]
#[case("[x]", ErrorKind::ExpectedValue)]
#[case("[] []", ErrorKind::ExpectedEndOfInput)]
#[case("{} x", ErrorKind::ExpectedEndOfInput)]
#[case("[nul]", ErrorKind::ExpectedNull)]
#[case("[nulL]", ErrorKind::ExpectedNull)]
#[case("[truE]", ErrorKind::ExpectedTrue)]
#[case("[fals]", ErrorKind::ExpectedFalse)]
#[case("[fals", ErrorKind::UnexpectedEnd)]
#[case("[falsy]", ErrorKind::ExpectedFalse)]
#[case("[nu", ErrorKind::UnexpectedEnd)]
fn structural_errors(#[case] text: &str, #[case] kind: ErrorKind) {
    assert_eq!(fail(text).kind(), kind, "{text:?}");
}

#[rstest]
fn literal_errors_point_at_the_literal() {
    let err = fail("[null, folse]");
    assert_eq!(err.kind(), ErrorKind::ExpectedFalse);
    assert_eq!((err.line(), err.column()), (1, 8));
}

#[rstest]
fn carriage_return_counts_as_a_line_break() {
    let err = fail("[1\r2]");
    assert_eq!(err.kind(), ErrorKind::ExpectedComma);
    assert_eq!((err.line(), err.column()), (2, 1));
}

#[rstest]
fn crlf_counts_as_one_line_break() {
    let err = fail("[1\r\n\r\n!]");
    assert_eq!(err.kind(), ErrorKind::ExpectedComma);
    assert_eq!((err.line(), err.column()), (3, 1));
}

#[rstest]
fn columns_count_bytes_not_codepoints() {
    // The two-byte key inflates the column of the failure after it.
    let err = fail("{\"é\":x}");
    assert_eq!(err.kind(), ErrorKind::ExpectedValue);
    assert_eq!((err.line(), err.column()), (1, 7));
}

#[rstest]
fn every_error_is_displayed_with_its_message() {
    let err = fail("[1,]");
    assert_eq!(err.message(), "expected value");
    assert_eq!(err.to_string(), "expected value at line 1, column 4");
    assert_eq!(err.kind().code(), 10);
}
