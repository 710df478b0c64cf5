use std::path::PathBuf;

use super::*;
use crate::vfs::FileId;

fn test_file(text: &str) -> InputFile {
    InputFile::from_text(FileId::from_report_path("src/A.cs").unwrap(), PathBuf::from("src/A.cs"), text)
}

fn raw(
    start_line: i32,
    start_offset: i32,
    end_line: i32,
    end_offset: i32,
) -> messages::TextRange {
    messages::TextRange {
        start_line,
        start_offset,
        end_line,
        end_offset,
    }
}

#[test]
fn converts_valid_range() {
    let file = test_file("class A\n{\n}\n");
    let range = to_text_range(&file, &raw(1, 0, 1, 5)).unwrap();
    assert_eq!(range, TextRange::new(TextPointer::new(1, 0), TextPointer::new(1, 5)));
    assert_eq!(range.to_string(), "[1:0-1:5]");
}

#[test]
fn range_may_end_at_line_end_or_span_lines() {
    let file = test_file("class A\n{\n}\n");
    assert!(to_text_range(&file, &raw(1, 6, 1, 7)).is_ok());
    assert!(to_text_range(&file, &raw(1, 0, 3, 1)).is_ok());
}

#[test]
fn rejects_line_past_end_of_file() {
    let file = test_file("class A");
    let err = to_text_range(&file, &raw(1, 0, 2, 1)).unwrap_err();
    assert_eq!(
        err,
        MalformedRecordError::LineOutOfBounds {
            line: 2,
            lines: 1
        }
    );
}

#[test]
fn rejects_line_zero() {
    let file = test_file("class A");
    let err = to_text_range(&file, &raw(0, 0, 1, 1)).unwrap_err();
    assert!(matches!(err, MalformedRecordError::LineOutOfBounds { line: 0, .. }));
}

#[test]
fn rejects_offset_past_line_end() {
    let file = test_file("class A");
    let err = to_text_range(&file, &raw(1, 0, 1, 8)).unwrap_err();
    assert_eq!(
        err,
        MalformedRecordError::OffsetOutOfBounds {
            line: 1,
            offset: 8,
            length: 7
        }
    );
}

#[test]
fn lines_after_bare_carriage_returns_are_addressable() {
    let file = test_file("class A\r{\r}\r");
    let range = to_text_range(&file, &raw(2, 0, 2, 1)).unwrap();
    assert_eq!(range.start, TextPointer::new(2, 0));
}

#[test]
fn byte_order_mark_does_not_extend_first_line() {
    let file = test_file("\u{FEFF}class A\n");
    assert!(to_text_range(&file, &raw(1, 0, 1, 7)).is_ok());
    assert!(matches!(
        to_text_range(&file, &raw(1, 0, 1, 8)).unwrap_err(),
        MalformedRecordError::OffsetOutOfBounds { .. }
    ));
}

#[test]
fn rejects_negative_positions() {
    let file = test_file("class A");
    let err = to_text_range(&file, &raw(1, -1, 1, 3)).unwrap_err();
    assert!(matches!(err, MalformedRecordError::NegativePosition { offset: -1, .. }));
}

#[test]
fn rejects_empty_and_inverted_ranges() {
    let file = test_file("class A");
    assert!(matches!(
        to_text_range(&file, &raw(1, 3, 1, 3)),
        Err(MalformedRecordError::EmptyOrInverted { .. })
    ));
    assert!(matches!(
        to_text_range(&file, &raw(1, 5, 1, 2)),
        Err(MalformedRecordError::EmptyOrInverted { .. })
    ));
}

#[test]
fn pointers_order_by_line_then_offset() {
    assert!(TextPointer::new(1, 9) < TextPointer::new(2, 0));
    assert!(TextPointer::new(2, 1) > TextPointer::new(2, 0));
}
