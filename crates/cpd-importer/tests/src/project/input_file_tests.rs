use super::*;

fn test_file(text: &str) -> InputFile {
    InputFile::from_text(FileId::from_report_path("src/A.cs").unwrap(), PathBuf::from("/proj/src/A.cs"), text)
}

#[test]
fn empty_file_has_one_line() {
    let file = test_file("");
    assert_eq!(file.line_count(), 1);
    assert_eq!(file.line_length(1), Some(0));
}

#[test]
fn line_lengths_exclude_terminators() {
    let file = test_file("class A\r\n{\n}\n");
    assert_eq!(file.line_count(), 4);
    assert_eq!(file.line_length(1), Some(7));
    assert_eq!(file.line_length(2), Some(1));
    assert_eq!(file.line_length(3), Some(1));
    assert_eq!(file.line_length(4), Some(0));
}

#[test]
fn carriage_returns_alone_end_lines() {
    let file = test_file("class A\r{\r}\r");
    assert_eq!(file.line_count(), 4);
    assert_eq!(file.line_length(1), Some(7));
    assert_eq!(file.line_length(2), Some(1));
    assert_eq!(file.line_length(3), Some(1));
}

#[test]
fn mixed_line_endings() {
    let file = test_file("a\r\nbb\rccc\n\r\ndddd");
    assert_eq!(file.line_count(), 5);
    assert_eq!(file.line_length(1), Some(1));
    assert_eq!(file.line_length(2), Some(2));
    assert_eq!(file.line_length(3), Some(3));
    assert_eq!(file.line_length(4), Some(0));
    assert_eq!(file.line_length(5), Some(4));
}

#[test]
fn byte_order_mark_is_not_counted() {
    let file = test_file("\u{FEFF}class A\n");
    assert_eq!(file.line_length(1), Some(7));
}

#[test]
fn line_numbers_are_one_based() {
    let file = test_file("a\nbb");
    assert_eq!(file.line_length(0), None);
    assert_eq!(file.line_length(2), Some(2));
    assert_eq!(file.line_length(3), None);
}

#[test]
fn line_length_counts_utf16_units() {
    // "é" is one UTF-16 unit, the emoji is a surrogate pair.
    let file = test_file("é😀");
    assert_eq!(file.line_length(1), Some(3));
}

#[test]
fn load_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("B.cs");
    std::fs::write(&path, "namespace N;\n").unwrap();

    let file = InputFile::load(FileId::from_report_path("B.cs").unwrap(), path.clone()).unwrap();
    assert_eq!(file.path(), path.as_path());
    assert_eq!(file.line_length(1), Some(12));
}

#[test]
fn load_fails_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = InputFile::load(FileId::from_report_path("gone.cs").unwrap(), dir.path().join("gone.cs"));
    assert!(result.is_err());
}
