use super::*;

#[test]
fn normalizes_backslashes_and_dot_segments() {
    assert_eq!(normalize_report_path(r"src\Models\.\User.cs"), "src/Models/User.cs");
    assert_eq!(normalize_report_path("src//Models/../A.cs"), "src/A.cs");
    assert_eq!(normalize_report_path("./A.cs"), "A.cs");
}

#[test]
fn keeps_absolute_prefixes() {
    assert_eq!(normalize_report_path("/home/dev/proj/A.cs"), "/home/dev/proj/A.cs");
    assert_eq!(normalize_report_path(r"C:\proj\src\A.cs"), "C:/proj/src/A.cs");
    assert_eq!(normalize_report_path("/../A.cs"), "/A.cs");
}

#[test]
fn leading_parent_segments_survive_on_relative_paths() {
    assert_eq!(normalize_report_path("../shared/A.cs"), "../shared/A.cs");
}

#[test]
fn strip_root_returns_relative_remainder() {
    assert_eq!(strip_root("/home/dev/proj/src/A.cs", "/home/dev/proj"), Some("src/A.cs"));
    assert_eq!(strip_root("/home/dev/proj/src/A.cs", "/home/dev/proj/"), Some("src/A.cs"));
    assert_eq!(strip_root("/home/dev/project/A.cs", "/home/dev/proj"), None);
    assert_eq!(strip_root("/home/dev/proj", "/home/dev/proj"), None);
}

#[test]
fn strip_root_rejects_roots_ending_inside_a_character() {
    assert_eq!(strip_root("/tmp/pro\u{e9}/A.cs", "/tmp/proj"), None);
    assert_eq!(strip_root("/tmp/\u{e9}t\u{e9}/A.cs", "/tmp/x"), None);
    assert_eq!(strip_root("/tmp/\u{e9}t\u{e9}/A.cs", "/tmp/\u{e9}t\u{e9}"), Some("A.cs"));
}

#[test]
fn strip_root_ignores_drive_letter_case() {
    assert_eq!(strip_root("c:/proj/A.cs", "C:/proj"), Some("A.cs"));
}

#[test]
fn detects_absolute_report_paths() {
    assert!(is_absolute_report_path("/abs/A.cs"));
    assert!(is_absolute_report_path("D:/abs/A.cs"));
    assert!(!is_absolute_report_path("src/A.cs"));
}

#[test]
fn file_id_rejects_empty_paths() {
    assert!(FileId::from_report_path("").is_none());
    assert!(FileId::from_report_path("./").is_none());
    assert_eq!(FileId::from_report_path(r"src\A.cs").unwrap().as_str(), "src/A.cs");
}
