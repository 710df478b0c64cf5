use super::*;

fn write(
    root: &Path,
    relative: &str,
    text: &str,
) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

fn sample_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/A.cs", "class A {}\n");
    write(dir.path(), "src/Module/B.vb", "Class B\nEnd Class\n");
    write(dir.path(), "src/notes.txt", "not a source file");
    write(dir.path(), "obj/Debug/Generated.cs", "class G {}");
    write(dir.path(), ".hidden/H.cs", "class H {}");
    write(dir.path(), "generated/Gen.cs", "class Gen {}");
    dir
}

fn scan(
    root: &Path,
    settings: ProjectSettings,
) -> ProjectFiles {
    ProjectFiles::scan(root, &settings).unwrap()
}

#[test]
fn scan_indexes_source_files_only() {
    let dir = sample_project();
    let index = scan(dir.path(), ProjectSettings::default());

    let ids: Vec<String> = index.file_ids().iter().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec!["generated/Gen.cs", "src/A.cs", "src/Module/B.vb"]);
}

#[test]
fn scan_honours_exclude_paths() {
    let dir = sample_project();
    let settings = ProjectSettings {
        exclude_paths: vec!["generated".to_string()],
        ..ProjectSettings::default()
    };
    let index = scan(dir.path(), settings);

    assert_eq!(index.len(), 2);
    assert!(index.resolve("generated/Gen.cs").is_none());
}

#[test]
fn resolves_relative_and_backslash_paths() {
    let dir = sample_project();
    let index = scan(dir.path(), ProjectSettings::default());

    let file = index.resolve(r"src\Module\B.vb").unwrap();
    assert_eq!(file.id().as_str(), "src/Module/B.vb");
    assert_eq!(file.line_count(), 3);
    assert!(index.resolve("./src/A.cs").is_some());
}

#[test]
fn resolves_absolute_paths_under_root() {
    let dir = sample_project();
    let index = scan(dir.path(), ProjectSettings::default());

    let absolute = dir.path().join("src").join("A.cs");
    let file = index.resolve(&absolute.to_string_lossy()).unwrap();
    assert_eq!(file.id().as_str(), "src/A.cs");

    let canonical = absolute.canonicalize().unwrap();
    assert!(index.resolve(&canonical.to_string_lossy()).is_some());
}

#[test]
fn unknown_and_outside_paths_do_not_resolve() {
    let dir = sample_project();
    let index = scan(dir.path(), ProjectSettings::default());

    assert!(index.resolve("src/Missing.cs").is_none());
    assert!(index.resolve("/somewhere/else/src/A.cs").is_none());
    assert!(index.resolve("").is_none());
    assert!(index.resolve("obj/Debug/Generated.cs").is_none());
}

#[test]
fn case_insensitive_lookup() {
    let dir = sample_project();
    let sensitive = scan(dir.path(), ProjectSettings::default());
    assert!(sensitive.resolve("SRC/a.cs").is_none());

    let settings = ProjectSettings {
        case_sensitive: false,
        ..ProjectSettings::default()
    };
    let insensitive = scan(dir.path(), settings);
    let file = insensitive.resolve("SRC/a.cs").unwrap();
    assert_eq!(file.id().as_str(), "src/A.cs");
}

#[test]
fn resolution_is_cached() {
    let dir = sample_project();
    let index = scan(dir.path(), ProjectSettings::default());

    let first = index.resolve("src/A.cs").unwrap();
    std::fs::remove_file(dir.path().join("src/A.cs")).unwrap();
    let second = index.resolve("src/A.cs").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn deleted_file_does_not_resolve() {
    let dir = sample_project();
    let index = scan(dir.path(), ProjectSettings::default());

    std::fs::remove_file(dir.path().join("src/A.cs")).unwrap();
    assert!(index.resolve("src/A.cs").is_none());
}

#[test]
fn in_memory_index() {
    let root = Path::new("/proj");
    let file = InputFile::from_text(FileId::from_report_path("src/A.cs").unwrap(), root.join("src/A.cs"), "class A\n");
    let index = ProjectFiles::from_files(root, true, [file]);

    assert_eq!(index.len(), 1);
    assert!(index.resolve("/proj/src/A.cs").is_some());
    assert!(index.resolve("src/A.cs").is_some());
}

#[test]
fn non_ascii_sibling_directory_does_not_resolve() {
    let root = Path::new("/tmp/proj");
    let file = InputFile::from_text(FileId::from_report_path("A.cs").unwrap(), root.join("A.cs"), "class A\n");
    let index = ProjectFiles::from_files(root, true, [file]);

    assert!(index.resolve("/tmp/pro\u{e9}/A.cs").is_none());
    assert!(index.resolve("/tmp/proj/A.cs").is_some());
}

#[test]
fn closures_are_resolvers() {
    let file = Arc::new(InputFile::from_text(
        FileId::from_report_path("A.cs").unwrap(),
        PathBuf::from("A.cs"),
        "",
    ));
    let resolver = move |path: &str| (path == "A.cs").then(|| file.clone());

    assert!(resolver.resolve("A.cs").is_some());
    assert!(resolver.resolve("B.cs").is_none());
}
