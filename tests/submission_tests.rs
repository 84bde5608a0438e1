use std::{fs, path::PathBuf};

use gradebot::{ExtensionSet, FatalError, combine_student_files};
use uuid::Uuid;

fn temp_folder() -> PathBuf {
    let root = std::env::temp_dir().join(format!("gradebot-submission-{}", Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp folder");
    root
}

#[test]
fn extension_match_is_case_insensitive() {
    let allowed = ExtensionSet::new([".txt"]).expect("valid extension set");

    assert!(allowed.matches("essay.TXT"));
    assert!(allowed.matches("essay.txt"));
    assert!(!allowed.matches("essay.txtx"));
    assert!(!allowed.matches("essay.md"));
}

#[test]
fn extension_set_normalizes_and_dedupes() {
    let allowed = ExtensionSet::new([".TXT", " .txt ", ".md"]).expect("valid extension set");
    assert_eq!(allowed.suffixes(), &[".txt".to_string(), ".md".to_string()]);
}

#[test]
fn extension_set_rejects_missing_dot() {
    let err = ExtensionSet::new(["txt"]).unwrap_err();
    assert!(matches!(err, FatalError::InvalidExtension(_)));
}

#[test]
fn extension_set_rejects_bare_dot_and_empty_list() {
    assert!(matches!(
        ExtensionSet::new(["."]).unwrap_err(),
        FatalError::InvalidExtension(_)
    ));
    assert!(matches!(
        ExtensionSet::new(Vec::<String>::new()).unwrap_err(),
        FatalError::EmptyExtensionSet
    ));
}

#[test]
fn combines_allowed_files_in_sorted_order_with_separators() {
    let folder = temp_folder();
    fs::write(folder.join("b.txt"), "second").expect("write b");
    fs::write(folder.join("a.txt"), "first").expect("write a");
    fs::write(folder.join("notes.md"), "ignored").expect("write notes");

    let allowed = ExtensionSet::new([".txt"]).expect("valid extension set");
    let combined = combine_student_files(&folder, &allowed).expect("aggregation should succeed");

    assert_eq!(combined, "first\n\nsecond\n\n");

    let _ = fs::remove_dir_all(folder);
}

#[test]
fn skips_unreadable_files_and_keeps_the_rest() {
    let folder = temp_folder();
    fs::write(folder.join("bad.txt"), [0xff, 0xfe, 0xfd]).expect("write bad");
    fs::write(folder.join("good.txt"), "readable").expect("write good");

    let allowed = ExtensionSet::new([".txt"]).expect("valid extension set");
    let combined = combine_student_files(&folder, &allowed).expect("aggregation should succeed");

    assert_eq!(combined, "readable\n\n");

    let _ = fs::remove_dir_all(folder);
}

#[test]
fn empty_folder_yields_empty_string() {
    let folder = temp_folder();

    let allowed = ExtensionSet::new([".txt"]).expect("valid extension set");
    let combined = combine_student_files(&folder, &allowed).expect("aggregation should succeed");

    assert!(combined.is_empty());

    let _ = fs::remove_dir_all(folder);
}

#[test]
fn missing_folder_is_an_error() {
    let folder = std::env::temp_dir().join(format!("gradebot-missing-{}", Uuid::new_v4()));
    let allowed = ExtensionSet::new([".txt"]).expect("valid extension set");

    assert!(combine_student_files(&folder, &allowed).is_err());
}
