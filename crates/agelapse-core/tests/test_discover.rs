use tempfile::TempDir;

use agelapse_core::io::discover::{discover_samples, list_frames};

fn touch(path: &std::path::Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"x").unwrap();
}

#[test]
fn finds_sample_folders_and_skips_outputs() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    touch(&root.join("A/1.jpg"));
    touch(&root.join("B/nested/1.JPG"));
    touch(&root.join("A/Processed/0-0.jpg"));
    touch(&root.join("C/notes.txt"));
    touch(&root.join("stray.jpg"));

    let found = discover_samples(root, "jpg", "Processed", &[]).unwrap();
    assert_eq!(found, vec![root.join("A"), root.join("B/nested")]);
}

#[test]
fn root_is_the_sample_when_it_has_no_subfolders() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("1.jpg"));
    let found = discover_samples(tmp.path(), "jpg", "Processed", &[]).unwrap();
    assert_eq!(found, vec![tmp.path().to_path_buf()]);
}

#[test]
fn allow_list_filters_by_folder_name() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("A/1.jpg"));
    touch(&tmp.path().join("B/1.jpg"));
    let only = vec!["B".to_string()];
    let found = discover_samples(tmp.path(), "jpg", "Processed", &only).unwrap();
    assert_eq!(found, vec![tmp.path().join("B")]);

    let none = vec!["Z".to_string()];
    assert!(discover_samples(tmp.path(), "jpg", "Processed", &none)
        .unwrap()
        .is_empty());
}

#[test]
fn lists_only_direct_frames() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("b.jpg"));
    touch(&tmp.path().join("a.jpg"));
    touch(&tmp.path().join("sub/c.jpg"));
    touch(&tmp.path().join("d.png"));
    assert_eq!(list_frames(tmp.path(), "jpg").unwrap(), vec!["a.jpg", "b.jpg"]);
}

#[test]
fn missing_root_is_an_error() {
    let tmp = TempDir::new().unwrap();
    assert!(discover_samples(&tmp.path().join("nope"), "jpg", "Processed", &[]).is_err());
}
