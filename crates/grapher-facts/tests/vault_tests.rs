//! Integration tests for the vault writer
//!
//! These tests extract facts from text and verify the notes written to a
//! temporary directory.

use grapher_facts::{extract, VaultConfig, VaultReport, VaultWriter};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_categories_and_notes() {
    let dir = TempDir::new().unwrap();
    let extraction = extract("person('ada'). person(charles). machine('Analytical Engine').");

    let report = VaultWriter::default()
        .write(&extraction, dir.path())
        .unwrap();

    assert_eq!(
        report,
        VaultReport {
            folders: 2,
            notes: 3,
            links: 0,
            uncategorized: 0,
        }
    );
    assert_eq!(read(dir.path().join("person/person.md")), "%% Waypoint \n%% \n");
    assert_eq!(read(dir.path().join("person/ada.md")), "# ada\n\n");
    assert_eq!(read(dir.path().join("person/charles.md")), "# charles\n\n");
    assert_eq!(
        read(dir.path().join("machine/Analytical Engine.md")),
        "# Analytical Engine\n\n"
    );
}

#[test]
fn test_relations_link_into_subject_note() {
    let dir = TempDir::new().unwrap();
    let extraction = extract(
        "
        person(ada).
        person(charles).
        knows(ada, charles).
        collaborated_with(ada, 'charles').
        ",
    );

    let report = VaultWriter::default()
        .write(&extraction, dir.path())
        .unwrap();

    assert_eq!(report.links, 2);
    assert_eq!(report.uncategorized, 0);
    assert_eq!(
        read(dir.path().join("person/ada.md")),
        "# ada\n\nknows::[[charles]]\ncollaborated_with::[[charles]]\n"
    );
    assert!(!dir.path().join("uncategorized").exists());
}

#[test]
fn test_first_category_wins() {
    let dir = TempDir::new().unwrap();
    let extraction = extract("person(ada). author(ada). wrote(ada, notes).");

    VaultWriter::default()
        .write(&extraction, dir.path())
        .unwrap();

    assert!(read(dir.path().join("person/ada.md")).contains("wrote::[[notes]]"));
    assert_eq!(read(dir.path().join("author/ada.md")), "# ada\n\n");
}

#[test]
fn test_uncategorized_subjects() {
    let dir = TempDir::new().unwrap();
    let extraction = extract("invented(babbage, engine). invented(babbage, 'difference engine').");

    let report = VaultWriter::default()
        .write(&extraction, dir.path())
        .unwrap();

    assert_eq!(report.folders, 0);
    assert_eq!(report.uncategorized, 2);
    assert_eq!(
        read(dir.path().join("uncategorized/babbage.md")),
        "invented::[[engine]]\ninvented::[[difference engine]]\n"
    );
}

#[test]
fn test_custom_uncategorized_folder() {
    let dir = TempDir::new().unwrap();
    let writer = VaultWriter::new(VaultConfig {
        uncategorized_dir: "inbox".to_string(),
    });

    writer
        .write(&extract("knows(x, y)."), dir.path())
        .unwrap();

    assert_eq!(read(dir.path().join("inbox/x.md")), "knows::[[y]]\n");
}

#[test]
fn test_uncategorized_folder_stays_inside_vault() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("vault");
    let writer = VaultWriter::new(VaultConfig {
        uncategorized_dir: "../escape".to_string(),
    });

    writer.write(&extract("knows(x, y)."), &out).unwrap();

    assert_eq!(read(out.join(".._escape/x.md")), "knows::[[y]]\n");
    assert!(!dir.path().join("escape").exists());
}

#[test]
fn test_creates_nested_output_dir() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("clipping").join("graph");

    VaultWriter::default()
        .write(&extract("topic(rust)."), &out)
        .unwrap();

    assert!(out.join("topic/rust.md").is_file());
}

#[test]
fn test_values_with_separators_stay_inside_vault() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("vault");

    VaultWriter::default()
        .write(&extract("path('../escape'). path('a/b')."), &out)
        .unwrap();

    assert!(out.join("path/.._escape.md").is_file());
    assert!(out.join("path/a_b.md").is_file());
    assert!(!dir.path().join("escape.md").exists());
}

#[test]
fn test_rewrite_appends_waypoint_and_links() {
    let dir = TempDir::new().unwrap();
    let extraction = extract("person(ada). person(tom). knows(tom, ada).");
    let writer = VaultWriter::default();

    writer.write(&extraction, dir.path()).unwrap();
    writer.write(&extraction, dir.path()).unwrap();

    assert_eq!(
        read(dir.path().join("person/person.md")),
        "%% Waypoint \n%% \n%% Waypoint \n%% \n"
    );
    // Entity notes are rewritten before links are appended again
    assert_eq!(read(dir.path().join("person/tom.md")), "# tom\n\nknows::[[ada]]\n");
}

#[test]
fn test_empty_extraction_creates_only_root() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("empty");

    let report = VaultWriter::default().write(&extract(""), &out).unwrap();

    assert_eq!(report, VaultReport::default());
    assert!(out.is_dir());
    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}
