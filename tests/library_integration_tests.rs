//! Integration tests for reconciling, toggling, searching and moving inside a temporary root folder.

use std::fs;
use std::path::Path;

use tempfile::tempdir;

use yaclum::YaclumError;
use yaclum::config::RootConfig;
use yaclum::library::{
    self, METADATA_FILE_NAME, MetadataRecord, MovieRecord, ToggleOutcome, metadata_path, reconcile, search,
    toggle_watched,
};

fn create_movie_dirs(root: &Path, paths: &[&str]) {
    for path in paths {
        fs::create_dir_all(root.join(path)).expect("Failed to create movie directory");
    }
}

fn read_metadata_file(root: &Path) -> String {
    fs::read_to_string(metadata_path(root)).expect("Failed to read metadata file")
}

/// Copy the sample metadata fixture into the given root folder.
fn copy_sample_metadata(root: &Path) {
    fs::copy(
        Path::new("tests/fixtures/sample_metadata.json"),
        root.join(METADATA_FILE_NAME),
    )
    .expect("Failed to copy sample metadata");
}

#[test]
fn reconcile_twice_is_idempotent() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    create_movie_dirs(root, &["Nolan/Inception", "Nolan/Tenet", "Villeneuve/Dune"]);

    let first = reconcile(root).expect("first reconcile");
    let content_after_first = read_metadata_file(root);
    let second = reconcile(root).expect("second reconcile");

    assert!(first.saved);
    assert!(!first.loaded_existing);
    assert!(!second.saved);
    assert!(second.loaded_existing);
    assert!(second.changes.is_empty());
    assert_eq!(read_metadata_file(root), content_after_first);
}

#[test]
fn reconcile_preserves_watched_status() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    create_movie_dirs(root, &["Nolan/Inception"]);
    reconcile(root).expect("initial reconcile");
    toggle_watched(root, "Inception").expect("toggle");

    create_movie_dirs(root, &["Nolan/Interstellar", "Villeneuve/Arrival"]);
    let result = reconcile(root).expect("reconcile after adding movies");

    assert_eq!(result.changes.directors, vec!["Villeneuve"]);
    assert_eq!(result.changes.movies.len(), 2);
    let record = library::load_metadata(root).expect("load");
    assert!(record.movie("Nolan", "Inception").expect("inception").watched);
    assert!(!record.movie("Nolan", "Interstellar").expect("interstellar").watched);
    assert!(!record.movie("Villeneuve", "Arrival").expect("arrival").watched);
}

#[test]
fn reconcile_inserts_new_entries_from_empty_record() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    create_movie_dirs(root, &["Nolan/Inception", "Nolan/Tenet"]);

    reconcile(root).expect("reconcile");

    let written: serde_json::Value = serde_json::from_str(&read_metadata_file(root)).expect("valid json");
    assert_eq!(
        written,
        serde_json::json!({"Nolan": {"Inception": {"watched": false}, "Tenet": {"watched": false}}})
    );
}

#[test]
fn reconcile_keeps_entries_for_deleted_folders_and_file_order() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    copy_sample_metadata(root);
    create_movie_dirs(root, &["Nolan/Inception", "Lynch/Dune"]);

    reconcile(root).expect("reconcile");

    let record = library::load_metadata(root).expect("load");
    let directors: Vec<&str> = record.iter().map(|(director, _)| director).collect();
    assert_eq!(directors, vec!["Nolan", "Kubrick", "Lynch"]);
    assert_eq!(record.movie("Kubrick", "The Shining"), Some(&MovieRecord::new(true)));
    assert_eq!(record.movie("Nolan", "Memento"), Some(&MovieRecord::new(false)));
    assert_eq!(record.movie_count(), 4);
}

#[test]
fn reconcile_refuses_malformed_metadata() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    create_movie_dirs(root, &["Nolan/Inception"]);
    fs::write(metadata_path(root), r#"{"Nolan": {"Inception": {"watched": tru"#).expect("write metadata");

    let result = reconcile(root);

    assert!(matches!(result, Err(YaclumError::MalformedMetadata { .. })));
    assert_eq!(read_metadata_file(root), r#"{"Nolan": {"Inception": {"watched": tru"#);
}

#[test]
fn metadata_file_uses_four_space_indentation() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    create_movie_dirs(root, &["Nolan/Inception"]);

    reconcile(root).expect("reconcile");

    assert_eq!(
        read_metadata_file(root),
        "{\n    \"Nolan\": {\n        \"Inception\": {\n            \"watched\": false\n        }\n    }\n}"
    );
}

#[test]
fn toggle_twice_restores_original_value() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    copy_sample_metadata(root);

    let first = toggle_watched(root, "Memento").expect("first toggle");
    let second = toggle_watched(root, "Memento").expect("second toggle");

    assert_eq!(
        first,
        ToggleOutcome::Toggled {
            director: "Nolan".to_string(),
            watched: true
        }
    );
    assert_eq!(
        second,
        ToggleOutcome::Toggled {
            director: "Nolan".to_string(),
            watched: false
        }
    );
    let record = library::load_metadata(root).expect("load");
    assert!(!record.movie("Nolan", "Memento").expect("memento").watched);
}

#[test]
fn toggle_missing_movie_resaves_unchanged_record() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    copy_sample_metadata(root);
    let before = library::load_metadata(root).expect("load");

    let outcome = toggle_watched(root, "Dune").expect("toggle");

    assert_eq!(outcome, ToggleOutcome::NotFound);
    // Written back in the normalized format, content stays the same
    assert_eq!(read_metadata_file(root), before.to_json_string().expect("serialize"));
    assert_eq!(library::load_metadata(root).expect("load"), before);
}

#[test]
fn toggle_duplicate_movie_name_only_changes_first_director() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    let mut record = MetadataRecord::new();
    record.set_watched("Tarkovsky", "Solaris", false);
    record.set_watched("Soderbergh", "Solaris", false);
    library::save_metadata(root, &record).expect("save");

    toggle_watched(root, "Solaris").expect("toggle");

    let record = library::load_metadata(root).expect("load");
    assert!(record.movie("Tarkovsky", "Solaris").expect("first").watched);
    assert!(!record.movie("Soderbergh", "Solaris").expect("second").watched);
}

#[test]
fn search_is_case_insensitive_and_ignores_directors() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    copy_sample_metadata(root);

    for query in ["incep", "INCEP", "InCePtIoN"] {
        let results = search(root, query).expect("search");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].movie, "Inception");
        assert_eq!(results[0].director, "Nolan");
        assert!(results[0].watched);
    }

    assert!(search(root, "kubrick").expect("search").is_empty());
}

#[test]
fn search_without_metadata_is_empty() {
    let dir = tempdir().expect("tempdir");
    create_movie_dirs(dir.path(), &["Nolan/Inception"]);
    assert!(search(dir.path(), "incep").expect("search").is_empty());
}

#[test]
fn move_missing_source_leaves_tree_unchanged() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("movies");
    create_movie_dirs(&root, &["Nolan/Inception"]);

    let result = library::move_file_to_movie_folder(&root, &dir.path().join("nope.mkv"), "Villeneuve", "Dune");

    assert!(matches!(result, Err(YaclumError::SourceNotFound(_))));
    assert!(!root.join("Villeneuve").exists());
    assert!(!metadata_path(&root).exists());
}

#[test]
fn move_file_adds_movie_to_metadata_and_keeps_status() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("movies");
    fs::create_dir_all(&root).expect("create root");
    copy_sample_metadata(&root);
    let source = dir.path().join("Tenet.2020.mkv");
    fs::write(&source, "movie").expect("write source");

    let destination = library::move_file_to_movie_folder(&root, &source, "Nolan", "Tenet").expect("move");

    assert!(destination.ends_with("Nolan/Tenet/Tenet.2020.mkv"));
    let record = library::load_metadata(&root).expect("load");
    assert_eq!(record.movie("Nolan", "Tenet"), Some(&MovieRecord::new(false)));
    assert!(record.movie("Nolan", "Inception").expect("inception").watched);
}

#[test]
fn sample_config_has_root_folder() {
    let content = fs::read_to_string("tests/fixtures/sample_config.conf").expect("Failed to read sample config");
    let config = RootConfig::from_json_str(&content).expect("should parse");
    assert_eq!(
        config.root().expect("root should be set"),
        Path::new("/home/user/Movies")
    );
}
