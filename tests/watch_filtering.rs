// tests/watch_filtering.rs

//! Event typing and glob filtering: notify-kind classification, per-pipeline
//! watch globs, editor temp-file exclusion.

mod common;

use buildwatch::watch::{classify, ChangeKind, ExcludeSet, WatchEvent, WatchGlob};
use notify::event::{
    AccessKind, CreateKind, EventKind, MetadataKind, ModifyKind, RemoveKind,
};

use crate::common::init_tracing;

#[test]
fn notify_kinds_map_to_change_kinds() {
    assert_eq!(classify(&EventKind::Create(CreateKind::File)), Some(ChangeKind::Added));
    assert_eq!(
        classify(&EventKind::Modify(ModifyKind::Data(notify::event::DataChange::Content))),
        Some(ChangeKind::Changed)
    );
    assert_eq!(classify(&EventKind::Remove(RemoveKind::File)), Some(ChangeKind::Removed));

    // Noise that must never reach a coordinator.
    assert_eq!(classify(&EventKind::Access(AccessKind::Read)), None);
    assert_eq!(
        classify(&EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions))),
        None
    );
    assert_eq!(classify(&EventKind::Any), None);
    assert_eq!(classify(&EventKind::Other), None);
}

#[test]
fn default_style_glob_matches_nested_sources() {
    init_tracing();
    let glob = WatchGlob::compile("src/styles/**/*.scss").unwrap();

    assert!(glob.matches("src/styles/application.scss"));
    assert!(glob.matches("src/styles/components/button.scss"));
    assert!(!glob.matches("src/scripts/main.ts"));
    assert!(!glob.matches("src/styles/readme.md"));
}

#[test]
fn script_glob_matches_ts_and_tsx() {
    init_tracing();
    let glob = WatchGlob::compile("src/scripts/**/*.ts*").unwrap();

    assert!(glob.matches("src/scripts/main.ts"));
    assert!(glob.matches("src/scripts/views/app.tsx"));
    assert!(!glob.matches("src/scripts/legacy.js"));
}

#[test]
fn exclude_set_drops_editor_temp_files() {
    init_tracing();
    let excludes = ExcludeSet::compile(&[
        "**/*.swp".to_string(),
        "**/*.swo".to_string(),
        "**/*~".to_string(),
        "**/.#*".to_string(),
    ])
    .unwrap();

    assert!(excludes.is_excluded("src/styles/.main.scss.swp"));
    assert!(excludes.is_excluded("src/scripts/app.tsx.swo"));
    assert!(excludes.is_excluded("src/styles/main.scss~"));
    assert!(excludes.is_excluded("src/scripts/.#main.ts"));
    assert!(!excludes.is_excluded("src/styles/main.scss"));
}

#[test]
fn empty_exclude_set_matches_nothing() {
    let excludes = ExcludeSet::empty();
    assert!(!excludes.is_excluded("src/styles/main.scss.swp"));
}

#[test]
fn watch_event_paths_use_forward_slashes() {
    let event = WatchEvent::new("src/styles/main.scss", ChangeKind::Changed);
    assert_eq!(event.path_str(), "src/styles/main.scss");
}
