//! Property-based tests for snapshot storage

use jorge::archive::EnvironmentArchive;
use jorge::project;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

/// store followed by restore reproduces the tracked file byte for byte
#[test]
fn test_store_restore_roundtrip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &prop_oneof![
                Just(Vec::new()),
                any::<u8>().prop_map(|b| vec![b]),
                proptest::collection::vec(any::<u8>(), 2..4096),
            ],
            |content| {
                let temp_dir = TempDir::new().unwrap();
                let root = project::create_root(temp_dir.path()).unwrap();
                let archive = EnvironmentArchive::open(&root).unwrap();
                let tracked = temp_dir.path().join("settings.bin");
                fs::write(&tracked, &content).unwrap();

                let stored = archive.store(&tracked, "x").unwrap();
                fs::write(&tracked, b"scribbled over").unwrap();
                let restored = archive.restore(&tracked, "x").unwrap();

                prop_assert_eq!(stored, content.len() as u64);
                prop_assert_eq!(restored, content.len() as u64);
                prop_assert_eq!(fs::read(&tracked).unwrap(), content);
                Ok(())
            },
        )
        .unwrap();
}

/// Committing twice without edits leaves the snapshot unchanged
#[test]
fn test_repeated_store_is_stable_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&proptest::collection::vec(any::<u8>(), 0..1024), |content| {
            let temp_dir = TempDir::new().unwrap();
            let root = project::create_root(temp_dir.path()).unwrap();
            let archive = EnvironmentArchive::open(&root).unwrap();
            let tracked = temp_dir.path().join(".env");
            fs::write(&tracked, &content).unwrap();

            archive.store(&tracked, "default").unwrap();
            let snapshot = archive.snapshot_path("default", tracked.file_name().unwrap());
            let first = fs::read(&snapshot).unwrap();
            archive.store(&tracked, "default").unwrap();
            let second = fs::read(&snapshot).unwrap();

            prop_assert_eq!(&first, &content);
            prop_assert_eq!(first, second);
            Ok(())
        })
        .unwrap();
}

proptest! {
    /// Names with separators or traversal never reach the archive
    #[test]
    fn test_path_like_names_rejected(prefix in "[a-z]{0,5}", suffix in "[a-z]{0,5}") {
        let name = format!("{}/{}", prefix, suffix);
        prop_assert!(jorge::archive::validate_env_name(&name).is_err());
        prop_assert!(jorge::archive::validate_env_name("..").is_err());
    }
}
