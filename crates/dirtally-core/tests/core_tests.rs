use dirtally_core::{
    AccessError, AggregationState, Schedule, StrategyKind, TraversalResult, WalkConfig,
    WalkWarning, WarningKind, is_image,
};
use std::path::PathBuf;

#[test]
fn test_concurrent_updates_are_not_lost() {
    let state = AggregationState::new();
    let threads = 8;
    let per_thread = 10_000u64;

    std::thread::scope(|s| {
        for _ in 0..threads {
            s.spawn(|| {
                for _ in 0..per_thread {
                    state.add_bytes(3);
                    state.increment_files();
                    state.add_image_bytes(1);
                    state.increment_images();
                    state.increment_folders();
                }
            });
        }
    });

    let snap = state.snapshot();
    let total = threads * per_thread;
    assert_eq!(snap.total_bytes, total * 3);
    assert_eq!(snap.file_count, total);
    assert_eq!(snap.folder_count, total);
    assert_eq!(snap.image_bytes, total);
    assert_eq!(snap.image_count, total);
}

#[test]
fn test_counters_are_monotonic_under_concurrency() {
    let state = AggregationState::new();

    std::thread::scope(|s| {
        s.spawn(|| {
            for _ in 0..50_000 {
                state.add_bytes(2);
                state.increment_files();
            }
        });

        let mut last = TraversalResult::default();
        for _ in 0..1_000 {
            let now = state.snapshot();
            assert!(now.total_bytes >= last.total_bytes);
            assert!(now.file_count >= last.file_count);
            last = now;
        }
    });
}

#[test]
fn test_reset_is_idempotent_across_history() {
    let mut state = AggregationState::new();
    state.reset();
    assert_eq!(state.snapshot(), TraversalResult::default());

    for round in 1..=3u64 {
        state.add_bytes(round * 10);
        state.increment_files();
        state.increment_folders();
        state.reset();
        assert_eq!(state.snapshot(), TraversalResult::default());
    }
}

#[test]
fn test_image_classification_sample() {
    let files = [("photo.jpg", 10u64), ("doc.txt", 20), ("scan.png", 30)];

    let images: Vec<_> = files.iter().filter(|(name, _)| is_image(name)).collect();
    assert_eq!(images.len(), 2);
    assert_eq!(images.iter().map(|(_, size)| size).sum::<u64>(), 40);
}

#[test]
fn test_config_defaults() {
    let config = WalkConfig::new("/data");
    assert_eq!(config.root, PathBuf::from("/data"));
    assert_eq!(config.threads, 0);
    assert!(!config.warnings);
    assert!(!config.include_hidden);
}

#[test]
fn test_warning_categories() {
    let denied = AccessError::io(
        "/root/secret",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );
    let warning = WalkWarning::from(&denied);
    assert_eq!(warning.kind, WarningKind::AccessDenied);
    assert_eq!(warning.path, PathBuf::from("/root/secret"));
}

#[test]
fn test_mode_labels() {
    assert_eq!(format!("{}", StrategyKind::Collect), "collect");
    assert_eq!(format!("{}", Schedule::Sequential), "sequential");
}
