use crate::engine::TMP_MARKER;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

/// Temp files younger than this may belong to a write still in flight.
const STALE_AFTER: Duration = Duration::from_secs(300);

pub(crate) fn purge_tmp(root: &Path) {
    let (removed, failed) = remove_stale(root, SystemTime::now(), STALE_AFTER);
    if removed > 0 || failed > 0 {
        info!(removed, failed, "Cleaned up temporary files");
    }
}

fn remove_stale(root: &Path, now: SystemTime, threshold: Duration) -> (usize, usize) {
    let mut removed = 0;
    let mut failed = 0;

    WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .flatten()
        .filter(|entry| is_tmp(entry) && is_stale(entry, now, threshold))
        .for_each(|entry| match std::fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => {
                warn!(path = %entry.path().display(), error = %e, "Failed to remove temp file");
                failed += 1;
            },
        });

    (removed, failed)
}

fn is_tmp(entry: &DirEntry) -> bool {
    entry.file_type().is_file()
        && entry.file_name().to_str().is_some_and(|name| name.contains(TMP_MARKER))
}

fn is_stale(entry: &DirEntry, now: SystemTime, threshold: Duration) -> bool {
    entry
        .metadata()
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .map_or(true, |age| age > threshold)
}
