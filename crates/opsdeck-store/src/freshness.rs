use std::path::Path;
use std::time::SystemTime;

/// Whole minutes since the newest `.db` file in `dir` was modified.
///
/// Returns `None` when the directory is missing or holds no readable store
/// file. Producers sync their databases into the data directory, so the
/// newest mtime is the age of the freshest sync. A file with a future mtime
/// reads as zero rather than going negative.
pub fn minutes_since_newest(dir: &Path) -> Option<u64> {
    let entries = std::fs::read_dir(dir).ok()?;

    let mut newest: Option<SystemTime> = None;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("db")
            && let Ok(metadata) = std::fs::metadata(&path)
            && let Ok(modified) = metadata.modified()
            && (newest.is_none() || Some(modified) > newest)
        {
            newest = Some(modified);
        }
    }

    let newest = newest?;
    let elapsed = SystemTime::now()
        .duration_since(newest)
        .unwrap_or_default();
    Some(elapsed.as_secs() / 60)
}
