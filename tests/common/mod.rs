#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique scratch path under the system temp dir.
pub fn temp_path(label: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "divine-catalog-{label}-{}-{nanos}.{ext}",
        std::process::id()
    ));
    path
}

pub fn database_url(path: &Path) -> String {
    format!("sqlite:{}", path.display())
}

pub fn cleanup_db(path: &Path) {
    let _ = std::fs::remove_file(path);
    for suffix in ["-wal", "-shm", "-journal"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

/// Write `bytes` to a fresh file named like `name` and return its path.
pub fn write_fixture(name: &str, bytes: &[u8]) -> PathBuf {
    let (stem, ext) = name.rsplit_once('.').unwrap_or((name, "bin"));
    let path = temp_path(stem, ext);
    std::fs::write(&path, bytes).expect("failed to write fixture");
    path
}
