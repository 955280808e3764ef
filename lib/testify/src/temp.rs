use std::path::PathBuf;

use crate::random::random_string;

/// A path under the system temp dir that does not exist yet.
pub fn temp_file() -> PathBuf {
    std::env::temp_dir().join(format!("ipvs-test-{}", random_string(16)))
}

/// A new, empty directory under the system temp dir.
pub fn temp_dir() -> PathBuf {
    let path = temp_file();
    std::fs::create_dir_all(&path).expect("create temp dir");
    path
}
