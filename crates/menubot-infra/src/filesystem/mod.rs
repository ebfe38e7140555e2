//! Filesystem adapters for menubot.
//!
//! Data directory resolution and the local upload store that backs
//! `/uploads/{filename}`.

pub mod uploads;

use std::path::PathBuf;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `MENUBOT_DATA_DIR` environment variable
/// 2. `~/.menubot`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MENUBOT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".menubot");
    }

    // Last resort: current directory
    PathBuf::from(".menubot")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is single-threaded and restores the env var immediately.
        unsafe {
            std::env::set_var("MENUBOT_DATA_DIR", "/tmp/test-menubot");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-menubot"));
        unsafe {
            std::env::remove_var("MENUBOT_DATA_DIR");
        }
    }
}
