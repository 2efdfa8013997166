// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use std::io::{self, Write};
use std::path::Path;

/// Decide whether `path` may be written.
///
/// - missing file → Ok
/// - existing file with `force` → Ok
/// - existing file without `force` → ask on stdin, anything but y/yes declines
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    if confirms(&answer) {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::OverwriteDeclined(path.display().to_string()))
    }
}

fn confirms(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn only_y_or_yes_confirms() {
        assert!(confirms("y\n"));
        assert!(confirms(" YES "));
        assert!(!confirms(""));
        assert!(!confirms("n"));
        assert!(!confirms("yep"));
    }

    #[test]
    fn missing_or_forced_paths_are_writable() {
        let path = env::temp_dir().join("rtimetracker_fs_utils_probe.txt");
        fs::remove_file(&path).ok();
        assert!(ensure_writable(&path, false).is_ok());

        fs::write(&path, "x").unwrap();
        assert!(ensure_writable(&path, true).is_ok());
        fs::remove_file(&path).ok();
    }
}
