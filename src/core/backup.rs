use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::success;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database file to `dest`, or with `compress` into a `.zip`
    /// archive next to it. Returns the path of the file written.
    pub fn backup(
        pool: &mut DbPool,
        db_path: &Path,
        dest: &Path,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        if !db_path.exists() {
            return Err(AppError::DatabaseNotFound(db_path.display().to_string()));
        }

        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let final_path = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };
        ensure_writable(&final_path, force)?;

        if compress {
            compress_backup(db_path, dest, &final_path)?;
        } else {
            fs::copy(db_path, &final_path)?;
            success(format!("Backup created: {}", final_path.display()));
        }

        ttlog(
            &pool.conn,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        )?;

        Ok(final_path)
    }
}

/// Write the database straight into a .zip archive at `zip_path`.
/// The archive entry takes the name of `dest` unless that is the archive itself.
fn compress_backup(db_path: &Path, dest: &Path, zip_path: &Path) -> AppResult<()> {
    let source = if dest == zip_path { db_path } else { dest };
    let entry_name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "database.db".to_string());

    let mut f = fs::File::open(db_path)?;
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(entry_name, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    success(format!("Compressed: {}", zip_path.display()));

    Ok(())
}
