use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

/// Extension of quest-book files
pub const SNBT_EXTENSION: &str = "snbt";

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Find files with a specific extension below a directory, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let extension = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            let matches = path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension));
            if path.is_file() && matches {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path).with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Backup path for a file: `<path>.bak`
    pub fn backup_path<P: AsRef<Path>>(path: P) -> PathBuf {
        let mut name = path.as_ref().as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// Copy `path` to `<path>.bak` unless a backup already exists.
    ///
    /// Returns whether a backup was written. An existing backup is kept so the
    /// first untouched copy survives repeated runs.
    pub fn create_backup<P: AsRef<Path>>(path: P) -> Result<bool> {
        let path = path.as_ref();
        if !Self::file_exists(path) {
            return Err(anyhow!("Cannot back up missing file: {:?}", path));
        }

        let backup = Self::backup_path(path);
        if backup.exists() {
            return Ok(false);
        }

        fs::copy(path, &backup)
            .with_context(|| format!("Failed to write backup: {:?}", backup))?;
        Ok(true)
    }

    /// Whether two paths name the same existing file
    pub fn same_file<P1: AsRef<Path>, P2: AsRef<Path>>(a: P1, b: P2) -> bool {
        match (fs::canonicalize(a.as_ref()), fs::canonicalize(b.as_ref())) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// Path of `file` (found below `input_root`) mirrored below `output_root`
    pub fn mirror_path<P1, P2, P3>(file: P1, input_root: P2, output_root: P3) -> Result<PathBuf>
    where
        P1: AsRef<Path>,
        P2: AsRef<Path>,
        P3: AsRef<Path>,
    {
        let relative = file.as_ref().strip_prefix(input_root.as_ref()).with_context(|| {
            format!(
                "{:?} is not inside {:?}",
                file.as_ref(),
                input_root.as_ref()
            )
        })?;
        Ok(output_root.as_ref().join(relative))
    }
}
