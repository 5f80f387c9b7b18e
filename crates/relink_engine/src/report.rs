use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Writes the unmatched source URLs as a one-column CSV with header `url`.
///
/// The file is written next to its final location and renamed into place, so
/// a previous report is replaced whole or not at all.
pub fn write_orphans_csv(path: &Path, urls: &[String]) -> Result<PathBuf, ReportError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(tmp.as_file_mut());
        writer.write_record(["url"])?;
        for url in urls {
            writer.write_record([url])?;
        }
        writer.flush()?;
    }
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    tmp.persist(path).map_err(|e| ReportError::Io(e.error))?;
    Ok(path.to_path_buf())
}
