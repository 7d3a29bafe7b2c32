//! Reading corpora from disk.
//!
//! A corpus is a UTF-8 `.txt` file, a `.pdf` file, or a directory of such
//! files. Everything is read into memory before analysis starts, and any
//! unreadable file aborts the load.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use walkdir::WalkDir;

use crate::error::{AnalysisError, Result};

const SUPPORTED_EXTENSIONS: [&str; 2] = ["txt", "pdf"];

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

fn is_supported(path: &Path) -> bool {
    extension_of(path).is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

/// Supported files under `path`, sorted. A file path is returned as is.
pub fn collect_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!("Skipping unreadable directory entry: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_supported(p))
        .collect();
    files.sort();
    files
}

/// Reads one corpus file according to its extension.
pub fn read_file(path: &Path) -> Result<String> {
    match extension_of(path).as_deref() {
        Some("txt") => Ok(fs::read_to_string(path)?),
        Some("pdf") => pdf_extract::extract_text(path).map_err(|e| AnalysisError::Extraction {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
        _ => Err(AnalysisError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Loads the whole corpus at `path` into one string.
/// Directory files are read in sorted order and joined with newlines.
pub fn load_corpus(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(AnalysisError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("corpus path {} does not exist", path.display()),
        )));
    }

    let files = collect_files(path);
    if files.is_empty() {
        return Err(AnalysisError::EmptyInput(path.to_path_buf()));
    }

    let mut texts = Vec::with_capacity(files.len());
    for file in &files {
        texts.push(read_file(file)?);
    }
    let corpus = texts.join("\n");
    info!(
        "Loaded corpus from {} ({} file(s), {} bytes)",
        path.display(),
        files.len(),
        corpus.len()
    );
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_single_text_file() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("corpus.txt");
        fs::write(&p, "Zażółć gęślą jaźń.").unwrap();
        assert_eq!(load_corpus(&p).unwrap(), "Zażółć gęślą jaźń.");
    }

    #[test]
    fn directory_files_join_in_sorted_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "second").unwrap();
        fs::write(dir.path().join("a.txt"), "first").unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        assert_eq!(load_corpus(dir.path()).unwrap(), "first\nsecond");
    }

    #[test]
    fn missing_path_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_corpus(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, AnalysisError::Io(_)));
    }

    #[test]
    fn directory_without_corpus_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();
        assert!(matches!(
            load_corpus(dir.path()),
            Err(AnalysisError::EmptyInput(_))
        ));
    }

    #[test]
    fn unsupported_single_file() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("notes.md");
        fs::write(&p, "text").unwrap();
        assert!(matches!(
            load_corpus(&p),
            Err(AnalysisError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn invalid_utf8_aborts() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("bad.txt");
        fs::write(&p, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(load_corpus(&p), Err(AnalysisError::Io(_))));
    }
}
