use super::types::ScoreBook;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Get the default score book path (~/.config/quizdeck/scores.json)
pub fn get_scores_path() -> PathBuf {
    crate::config::get_config_dir().join("scores.json")
}

/// Load the score book from a JSON file
///
/// If the file doesn't exist, returns a new empty book.
/// If the file exists but has an unsupported version, returns an error.
pub fn load_score_book(path: &Path) -> Result<ScoreBook> {
    if !path.exists() {
        return Ok(ScoreBook::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open score book at {}", path.display()))?;

    let book: ScoreBook = serde_json::from_reader(file).context("Failed to load score book")?;

    if book.version != 1 {
        anyhow::bail!("Unsupported score book version: {}", book.version);
    }

    Ok(book)
}

/// Save the score book to a JSON file atomically
///
/// Uses atomic-write-file so the file is never left half-written.
/// Creates the config directory if it doesn't exist.
pub fn save_score_book(path: &Path, book: &ScoreBook) -> Result<()> {
    crate::config::ensure_config_dir()?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, book).context("Failed to serialize score book")?;

    file.commit().context("Failed to save score book")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_path = env::temp_dir().join("quizdeck_test_missing.json");
        let _ = std::fs::remove_file(&temp_path);

        let book = load_score_book(&temp_path).unwrap();
        assert_eq!(book.version, 1);
        assert!(book.records.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("quizdeck_test_roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut book = ScoreBook::new();
        book.record("3", 4, 5);
        book.record("7", 5, 5);
        book.set_theme("dark");

        save_score_book(&temp_path, &book).unwrap();
        let loaded = load_score_book(&temp_path).unwrap();

        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.get("3").unwrap().score, 4);
        assert_eq!(loaded.get("7").unwrap().percent(), 100);
        assert_eq!(loaded.theme.as_deref(), Some("dark"));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let temp_path = env::temp_dir().join("quizdeck_test_bad_version.json");
        std::fs::write(&temp_path, r#"{"version": 99, "records": {}}"#).unwrap();

        let err = load_score_book(&temp_path).unwrap_err();
        assert!(err.to_string().contains("Unsupported score book version"));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_persisted_score_matches_computed() {
        // Score written to disk equals the score recorded
        let temp_path = env::temp_dir().join("quizdeck_test_persist_eq.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut book = ScoreBook::new();
        book.record("5", 3, 5);
        save_score_book(&temp_path, &book).unwrap();

        let loaded = load_score_book(&temp_path).unwrap();
        assert_eq!(loaded.get("5").unwrap().score, 3);
        assert_eq!(
            loaded.get("5").unwrap().recorded_at,
            book.get("5").unwrap().recorded_at
        );

        let _ = std::fs::remove_file(&temp_path);
    }
}
