use crate::error::{Error, Result};
use crate::locale::Locale;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Load a JSON document from a file
///
/// # Errors
/// - File not found or unreadable
/// - Invalid JSON
pub async fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))?;

    serde_json::from_str(&content).map_err(|e| Error::json(path, e))
}

/// Read a UTF-8 text file, `None` if it does not exist
pub async fn read_text(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Write `value` as 2-space indented JSON to the locale's file
///
/// The language directory is created if it does not exist yet.
/// Returns the path written.
pub async fn write_json(locale: &Locale, value: &Value) -> Result<PathBuf> {
    let path = locale.file_path();
    let mut content = serde_json::to_string_pretty(value).map_err(|e| Error::json(&path, e))?;
    content.push('\n');
    write_locale_file(locale, content).await
}

/// Write `text` verbatim to the locale's file, creating the directory
pub async fn write_text(locale: &Locale, text: &str) -> Result<PathBuf> {
    write_locale_file(locale, text.to_string()).await
}

async fn write_locale_file(locale: &Locale, content: String) -> Result<PathBuf> {
    let dir = locale.dir();
    fs::create_dir_all(&dir)
        .await
        .map_err(|e| Error::io(&dir, e))?;

    let path = locale.file_path();
    fs::write(&path, content)
        .await
        .map_err(|e| Error::io(&path, e))?;
    Ok(path)
}
