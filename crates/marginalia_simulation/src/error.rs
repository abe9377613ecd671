//! Ошибки loaders (config + room layouts)
//!
//! Симуляция сама по себе infallible: degenerate input → safe default.
//! Падать может только чтение/парсинг файлов.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraversalError {
    /// Файл не прочитался (нет файла, нет прав)
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Невалидный TOML или несовпадение схемы
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, TraversalError>;

/// Прочитать файл целиком, завернув io::Error в TraversalError::Io
pub(crate) fn read_file(path: impl Into<PathBuf>) -> Result<String> {
    let path = path.into();
    std::fs::read_to_string(&path).map_err(|source| TraversalError::Io { path, source })
}
