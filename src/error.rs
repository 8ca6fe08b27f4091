use std::path::PathBuf;

/// Errors reported by board mutations and loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid column {column} (board has {width} columns)")]
    InvalidColumn { column: usize, width: usize },

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {0} has nothing to undo")]
    EmptyColumn(usize),

    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("serialized board must have {expected} cells, got {actual}")]
    MalformedSerialization { expected: usize, actual: usize },

    #[error("unknown cell symbol {symbol:?} at index {index}")]
    UnknownSymbol { symbol: char, index: usize },
}

/// Errors that end a game before it reaches an outcome.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("{0} did not provide a move")]
    Abandoned(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::InvalidColumn { column: 9, width: 7 };
        assert_eq!(err.to_string(), "invalid column 9 (board has 7 columns)");

        let err = BoardError::MalformedSerialization {
            expected: 42,
            actual: 41,
        };
        assert_eq!(
            err.to_string(),
            "serialized board must have 42 cells, got 41"
        );
    }

    #[test]
    fn test_game_error_display() {
        let err = GameError::Abandoned("Alice".to_string());
        assert_eq!(err.to_string(), "Alice did not provide a move");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("search.depth must be in [1, 8]".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: search.depth must be in [1, 8]"
        );
    }
}
