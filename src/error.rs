use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a meteorite dataset. These are fatal at startup.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed value '{value}' in column '{column}' at row {row}")]
    Malformed {
        row: usize,
        column: String,
        value: String,
    },
}

/// Errors raised while writing result files. Callers report these and carry on.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Errors raised while reading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Any error the crate can produce.
#[derive(Error, Debug)]
pub enum MeteorError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = LoadError::NotFound(PathBuf::from("missing.csv"));
        assert_eq!(err.to_string(), "Dataset not found: missing.csv");
    }

    #[test]
    fn test_missing_column_display() {
        let err = LoadError::MissingColumn("reclat".to_string());
        assert_eq!(err.to_string(), "Missing required column: reclat");
    }

    #[test]
    fn test_malformed_display() {
        let err = LoadError::Malformed {
            row: 7,
            column: "mass".to_string(),
            value: "heavy".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed value 'heavy' in column 'mass' at row 7"
        );
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let load_err: LoadError = io_err.into();
        assert!(matches!(load_err, LoadError::Io(_)));
        assert!(load_err.to_string().contains("access denied"));
    }

    #[test]
    fn test_persist_error_names_path() {
        let err = PersistError::Io {
            path: PathBuf::from("/readonly/out.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/readonly/out.csv"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_config_invalid_display() {
        let err = ConfigError::Invalid("top_classes must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid config: top_classes must be positive"
        );
    }

    #[test]
    fn test_meteor_error_is_transparent() {
        let err: MeteorError = LoadError::MissingColumn("name".to_string()).into();
        assert_eq!(err.to_string(), "Missing required column: name");
        assert!(matches!(err, MeteorError::Load(_)));
    }

    #[test]
    fn test_error_is_debug() {
        let err = LoadError::MissingColumn("mass".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("MissingColumn"));
    }
}
