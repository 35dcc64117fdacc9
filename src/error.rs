use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ProfitError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors loading reference tables or market snapshots from disk.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {table} entry: {reason}")]
    Invalid { table: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Profit(#[from] ProfitError),

    #[error("market scan failed on {platform}: {reason}")]
    Scan { platform: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sku;

    #[test]
    fn profit_error_is_transparent() {
        let err: Error = ProfitError::ProductNotFound {
            sku: Sku::new("NOPE"),
        }
        .into();
        assert_eq!(err.to_string(), "product with SKU NOPE not found");
    }

    #[test]
    fn data_error_names_table() {
        let err = DataError::Invalid {
            table: "exchange_rates",
            reason: "rate must be positive".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid exchange_rates entry: rate must be positive"
        );
    }
}
