//! Error taxonomy shared by the whole crate.
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a run. No variant is retried; the caller is
/// expected to fail fast and persist nothing.
#[derive(Debug, Error)]
pub enum Error {
    /// A named column is absent from the source table.
    #[error("column `{column}` not found in table")]
    Schema { column: String },

    /// A run parameter is outside its valid range.
    #[error("invalid {name}: {value}")]
    Config { name: &'static str, value: String },

    /// A NaN or infinite loss appeared mid-computation.
    #[error("non-finite loss during {context}")]
    Numeric { context: String },

    /// A layer carries an activation the export format has no kind for.
    #[error("unsupported activation for export: {activation}")]
    UnsupportedActivation { activation: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn schema(column: impl Into<String>) -> Self {
        Error::Schema {
            column: column.into(),
        }
    }

    pub(crate) fn config(name: &'static str, value: impl ToString) -> Self {
        Error::Config {
            name,
            value: value.to_string(),
        }
    }
}
