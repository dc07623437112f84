//! Error types for the dialect layer.

/// Boxed error coming from a driver or connection pool.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while opening a pool or running statements.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No driver is registered under the requested name.
    #[error("Unknown driver '{0}' (forgotten registration?)")]
    UnknownDriver(String),

    /// The driver could not establish a connection pool.
    #[error("Connection error: {0}")]
    Connection(#[source] BoxError),

    /// A statement failed to execute.
    #[error("Failed to execute '{sql}': {source}")]
    Execution {
        /// The SQL that failed.
        sql: String,
        /// The driver error.
        #[source]
        source: BoxError,
    },

    /// The database handle has no connection pool yet.
    #[error("No connection pool configured")]
    NoConnPool,

    /// A field name does not belong to the table.
    #[error("Field '{field}' not found in table '{table}'")]
    FieldNotFound {
        /// Table name.
        table: String,
        /// Requested field.
        field: String,
    },

    /// An index name does not belong to the table.
    #[error("Index '{index}' not found in table '{table}'")]
    IndexNotFound {
        /// Table name.
        table: String,
        /// Requested index.
        index: String,
    },
}

impl Error {
    /// Wraps a driver error raised while running `sql`.
    pub fn execution(sql: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Execution {
            sql: sql.into(),
            source: source.into(),
        }
    }
}

/// Result type for dialect operations.
pub type Result<T> = std::result::Result<T, Error>;
