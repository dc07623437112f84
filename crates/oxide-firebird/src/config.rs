//! Dialect configuration.

use std::sync::Arc;

use oxide_dialect::ConnPool;
use serde::Deserialize;

/// Driver used when [`Config::driver_name`] is empty.
pub const DEFAULT_DRIVER_NAME: &str = "firebirdsql";

/// String size used for indexed string columns without a declared size
/// when [`Config::default_string_size`] is `0`.
pub const DEFAULT_STRING_SIZE: u32 = 256;

/// Configuration of a [`FirebirdDialect`](crate::FirebirdDialect).
///
/// Every field is optional when deserializing. The connection pool cannot
/// be deserialized and is always `None` afterwards.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the registered driver; empty means [`DEFAULT_DRIVER_NAME`].
    pub driver_name: String,
    /// Data source string handed to the driver.
    pub dsn: String,
    /// Size for indexed string columns without a declared size; `0` means
    /// [`DEFAULT_STRING_SIZE`].
    pub default_string_size: u32,
    /// Pre-established pool; when set, no connection is opened.
    #[serde(skip)]
    pub conn: Option<Arc<dyn ConnPool>>,
}

impl Config {
    /// Creates a configuration for a data source string.
    #[must_use]
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            ..Self::default()
        }
    }

    /// Returns the driver to open connections with.
    #[must_use]
    pub fn driver_name(&self) -> &str {
        if self.driver_name.is_empty() {
            DEFAULT_DRIVER_NAME
        } else {
            &self.driver_name
        }
    }

    /// Returns the size used for indexed string columns without a declared size.
    #[must_use]
    pub const fn string_size(&self) -> u32 {
        if self.default_string_size > 0 {
            self.default_string_size
        } else {
            DEFAULT_STRING_SIZE
        }
    }
}
