// Runtime configuration, read from the environment at startup.
//
// - `MODOSAURUS_CATALOG`: path to a JSON scale catalog that replaces the
//   built-in one. See `ScaleCatalog::from_json_str` for the format.
// - `RUST_LOG`: log filter for the binary's tracing subscriber (default
//   `warn`). Handled in `main.rs`, listed here for completeness.

use crate::catalog::ScaleCatalog;
use crate::error::CatalogError;
use std::path::PathBuf;
use tracing::info;

/// Environment variable naming an external catalog file.
pub const CATALOG_ENV: &str = "MODOSAURUS_CATALOG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// External catalog file. `None` selects the built-in catalog.
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Config::from_lookup(|key| std::env::var_os(key))
    }

    /// Build a config from an arbitrary variable lookup. An empty value is
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<std::ffi::OsString>,
    {
        Config {
            catalog_path: lookup(CATALOG_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
        }
    }

    /// The catalog this configuration selects.
    pub fn load_catalog(&self) -> Result<ScaleCatalog, CatalogError> {
        match &self.catalog_path {
            Some(path) => {
                let catalog = ScaleCatalog::load(path)?;
                info!(path = %path.display(), scales = catalog.len(), "loaded scale catalog");
                Ok(catalog)
            }
            None => Ok(ScaleCatalog::builtin()),
        }
    }
}
