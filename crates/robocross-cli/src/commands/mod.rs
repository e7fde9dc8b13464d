pub mod build;
pub mod catalog;
pub mod config;
pub mod play;

use std::path::Path;

use robocross_core::{Catalog, Config, CoreError};

/// The configured catalog file, or the built-in list.
pub fn load_catalog(config: &Config) -> Result<Catalog, CoreError> {
    match &config.routine.catalog_path {
        Some(path) => Catalog::load(Path::new(path)),
        None => Ok(Catalog::builtin()),
    }
}
