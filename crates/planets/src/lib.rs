//! Static planet definitions and space station recipes.
//!
//! Both are authoring data: loaded once at world start, never mutated afterwards.

pub mod catalog;
pub mod recipe;

pub use catalog::*;
pub use recipe::*;

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure to load planet or recipe data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid data in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("planet {0} is defined more than once")]
    DuplicatePlanet(engine_core::DimensionId),
}

/// Read and parse a RON data file.
pub(crate) fn read_ron<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let data = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&data).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
