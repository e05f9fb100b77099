//! Loads the static content files into a [`ContentBundle`].
//!
//! Each collection lives in its own JSON array file inside one directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use study_core::catalog::{CatalogError, ContentBundle, ContentCatalog};
use thiserror::Error;

pub const MODULES_FILE: &str = "modules.json";
pub const TIMELINE_FILE: &str = "timeline.json";
pub const GLOSSARY_FILE: &str = "glossary.json";
pub const QUIZ_BANK_FILE: &str = "quizbank.json";
pub const SOURCES_FILE: &str = "sources.json";
pub const FLASHCARDS_FILE: &str = "flashcards.json";
pub const LEARNING_PATHS_FILE: &str = "learning-paths.json";
pub const SITES_FILE: &str = "normandy-sites.json";
pub const MUSEUM_FILE: &str = "museum.json";
pub const MAPS_FILE: &str = "historical-maps.json";
pub const VIDEOS_FILE: &str = "videos.json";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Read every collection file under `dir`.
///
/// # Errors
///
/// Returns `ContentLoadError` if a file is missing, unreadable or malformed.
pub fn load_bundle(dir: &Path) -> Result<ContentBundle, ContentLoadError> {
    Ok(ContentBundle {
        modules: read_collection(dir, MODULES_FILE)?,
        timeline: read_collection(dir, TIMELINE_FILE)?,
        glossary: read_collection(dir, GLOSSARY_FILE)?,
        quiz_bank: read_collection(dir, QUIZ_BANK_FILE)?,
        sources: read_collection(dir, SOURCES_FILE)?,
        flashcards: read_collection(dir, FLASHCARDS_FILE)?,
        learning_paths: read_collection(dir, LEARNING_PATHS_FILE)?,
        sites: read_collection(dir, SITES_FILE)?,
        museum_items: read_collection(dir, MUSEUM_FILE)?,
        maps: read_collection(dir, MAPS_FILE)?,
        videos: read_collection(dir, VIDEOS_FILE)?,
    })
}

/// Read `dir` and index it.
///
/// # Errors
///
/// Returns `ContentLoadError` if loading fails or the content does not
/// validate.
pub fn load_catalog(dir: &Path) -> Result<ContentCatalog, ContentLoadError> {
    let bundle = load_bundle(dir)?;
    Ok(ContentCatalog::new(bundle)?)
}

fn read_collection<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Vec<T>, ContentLoadError> {
    let path = dir.join(file);
    let raw = fs::read_to_string(&path).map_err(|source| ContentLoadError::Io {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ContentLoadError::Parse { path, source })
}
