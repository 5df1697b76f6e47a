use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Example catalog abstraction
///
/// The recommender asks a catalog for the examples and selectable genres of a
/// duration band. Classification never depends on what the catalog holds, so a
/// catalog can be swapped or extended without touching it.
use crate::{
    error::{AppError, AppResult},
    models::{CatalogExample, DurationBand},
};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Most examples returned for a genre-filtered lookup
pub const EXAMPLE_LIMIT: usize = 4;

/// Trait for recommendation example sources
pub trait ExampleCatalog: Send + Sync {
    /// Every example of a band, in catalog order
    fn examples(&self, band: DurationBand) -> &[CatalogExample];

    /// Genres a user can narrow the band's examples by
    fn genre_options(&self, band: DurationBand) -> &[String];

    /// Examples of a band, optionally narrowed to a genre
    ///
    /// Without a genre every example is returned. With one, the first
    /// [`EXAMPLE_LIMIT`] examples whose tags contain it (case-insensitively).
    fn lookup(&self, band: DurationBand, genre: Option<&str>) -> Vec<CatalogExample> {
        let examples = self.examples(band);
        match genre {
            None => examples.to_vec(),
            Some(genre) => examples
                .iter()
                .filter(|example| example.matches_genre(genre))
                .take(EXAMPLE_LIMIT)
                .cloned()
                .collect(),
        }
    }

    /// Catalog name for logging
    fn name(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    bands: Vec<BandEntry>,
}

#[derive(Debug, Deserialize)]
struct BandEntry {
    band: DurationBand,
    #[serde(default)]
    genres: Vec<String>,
    #[serde(default)]
    examples: Vec<CatalogExample>,
}

#[derive(Debug, Default)]
struct BandCatalog {
    genres: Vec<String>,
    examples: Vec<CatalogExample>,
}

/// Catalog held entirely in memory, loaded from JSON
#[derive(Debug)]
pub struct StaticCatalog {
    bands: HashMap<DurationBand, BandCatalog>,
}

impl StaticCatalog {
    /// The catalog compiled into the binary
    pub fn builtin() -> AppResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Loads a catalog file, e.g. the one named by `CATALOG_PATH`
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Catalog(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Parses a catalog document; every duration band must be present
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let file: CatalogFile = serde_json::from_str(raw)?;

        let mut bands: HashMap<DurationBand, BandCatalog> = HashMap::new();
        for entry in file.bands {
            let band = bands.entry(entry.band).or_default();
            band.genres.extend(entry.genres);
            band.examples.extend(entry.examples);
        }

        let missing: Vec<String> = DurationBand::ALL
            .iter()
            .filter(|band| !bands.contains_key(*band))
            .map(|band| band.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(AppError::Catalog(format!(
                "Catalog has no entry for: {}",
                missing.join(", ")
            )));
        }

        tracing::debug!(
            examples = bands.values().map(|b| b.examples.len()).sum::<usize>(),
            "Example catalog loaded"
        );

        Ok(Self { bands })
    }
}

impl ExampleCatalog for StaticCatalog {
    fn examples(&self, band: DurationBand) -> &[CatalogExample] {
        self.bands
            .get(&band)
            .map(|b| b.examples.as_slice())
            .unwrap_or(&[])
    }

    fn genre_options(&self, band: DurationBand) -> &[String] {
        self.bands
            .get(&band)
            .map(|b| b.genres.as_slice())
            .unwrap_or(&[])
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
