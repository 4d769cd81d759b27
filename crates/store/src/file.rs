use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use stockroom_core::{Catalog, Product};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read data file `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not write data file `{path}`: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("data file `{path}` is not valid JSON: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("data file `{path}` must contain a top-level object keyed by product id")]
    NotAnObject { path: PathBuf },
    #[error("could not serialize catalog for `{path}`: {source}")]
    Serialize { path: PathBuf, source: serde_json::Error },
}

/// A catalog entry that could not be recovered from the data file.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedRecord {
    pub key: String,
    pub reason: String,
}

/// Outcome of a load: the recovered catalog plus whatever had to be skipped.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub catalog: Catalog,
    pub skipped: Vec<SkippedRecord>,
}

/// Wire shape of one persisted entry. Field names are the stable on-disk
/// contract; records only become [`Product`]s through the checked constructor.
#[derive(Debug, Deserialize)]
struct ProductRecord {
    product_id: String,
    name: String,
    quantity: u32,
    price: f64,
}

/// Flat-file JSON persistence for the catalog: one object keyed by product
/// id, written whole on save and read whole on load.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the catalog. A missing file is an empty catalog, not an error.
    /// Entries that fail to deserialize or validate are skipped and reported
    /// in the [`LoadReport`]; only an unreadable or top-level-malformed file
    /// surfaces as `Err`.
    pub fn load(&self) -> Result<LoadReport, StoreError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "data file not found, starting with empty catalog");
            return Ok(LoadReport::default());
        }

        let raw = fs::read_to_string(&self.path)
            .map_err(|source| StoreError::Read { path: self.path.clone(), source })?;
        let value: Value = serde_json::from_str(&raw)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })?;
        let Value::Object(entries) = value else {
            return Err(StoreError::NotAnObject { path: self.path.clone() });
        };

        let mut catalog = Catalog::default();
        let mut skipped = Vec::new();
        for (key, entry) in entries {
            match recover_product(&key, entry) {
                Ok(product) => {
                    // Duplicate keys cannot survive a JSON object, so insert
                    // only fails if an earlier record claimed this id field.
                    if let Err(error) = catalog.insert(product) {
                        skipped.push(SkippedRecord { key, reason: error.to_string() });
                    }
                }
                Err(reason) => skipped.push(SkippedRecord { key, reason }),
            }
        }

        for record in &skipped {
            warn!(key = %record.key, reason = %record.reason, "skipped malformed catalog entry");
        }
        info!(
            path = %self.path.display(),
            products = catalog.len(),
            skipped = skipped.len(),
            "catalog loaded"
        );

        Ok(LoadReport { catalog, skipped })
    }

    /// Writes the whole catalog, replacing any previous file contents. The
    /// object key order follows catalog iteration order.
    pub fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let mut entries = Map::new();
        for product in catalog.iter() {
            let record = serde_json::to_value(product)
                .map_err(|source| StoreError::Serialize { path: self.path.clone(), source })?;
            entries.insert(product.product_id.as_str().to_string(), record);
        }

        let rendered = serde_json::to_string_pretty(&Value::Object(entries))
            .map_err(|source| StoreError::Serialize { path: self.path.clone(), source })?;
        fs::write(&self.path, rendered)
            .map_err(|source| StoreError::Write { path: self.path.clone(), source })?;

        info!(path = %self.path.display(), products = catalog.len(), "catalog saved");
        Ok(())
    }
}

fn recover_product(key: &str, entry: Value) -> Result<Product, String> {
    let record: ProductRecord =
        serde_json::from_value(entry).map_err(|error| error.to_string())?;
    let product = Product::new(record.product_id, record.name, record.quantity, record.price)
        .map_err(|error| error.to_string())?;
    if product.product_id.as_str() != key {
        return Err(format!(
            "entry key `{key}` does not match its product_id `{}`",
            product.product_id
        ));
    }
    Ok(product)
}
