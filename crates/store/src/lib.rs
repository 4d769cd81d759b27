pub mod file;

pub use file::{FileStore, LoadReport, SkippedRecord, StoreError};
