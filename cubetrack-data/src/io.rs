//! JSON reading and writing for datasets and raw telemetry.
//!
//! Datasets are stored as an array of trajectories, each an array of
//! `{"x", "y", "z"}` objects. Telemetry files are an array of
//! `{"id", "samples"}` objects with nullable coordinates.

use crate::error::DataError;
use crate::telemetry::ObjectTelemetry;
use crate::trajectory::Dataset;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Parse a dataset from a reader. Ragged or empty data is rejected.
pub fn dataset_from_reader<R: Read>(reader: R) -> Result<Dataset, DataError> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn dataset_from_str(json: &str) -> Result<Dataset, DataError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a dataset from a JSON file.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, DataError> {
    debug!("Loading dataset from: {}", path.as_ref().display());
    let file = File::open(path.as_ref())?;
    let dataset = dataset_from_reader(BufReader::new(file))?;
    info!(
        "Dataset loaded: {} trajectories x {} steps",
        dataset.len(),
        dataset.step_count()
    );
    Ok(dataset)
}

/// Write a dataset as pretty-printed JSON.
pub fn write_dataset<W: Write>(writer: W, dataset: &Dataset) -> Result<(), DataError> {
    serde_json::to_writer_pretty(writer, dataset)?;
    Ok(())
}

/// Save a dataset to a JSON file, replacing any existing file.
///
/// The JSON is written to a temp file in the target directory and renamed
/// over `path`, so a failed write leaves any previous file intact.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save_dataset<P: AsRef<Path>>(path: P, dataset: &Dataset) -> Result<(), DataError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp_file = NamedTempFile::new_in(dir)?;
    let mut writer = BufWriter::new(temp_file);
    write_dataset(&mut writer, dataset)?;
    let temp_file = writer.into_inner().map_err(|e| e.into_error())?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    info!("Dataset saved: {} trajectories", dataset.len());
    Ok(())
}

pub fn telemetry_from_reader<R: Read>(reader: R) -> Result<Vec<ObjectTelemetry>, DataError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load raw telemetry from a JSON file.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_telemetry<P: AsRef<Path>>(path: P) -> Result<Vec<ObjectTelemetry>, DataError> {
    let file = File::open(path.as_ref())?;
    let objects = telemetry_from_reader(BufReader::new(file))?;
    info!("Telemetry loaded: {} objects", objects.len());
    Ok(objects)
}
