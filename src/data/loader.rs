//! CSV overrides for the reference tables.
//!
//! Two optional files, located through the environment (a `.env` file is
//! honored):
//!
//! - `TIRE_MEASURED_DIAMETERS_CSV`: columns `size,diameter_in`; rows are
//!   merged over the built-in table
//! - `TIRE_GEAR_CATALOG_CSV`: column `ratio`; replaces the built-in catalog
//!
//! Bad rows are skipped and reported, never fatal. A missing column or an
//! unreadable file is fatal (exit code 3).

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::data::reference::ReferenceData;
use crate::error::AppError;

pub const ENV_MEASURED_DIAMETERS: &str = "TIRE_MEASURED_DIAMETERS_CSV";
pub const ENV_GEAR_CATALOG: &str = "TIRE_GEAR_CATALOG_CSV";

/// Where override tables come from.
#[derive(Debug, Clone, Default)]
pub struct ReferenceSources {
    pub measured_diameters_csv: Option<PathBuf>,
    pub gear_catalog_csv: Option<PathBuf>,
}

impl ReferenceSources {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            measured_diameters_csv: std::env::var_os(ENV_MEASURED_DIAMETERS).map(PathBuf::from),
            gear_catalog_csv: std::env::var_os(ENV_GEAR_CATALOG).map(PathBuf::from),
        }
    }
}

/// A row-level problem encountered while loading a table.
#[derive(Debug, Clone)]
pub struct RowError {
    pub file: PathBuf,
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct LoadedReference {
    pub data: ReferenceData,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Build the reference dataset: built-in tables plus any configured overrides.
pub fn load_reference(sources: &ReferenceSources) -> Result<LoadedReference, AppError> {
    let mut data = ReferenceData::builtin();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_used = 0usize;

    if let Some(path) = &sources.measured_diameters_csv {
        let table = read_table(path, &["size", "diameter_in"])?;
        rows_read += table.rows.len();
        for (line, record) in &table.rows {
            match parse_diameter_row(record, &table.header_map) {
                Ok((size, d)) => {
                    data.measured_diameters.insert(&size, d);
                    rows_used += 1;
                }
                Err(message) => row_errors.push(RowError {
                    file: path.clone(),
                    line: *line,
                    message,
                }),
            }
        }
        row_errors.extend(table.errors);
        info!(
            path = %path.display(),
            entries = data.measured_diameters.len(),
            "loaded measured diameter overrides"
        );
    }

    if let Some(path) = &sources.gear_catalog_csv {
        let table = read_table(path, &["ratio"])?;
        rows_read += table.rows.len();
        let mut catalog = Vec::with_capacity(table.rows.len());
        for (line, record) in &table.rows {
            match parse_positive(get_field(record, &table.header_map, "ratio")) {
                Ok(r) => {
                    catalog.push(r);
                    rows_used += 1;
                }
                Err(message) => row_errors.push(RowError {
                    file: path.clone(),
                    line: *line,
                    message,
                }),
            }
        }
        row_errors.extend(table.errors);
        catalog.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        catalog.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
        if catalog.is_empty() {
            warn!(path = %path.display(), "gear catalog is empty; re-gear candidates will be empty");
        }
        data.gear_catalog = catalog;
    }

    for e in &row_errors {
        warn!(file = %e.file.display(), line = e.line, "skipped reference row: {}", e.message);
    }

    Ok(LoadedReference {
        data,
        row_errors,
        rows_read,
        rows_used,
    })
}

struct RawTable {
    header_map: HashMap<String, usize>,
    rows: Vec<(usize, StringRecord)>,
    errors: Vec<RowError>,
}

fn read_table(path: &Path, required: &[&str]) -> Result<RawTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(3, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(3, format!("Failed to read CSV headers in '{}': {e}", path.display())))?
        .clone();
    let header_map = build_header_map(&headers);

    for col in required {
        if !header_map.contains_key(*col) {
            return Err(AppError::new(
                3,
                format!("Missing required column `{col}` in '{}'", path.display()),
            ));
        }
    }

    let mut rows = Vec::new();
    let mut errors = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header line; CSV lines are 1-based.
        let line = idx + 2;
        match result {
            Ok(r) => rows.push((line, r)),
            Err(e) => errors.push(RowError {
                file: path.to_path_buf(),
                line,
                message: format!("CSV parse error: {e}"),
            }),
        }
    }
    debug!(path = %path.display(), rows = rows.len(), "read reference table");

    Ok(RawTable {
        header_map,
        rows,
        errors,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Strip a UTF-8 BOM on the first header.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn get_field<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> &'a str {
    header_map
        .get(name)
        .and_then(|&idx| record.get(idx))
        .unwrap_or("")
}

fn parse_diameter_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<(String, f64), String> {
    let size = get_field(record, header_map, "size");
    if size.is_empty() {
        return Err("Missing `size` value.".to_string());
    }
    let d = parse_positive(get_field(record, header_map, "diameter_in"))?;
    Ok((size.to_string(), d))
}

fn parse_positive(raw: &str) -> Result<f64, String> {
    let v: f64 = raw
        .parse()
        .map_err(|_| format!("Invalid number '{raw}'."))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("Value must be > 0, got {v}."))
    }
}
