//! # gale-cases
//!
//! Loads a simulation result table (CSV with named columns) into validated
//! [`Case`] records.
//!
//! Rows are scanned in file order. Only rows whose `status` is `OK`
//! (case-insensitive, surrounding whitespace ignored) survive, and surviving
//! rows are numbered `1..=N` with no gaps, independent of their source row.

mod error;

pub use error::CaseError;

use std::path::Path;

use csv::StringRecord;
use gale_core::Case;

/// Column names expected in the result table.
pub const COLUMNS: [&str; 8] = [
    "status",
    "airfoil",
    "mach",
    "reynolds",
    "aoa",
    "coordinates_json",
    "cl",
    "cd",
];

/// Load and validate every `OK` row of the table at `path`.
///
/// # Errors
///
/// - [`CaseError::NotFound`] if `path` is not a file.
/// - [`CaseError::Read`] if the table or its header cannot be read.
/// - [`CaseError::Validation`] if a surviving row has malformed
///   `coordinates_json` or a missing/non-numeric numeric field.
/// - [`CaseError::Empty`] if no row survives filtering.
pub fn load_cases(path: &Path) -> Result<Vec<Case>, CaseError> {
    if !path.is_file() {
        return Err(CaseError::NotFound(path.to_path_buf()));
    }

    let read_err = |source| CaseError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;
    let columns = Columns::locate(reader.headers().map_err(read_err)?);

    let mut cases = Vec::new();
    let mut skipped = 0_usize;
    for (idx, record) in reader.records().enumerate() {
        let row = idx + 1;
        let record = record.map_err(|e| CaseError::Validation {
            row,
            message: e.to_string(),
        })?;

        if !columns.is_ok(&record) {
            skipped += 1;
            continue;
        }

        let case_id = u32::try_from(cases.len() + 1).map_err(|_| CaseError::Validation {
            row,
            message: "too many cases".to_string(),
        })?;
        cases.push(columns.case(case_id, row, &record)?);
    }

    tracing::debug!(
        path = %path.display(),
        loaded = cases.len(),
        skipped,
        "loaded result table"
    );

    if cases.is_empty() {
        return Err(CaseError::Empty(path.to_path_buf()));
    }
    Ok(cases)
}

/// Header positions of the known columns. Absent columns read as empty.
struct Columns {
    status: Option<usize>,
    airfoil: Option<usize>,
    mach: Option<usize>,
    reynolds: Option<usize>,
    aoa: Option<usize>,
    coordinates: Option<usize>,
    cl: Option<usize>,
    cd: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            status: find("status"),
            airfoil: find("airfoil"),
            mach: find("mach"),
            reynolds: find("reynolds"),
            aoa: find("aoa"),
            coordinates: find("coordinates_json"),
            cl: find("cl"),
            cd: find("cd"),
        }
    }

    fn is_ok(&self, record: &StringRecord) -> bool {
        cell(record, self.status).eq_ignore_ascii_case("OK")
    }

    fn case(&self, case_id: u32, row: usize, record: &StringRecord) -> Result<Case, CaseError> {
        let raw_coords = cell(record, self.coordinates);
        let coordinates = if raw_coords.is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(raw_coords).map_err(|e| CaseError::Validation {
                row,
                message: format!("invalid coordinates_json: {e}"),
            })?
        };

        Ok(Case {
            case_id,
            airfoil: cell(record, self.airfoil).to_string(),
            mach: number(record, self.mach, "mach", row)?,
            reynolds: number(record, self.reynolds, "reynolds", row)?,
            aoa: number(record, self.aoa, "aoa", row)?,
            coordinates,
            cl: number(record, self.cl, "cl", row)?,
            cd: number(record, self.cd, "cd", row)?,
        })
    }
}

fn cell(record: &StringRecord, column: Option<usize>) -> &str {
    column.and_then(|i| record.get(i)).unwrap_or_default().trim()
}

fn number(
    record: &StringRecord,
    column: Option<usize>,
    field: &str,
    row: usize,
) -> Result<f64, CaseError> {
    let raw = cell(record, column);
    if raw.is_empty() {
        return Err(CaseError::Validation {
            row,
            message: format!("missing {field}"),
        });
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CaseError::Validation {
            row,
            message: format!("{field} is not a number: '{raw}'"),
        }),
    }
}
