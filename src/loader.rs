use crate::error::LoadError;
use crate::types::{InspectionRecord, RawRow, REQUIRED_COLUMNS};
use crate::util::{parse_amount_safe, parse_text_safe};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub skipped_rows: usize,
}

pub fn load_records(path: &Path) -> Result<(Vec<InspectionRecord>, LoadReport), LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file)
}

/// Read inspection rows from any CSV source.
///
/// The header must name every column in `REQUIRED_COLUMNS`; anything else is a
/// schema mismatch and nothing is returned. Rows whose values fail validation
/// are skipped and counted.
pub fn load_from_reader<R: Read>(
    reader: R,
) -> Result<(Vec<InspectionRecord>, LoadReport), LoadError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }

    let mut total_rows = 0usize;
    let mut skipped_rows = 0usize;
    let mut records = Vec::new();

    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        total_rows += 1;
        // +2: one for the header, one for 1-based numbering.
        let line = idx + 2;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Skipping malformed row {}: {}", line, e);
                skipped_rows += 1;
                continue;
            }
        };
        match clean_row(row) {
            Some(record) => records.push(record),
            None => {
                tracing::warn!("Skipping row {}: empty field or invalid amount", line);
                skipped_rows += 1;
            }
        }
    }

    let report = LoadReport {
        total_rows,
        loaded_rows: records.len(),
        skipped_rows,
    };
    Ok((records, report))
}

fn clean_row(row: RawRow) -> Option<InspectionRecord> {
    Some(InspectionRecord {
        consultant_name: parse_text_safe(row.consultant_name.as_deref())?,
        lga: parse_text_safe(row.lga.as_deref())?,
        facility_type: parse_text_safe(row.facility_type.as_deref())?,
        status: parse_text_safe(row.status.as_deref())?,
        amount_charged: parse_amount_safe(row.amount_charged.as_deref())?,
    })
}
