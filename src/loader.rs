use crate::error::{DashboardError, Result};
use crate::types::{CleanRecord, CleanedDataset, LoadReport, REQUIRED_COLUMNS};
use crate::util::{normalize_column_name, parse_date_safe, parse_engagements};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Positions of the six required columns within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub date: usize,
    pub platform: usize,
    pub sentiment: usize,
    pub location: usize,
    pub engagements: usize,
    pub media_type: usize,
}

/// Normalize every header, keeping order and length.
pub fn normalize_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    headers
        .iter()
        .map(|h| normalize_column_name(h.as_ref().trim_start_matches('\u{feff}')))
        .collect()
}

/// Check that all required columns are present and resolve their positions.
///
/// When two headers normalize to the same name the last one wins.
/// `original` is only used to build the error message.
pub fn validate_schema<S: AsRef<str>>(
    normalized: &[String],
    original: &[S],
) -> Result<ColumnIndex> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for (idx, name) in normalized.iter().enumerate() {
        if let Some(prev) = positions.insert(name.as_str(), idx) {
            if REQUIRED_COLUMNS.contains(&name.as_str()) {
                warn!(
                    column = %name,
                    first = prev,
                    last = idx,
                    "duplicate column after normalization, using the last one"
                );
            }
        }
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !positions.contains_key(*c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DashboardError::Schema {
            missing,
            detected: original.iter().map(|h| h.as_ref().to_string()).collect(),
        });
    }

    let at = |name: &str| positions.get(name).copied().unwrap_or_default();
    Ok(ColumnIndex {
        date: at("date"),
        platform: at("platform"),
        sentiment: at("sentiment"),
        location: at("location"),
        engagements: at("engagements"),
        media_type: at("mediatype"),
    })
}

/// Coerce raw records into `CleanRecord`s.
///
/// Rows with an unparseable date are dropped; an unparseable engagement count
/// becomes 0 and the row is kept. An empty result is an error.
pub fn clean_records<I>(records: I, columns: ColumnIndex) -> Result<CleanedDataset>
where
    I: IntoIterator<Item = StringRecord>,
{
    let mut total_rows = 0usize;
    let mut defaulted_engagements = 0usize;
    let mut kept: Vec<CleanRecord> = Vec::new();

    for row in records {
        total_rows += 1;
        let Some(date) = parse_date_safe(row.get(columns.date)) else {
            continue;
        };
        let engagements = match parse_engagements(row.get(columns.engagements)) {
            Some(n) => n,
            None => {
                defaulted_engagements += 1;
                0
            }
        };
        let text = |idx: usize| row.get(idx).unwrap_or("").trim().to_string();

        kept.push(CleanRecord {
            date,
            platform: text(columns.platform),
            sentiment: text(columns.sentiment),
            location: text(columns.location),
            media_type: text(columns.media_type),
            engagements,
        });
    }

    let report = LoadReport {
        total_rows,
        kept_rows: kept.len(),
        dropped_rows: total_rows - kept.len(),
        defaulted_engagements,
    };
    debug!(
        dropped = report.dropped_rows,
        defaulted = report.defaulted_engagements,
        "row filter finished"
    );

    if kept.is_empty() {
        return Err(DashboardError::EmptyDataset);
    }
    Ok(CleanedDataset {
        records: kept,
        report,
    })
}

/// Read CSV bytes, validate the header and clean every row.
pub fn load_and_clean(bytes: &[u8]) -> Result<CleanedDataset> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(bytes);

    let original: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let normalized = normalize_headers(&original);
    let columns = validate_schema(&normalized, &original)?;

    let records = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;
    let dataset = clean_records(records, columns)?;
    info!(
        rows = dataset.report.total_rows,
        kept = dataset.report.kept_rows,
        "cleaned upload"
    );
    Ok(dataset)
}
