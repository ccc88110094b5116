use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use super::model::{
    required_fields_present, Dataset, IngestStats, Listing, NumericParseError, Record, DEDUP_KEY,
};
use super::tokenizer::{leading_blank_lines, split_lines, tokenize_row};

// ---------------------------------------------------------------------------
// Errors and policy
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    /// The raw text could not be obtained at all. Acquisition is the host's
    /// concern; the core reports the failure and does not retry.
    #[error("failed to read {}: {source}", path.display())]
    Acquisition {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source text has no non-blank line to serve as a header.
    #[error("source text contains no header row")]
    MissingHeader,

    /// A surviving record carried a metric value that is not a number and
    /// the caller asked for the load to abort on that.
    #[error(transparent)]
    Numeric(#[from] NumericParseError),
}

/// What to do when a validated record's metric cell fails numeric parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericPolicy {
    /// Abort the whole load with the parse error.
    Fail,
    /// Drop the listing, count it in [`IngestStats`], and keep going.
    SkipListing,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a listings file and run the full pipeline on its contents.
pub fn load_file(path: &Path, policy: NumericPolicy) -> Result<Dataset, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Acquisition {
        path: path.to_path_buf(),
        source,
    })?;
    parse_text(&text, policy)
}

/// Run the full pipeline on one source text:
///
/// split lines → tokenize → zip with header → validate → dedupe → type-check
///
/// The first non-blank line is the header. Malformed and incomplete rows are
/// dropped and counted, never fatal. Duplicate model names keep their first
/// occurrence. Metric parsing follows `policy`.
pub fn parse_text(text: &str, policy: NumericPolicy) -> Result<Dataset, LoadError> {
    let mut stats = IngestStats {
        leading_blank_lines: leading_blank_lines(text),
        ..IngestStats::default()
    };
    if stats.leading_blank_lines > 0 {
        warn!(
            "{} blank line(s) before the header; first non-blank line promoted to header",
            stats.leading_blank_lines
        );
    }

    let mut lines = split_lines(text).into_iter();
    let header = match lines.next() {
        Some(line) => tokenize_row(line),
        None => return Err(LoadError::MissingHeader),
    };

    let rows: Vec<Vec<String>> = lines.map(tokenize_row).collect();
    let records = build_records(&header, rows, &mut stats);

    let total = records.len();
    let records = dedupe(records, DEDUP_KEY);
    stats.duplicate_rows = total - records.len();

    let mut listings = Vec::with_capacity(records.len());
    for record in &records {
        match Listing::from_record(record) {
            Ok(listing) => listings.push(listing),
            Err(err) => match policy {
                NumericPolicy::Fail => return Err(err.into()),
                NumericPolicy::SkipListing => {
                    stats.skipped_numeric_rows += 1;
                    warn!(
                        "dropping '{}': {err}",
                        record.get(DEDUP_KEY).map(String::as_str).unwrap_or("?")
                    );
                }
            },
        }
    }

    debug!(
        "parsed {} listing(s); dropped {} malformed, {} incomplete, {} duplicate, {} non-numeric",
        listings.len(),
        stats.malformed_rows,
        stats.incomplete_rows,
        stats.duplicate_rows,
        stats.skipped_numeric_rows
    );

    Ok(Dataset::from_listings(listings, stats))
}

// ---------------------------------------------------------------------------
// Record builder
// ---------------------------------------------------------------------------

/// Zip each row with the header into a [`Record`]. Rows whose field count
/// does not match the header are dropped and counted, as are records missing
/// a required column or carrying an empty value in one. Output order is
/// input order minus the discards.
pub fn build_records(
    header: &[String],
    rows: Vec<Vec<String>>,
    stats: &mut IngestStats,
) -> Vec<Record> {
    let mut records = Vec::with_capacity(rows.len());

    for (row_no, row) in rows.into_iter().enumerate() {
        if row.len() != header.len() {
            stats.malformed_rows += 1;
            warn!(
                "data row {row_no}: {} field(s), expected {}",
                row.len(),
                header.len()
            );
            continue;
        }

        let record: Record = header.iter().cloned().zip(row).collect();
        if !required_fields_present(&record) {
            stats.incomplete_rows += 1;
            debug!("data row {row_no}: missing required field(s)");
            continue;
        }

        records.push(record);
    }

    records
}

// ---------------------------------------------------------------------------
// Deduplicator
// ---------------------------------------------------------------------------

/// Keep the first record for each value of `key`, preserving relative order.
/// Later occurrences are dropped without complaint; duplicates are an
/// expected condition in the source data. Single pass, O(distinct keys)
/// extra space.
pub fn dedupe(records: Vec<Record>, key: &str) -> Vec<Record> {
    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| {
            let value = record.get(key).cloned().unwrap_or_default();
            seen.insert(value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::columns;

    fn header() -> Vec<String> {
        columns::REQUIRED.iter().map(|c| c.to_string()).collect()
    }

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn malformed_rows_are_dropped_and_counted() {
        let mut stats = IngestStats::default();
        let rows = vec![
            row(&["Model S", "Tesla", "79,990", "3.1", "670"]),
            row(&["Mustang", "Ford", "55,000"]),
        ];
        let records = build_records(&header(), rows, &mut stats);
        assert_eq!(records.len(), 1);
        assert_eq!(stats.malformed_rows, 1);
        assert_eq!(records[0][columns::MODEL], "Model S");
    }

    #[test]
    fn rows_with_empty_required_fields_are_dropped() {
        let mut stats = IngestStats::default();
        let rows = vec![
            row(&["Model S", "Tesla", "", "3.1", "670"]),
            row(&["Mustang", "Ford", "55,000", "5.0", "450"]),
        ];
        let records = build_records(&header(), rows, &mut stats);
        assert_eq!(records.len(), 1);
        assert_eq!(stats.incomplete_rows, 1);
        assert_eq!(records[0][columns::MODEL], "Mustang");
    }

    #[test]
    fn dedupe_keeps_first_occurrence_in_order() {
        let mut stats = IngestStats::default();
        let rows = vec![
            row(&["Model X", "Tesla", "50000", "4.0", "500"]),
            row(&["Roadster", "Tesla", "200000", "1.9", "1000"]),
            row(&["Model X", "Tesla", "60000", "4.0", "500"]),
        ];
        let records = build_records(&header(), rows, &mut stats);
        let deduped = dedupe(records, DEDUP_KEY);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0][columns::MODEL], "Model X");
        assert_eq!(deduped[0][columns::PRICE], "50000");
        assert_eq!(deduped[1][columns::MODEL], "Roadster");
    }

    #[test]
    fn dedupe_is_idempotent() {
        let mut stats = IngestStats::default();
        let rows = vec![
            row(&["A", "X", "1", "1", "1"]),
            row(&["B", "X", "2", "2", "2"]),
            row(&["A", "X", "3", "3", "3"]),
        ];
        let records = build_records(&header(), rows, &mut stats);
        let once = dedupe(records, DEDUP_KEY);
        let twice = dedupe(once.clone(), DEDUP_KEY);
        assert_eq!(once, twice);
    }

    #[test]
    fn parse_text_runs_the_full_pipeline() {
        let text = "\
Car Model,Car Make,Price (in USD),0-60 MPH Time (seconds),Horsepower
Model S,Tesla,\"79,990\",3.1,670
Model S,Tesla,\"81,000\",3.0,690
Mustang,Ford,\"55,000\",5.0,450
";
        let ds = parse_text(text, NumericPolicy::Fail).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.listings[0].model, "Model S");
        assert_eq!(ds.listings[0].price_usd, 79_990.0);
        assert_eq!(ds.listings[1].model, "Mustang");
        assert_eq!(ds.listings[1].price_usd, 55_000.0);
        assert_eq!(ds.stats.duplicate_rows, 1);
        assert_eq!(ds.makes, vec!["Ford".to_string(), "Tesla".to_string()]);
    }

    #[test]
    fn blank_leading_lines_promote_the_header_and_are_counted() {
        let text = "\n\nCar Model,Car Make,Price (in USD),0-60 MPH Time (seconds),Horsepower\nGT,Ford,500000,3.0,660\n";
        let ds = parse_text(text, NumericPolicy::Fail).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.stats.leading_blank_lines, 2);
    }

    #[test]
    fn blank_only_text_is_missing_a_header() {
        assert!(matches!(
            parse_text("\n  \n\n", NumericPolicy::Fail),
            Err(LoadError::MissingHeader)
        ));
        assert!(matches!(
            parse_text("", NumericPolicy::Fail),
            Err(LoadError::MissingHeader)
        ));
    }

    #[test]
    fn numeric_policy_fail_aborts_the_load() {
        let text = "\
Car Model,Car Make,Price (in USD),0-60 MPH Time (seconds),Horsepower
Ghost,Rolls-Royce,N/A,4.6,563
";
        match parse_text(text, NumericPolicy::Fail) {
            Err(LoadError::Numeric(err)) => assert_eq!(err.value, "N/A"),
            other => panic!("expected numeric error, got {other:?}"),
        }
    }

    #[test]
    fn numeric_policy_skip_drops_and_counts() {
        let text = "\
Car Model,Car Make,Price (in USD),0-60 MPH Time (seconds),Horsepower
Ghost,Rolls-Royce,N/A,4.6,563
Mustang,Ford,\"55,000\",5.0,450
";
        let ds = parse_text(text, NumericPolicy::SkipListing).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.listings[0].model, "Mustang");
        assert_eq!(ds.stats.skipped_numeric_rows, 1);
    }

    #[test]
    fn load_file_reports_acquisition_failures() {
        let err = load_file(Path::new("/no/such/listings.csv"), NumericPolicy::Fail).unwrap_err();
        assert!(matches!(err, LoadError::Acquisition { .. }));
    }
}
