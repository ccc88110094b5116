use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

/// Header names the pipeline requires, exactly as they appear in the source.
/// Matching is case-sensitive; any other columns ride along as extras.
pub mod columns {
    pub const MODEL: &str = "Car Model";
    pub const MAKE: &str = "Car Make";
    pub const PRICE: &str = "Price (in USD)";
    pub const ACCELERATION: &str = "0-60 MPH Time (seconds)";
    pub const HORSEPOWER: &str = "Horsepower";

    /// Every column a record must carry, with a non-empty value, to survive
    /// validation.
    pub const REQUIRED: [&str; 5] = [MODEL, MAKE, PRICE, ACCELERATION, HORSEPOWER];
}

/// Records are deduplicated on the model name.
pub const DEDUP_KEY: &str = columns::MODEL;

// ---------------------------------------------------------------------------
// Record – one zipped row, still untyped
// ---------------------------------------------------------------------------

/// A raw record: column name → raw string value, straight out of the
/// tokenizer. Numeric columns are still strings at this stage.
pub type Record = BTreeMap<String, String>;

/// Whether every required column is present with a non-empty value.
pub fn required_fields_present(record: &Record) -> bool {
    columns::REQUIRED
        .iter()
        .all(|col| record.get(*col).is_some_and(|v| !v.is_empty()))
}

// ---------------------------------------------------------------------------
// Numeric parsing
// ---------------------------------------------------------------------------

/// A metric cell that survived validation but does not hold a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column '{column}': '{value}' is not a number")]
pub struct NumericParseError {
    pub column: String,
    pub value: String,
}

/// Parse a metric cell as `f64`, stripping grouping commas first
/// (`"79,990"` → `79990.0`). Stripping is a no-op on values without
/// separators. Non-finite results are rejected so a bare `"NaN"` cell can
/// never leak into a chart.
pub fn parse_number(column: &str, raw: &str) -> Result<f64, NumericParseError> {
    let cleaned = raw.trim().replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(NumericParseError {
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Listing – one validated row
// ---------------------------------------------------------------------------

/// A fully validated listing. Constructed only after the required-field and
/// numeric checks succeed, so projection code downstream never sees a parse
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub model: String,
    pub make: String,
    pub price_usd: f64,
    pub zero_to_sixty_s: f64,
    pub horsepower: f64,
    /// Pass-through columns the core does not interpret.
    pub extra: BTreeMap<String, String>,
}

impl Listing {
    /// Convert a raw record into a typed listing. Callers are expected to
    /// have run the record through [`required_fields_present`] first; a
    /// missing metric column shows up here as a parse error on the empty
    /// string.
    pub fn from_record(record: &Record) -> Result<Self, NumericParseError> {
        let cell = |col: &str| record.get(col).map(String::as_str).unwrap_or("");

        let price_usd = parse_number(columns::PRICE, cell(columns::PRICE))?;
        let zero_to_sixty_s = parse_number(columns::ACCELERATION, cell(columns::ACCELERATION))?;
        let horsepower = parse_number(columns::HORSEPOWER, cell(columns::HORSEPOWER))?;

        let extra: BTreeMap<String, String> = record
            .iter()
            .filter(|(col, _)| !columns::REQUIRED.contains(&col.as_str()))
            .map(|(col, val)| (col.clone(), val.clone()))
            .collect();

        Ok(Listing {
            model: cell(columns::MODEL).to_string(),
            make: cell(columns::MAKE).to_string(),
            price_usd,
            zero_to_sixty_s,
            horsepower,
            extra,
        })
    }
}

// ---------------------------------------------------------------------------
// IngestStats – what the pipeline dropped, and why
// ---------------------------------------------------------------------------

/// Per-load diagnostics: how many rows each recovery path discarded. None of
/// these are fatal; they exist so a host can surface "loaded 93 of 100 rows".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Blank physical lines skipped before the header line was found.
    pub leading_blank_lines: usize,
    /// Rows whose field count did not match the header.
    pub malformed_rows: usize,
    /// Rows missing a required column or carrying an empty value in one.
    pub incomplete_rows: usize,
    /// Rows suppressed because their dedup key was already seen.
    pub duplicate_rows: usize,
    /// Rows dropped for unparseable metric values under the skip policy.
    pub skipped_numeric_rows: usize,
}

// ---------------------------------------------------------------------------
// Dataset – the canonical record set for one load
// ---------------------------------------------------------------------------

/// The validated, deduplicated dataset for one source text. Immutable once
/// built; a re-load produces a fresh `Dataset` that replaces this one
/// wholesale.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Listings in first-occurrence order, unique by model name.
    pub listings: Vec<Listing>,
    /// Sorted distinct makes, for populating a brand selector.
    pub makes: Vec<String>,
    /// What the load dropped on the way here.
    pub stats: IngestStats,
}

impl Dataset {
    /// Build the dataset indexes from validated listings.
    pub fn from_listings(listings: Vec<Listing>, stats: IngestStats) -> Self {
        let makes: Vec<String> = listings
            .iter()
            .map(|l| l.make.clone())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        Dataset {
            listings,
            makes,
            stats,
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_number_strips_grouping_commas() {
        assert_eq!(parse_number("p", "1,234,567").unwrap(), 1_234_567.0);
    }

    #[test]
    fn parse_number_is_a_noop_without_separators() {
        assert_eq!(parse_number("p", "3.1").unwrap(), 3.1);
        assert_eq!(parse_number("p", " 670 ").unwrap(), 670.0);
    }

    #[test]
    fn parse_number_rejects_garbage() {
        assert!(parse_number("p", "N/A").is_err());
        assert!(parse_number("p", "").is_err());
        let err = parse_number("Horsepower", "fast").unwrap_err();
        assert_eq!(err.column, "Horsepower");
        assert_eq!(err.value, "fast");
    }

    #[test]
    fn parse_number_rejects_non_finite() {
        assert!(parse_number("p", "NaN").is_err());
        assert!(parse_number("p", "inf").is_err());
    }

    #[test]
    fn required_fields_reject_empty_values() {
        let mut rec = record(&[
            (columns::MODEL, "Model S"),
            (columns::MAKE, "Tesla"),
            (columns::PRICE, "79,990"),
            (columns::ACCELERATION, "3.1"),
            (columns::HORSEPOWER, "670"),
        ]);
        assert!(required_fields_present(&rec));

        rec.insert(columns::PRICE.to_string(), String::new());
        assert!(!required_fields_present(&rec));
    }

    #[test]
    fn listing_from_record_types_the_metrics() {
        let rec = record(&[
            (columns::MODEL, "Model S"),
            (columns::MAKE, "Tesla"),
            (columns::PRICE, "79,990"),
            (columns::ACCELERATION, "3.1"),
            (columns::HORSEPOWER, "670"),
            ("Year", "2020"),
        ]);
        let listing = Listing::from_record(&rec).unwrap();
        assert_eq!(listing.model, "Model S");
        assert_eq!(listing.make, "Tesla");
        assert_eq!(listing.price_usd, 79_990.0);
        assert_eq!(listing.zero_to_sixty_s, 3.1);
        assert_eq!(listing.horsepower, 670.0);
        assert_eq!(listing.extra.get("Year").map(String::as_str), Some("2020"));
    }

    #[test]
    fn listing_from_record_surfaces_bad_metric() {
        let rec = record(&[
            (columns::MODEL, "Mystery"),
            (columns::MAKE, "Acme"),
            (columns::PRICE, "N/A"),
            (columns::ACCELERATION, "4.0"),
            (columns::HORSEPOWER, "400"),
        ]);
        let err = Listing::from_record(&rec).unwrap_err();
        assert_eq!(err.column, columns::PRICE);
    }

    #[test]
    fn dataset_indexes_sorted_distinct_makes() {
        let listings = vec![
            Listing {
                model: "Mustang".into(),
                make: "Ford".into(),
                price_usd: 55_000.0,
                zero_to_sixty_s: 5.0,
                horsepower: 450.0,
                extra: BTreeMap::new(),
            },
            Listing {
                model: "Model S".into(),
                make: "Tesla".into(),
                price_usd: 79_990.0,
                zero_to_sixty_s: 3.1,
                horsepower: 670.0,
                extra: BTreeMap::new(),
            },
            Listing {
                model: "GT".into(),
                make: "Ford".into(),
                price_usd: 500_000.0,
                zero_to_sixty_s: 3.0,
                horsepower: 660.0,
                extra: BTreeMap::new(),
            },
        ];
        let ds = Dataset::from_listings(listings, IngestStats::default());
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.makes, vec!["Ford".to_string(), "Tesla".to_string()]);
    }
}
