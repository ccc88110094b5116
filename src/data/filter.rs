use std::fmt;

use super::model::{Dataset, Listing};

// ---------------------------------------------------------------------------
// Brand filter
// ---------------------------------------------------------------------------

/// Which make a projection is scoped to. Hosts pass the selection as a plain
/// string; `"all"` is the sentinel for no filtering, anything else names a
/// make and matches exactly, case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrandFilter {
    All,
    Make(String),
}

impl BrandFilter {
    /// Interpret a selector string from the host.
    pub fn parse(raw: &str) -> Self {
        if raw == "all" {
            BrandFilter::All
        } else {
            BrandFilter::Make(raw.to_string())
        }
    }

    /// Whether a listing passes this filter.
    pub fn matches(&self, listing: &Listing) -> bool {
        match self {
            BrandFilter::All => true,
            BrandFilter::Make(make) => listing.make == *make,
        }
    }
}

impl fmt::Display for BrandFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrandFilter::All => write!(f, "all"),
            BrandFilter::Make(make) => write!(f, "{make}"),
        }
    }
}

/// Return indices of listings that pass the filter, in dataset order.
pub fn filtered_indices(dataset: &Dataset, filter: &BrandFilter) -> Vec<usize> {
    dataset
        .listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| filter.matches(listing))
        .map(|(i, _)| i)
        .collect()
}
