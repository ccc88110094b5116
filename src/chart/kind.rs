use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::data::filter::BrandFilter;
use crate::data::model::{columns, Listing};

// ---------------------------------------------------------------------------
// ChartKind – which metric the host wants drawn
// ---------------------------------------------------------------------------

/// The charts a host can ask for, each backed by one metric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Price,
    Acceleration,
    Horsepower,
}

impl ChartKind {
    /// Every chart kind, in presentation order.
    pub const ALL: [ChartKind; 3] = [
        ChartKind::Price,
        ChartKind::Acceleration,
        ChartKind::Horsepower,
    ];

    /// The source column this chart draws its values from.
    pub fn metric_column(self) -> &'static str {
        match self {
            ChartKind::Price => columns::PRICE,
            ChartKind::Acceleration => columns::ACCELERATION,
            ChartKind::Horsepower => columns::HORSEPOWER,
        }
    }

    /// Human-readable metric name used in chart titles.
    pub fn metric_label(self) -> &'static str {
        match self {
            ChartKind::Price => "Price (USD)",
            ChartKind::Acceleration => "0-60 MPH Time (seconds)",
            ChartKind::Horsepower => "Horsepower",
        }
    }

    /// Pull this chart's metric out of a typed listing.
    pub fn value(self, listing: &Listing) -> f64 {
        match self {
            ChartKind::Price => listing.price_usd,
            ChartKind::Acceleration => listing.zero_to_sixty_s,
            ChartKind::Horsepower => listing.horsepower,
        }
    }

    /// Display title for the chart under the given brand scope, e.g.
    /// `Price (USD) - Tesla` or `Horsepower - all`.
    pub fn title(self, brand: &BrandFilter) -> String {
        format!("{} - {brand}", self.metric_label())
    }
}

/// A chart selector string the host sent that names no known chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chart kind '{0}', expected price, acceleration, or horsepower")]
pub struct UnknownChartKind(pub String);

impl FromStr for ChartKind {
    type Err = UnknownChartKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price" => Ok(ChartKind::Price),
            "acceleration" => Ok(ChartKind::Acceleration),
            "horsepower" => Ok(ChartKind::Horsepower),
            other => Err(UnknownChartKind(other.to_string())),
        }
    }
}
