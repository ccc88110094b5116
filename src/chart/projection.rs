use serde::Serialize;

use super::kind::ChartKind;
use crate::data::filter::{filtered_indices, BrandFilter};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Projection – one chart's worth of data
// ---------------------------------------------------------------------------

/// Parallel label/value sequences plus a display title: everything a chart
/// widget needs for one draw. Ephemeral: recomputed per request, never
/// stored in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub title: String,
}

/// Derive the numeric series for one chart. Listings failing the brand
/// filter are skipped; survivors contribute their model name as the label
/// and the chart's metric as the value, in dataset order. Pure: never
/// mutates the dataset, and identical arguments yield identical projections.
pub fn project(dataset: &Dataset, brand: &BrandFilter, kind: ChartKind) -> Projection {
    let indices = filtered_indices(dataset, brand);
    let labels = indices
        .iter()
        .map(|&i| dataset.listings[i].model.clone())
        .collect();
    let values = indices
        .iter()
        .map(|&i| kind.value(&dataset.listings[i]))
        .collect();

    Projection {
        labels,
        values,
        title: kind.title(brand),
    }
}

/// Price chart series for the given brand scope.
pub fn price_projection(dataset: &Dataset, brand: &BrandFilter) -> Projection {
    project(dataset, brand, ChartKind::Price)
}

/// 0-60 time chart series for the given brand scope.
pub fn acceleration_projection(dataset: &Dataset, brand: &BrandFilter) -> Projection {
    project(dataset, brand, ChartKind::Acceleration)
}

/// Horsepower chart series for the given brand scope.
pub fn horsepower_projection(dataset: &Dataset, brand: &BrandFilter) -> Projection {
    project(dataset, brand, ChartKind::Horsepower)
}
