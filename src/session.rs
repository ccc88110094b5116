use std::sync::Arc;

use crate::chart::kind::ChartKind;
use crate::chart::projection::{project, Projection};
use crate::data::filter::BrandFilter;
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Host-facing session state: the current dataset slot plus the two chart
/// selectors. The dataset lives behind an `Arc` and is only ever replaced
/// wholesale, so a reader holding the previous `Arc` keeps a consistent
/// view across a re-load. Projections are recomputed on demand from
/// whatever is current; the host's event layer decides when.
pub struct Session {
    dataset: Option<Arc<Dataset>>,
    pub brand: BrandFilter,
    pub chart: ChartKind,
    /// Status / error message for the host to surface.
    pub status_message: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            dataset: None,
            brand: BrandFilter::All,
            chart: ChartKind::Price,
            status_message: None,
        }
    }
}

impl Session {
    /// Install a freshly loaded dataset, replacing any previous one
    /// wholesale. A brand selection that no longer exists in the new data
    /// falls back to `All`.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        if let BrandFilter::Make(make) = &self.brand {
            if !dataset.makes.contains(make) {
                self.brand = BrandFilter::All;
            }
        }
        self.dataset = Some(Arc::new(dataset));
        self.status_message = None;
    }

    /// The current dataset, if one is loaded. Cloning the `Arc` is cheap;
    /// the clone stays valid even if the session re-loads afterwards.
    pub fn dataset(&self) -> Option<Arc<Dataset>> {
        self.dataset.clone()
    }

    /// Distinct makes available to a brand selector, empty before any load.
    pub fn makes(&self) -> &[String] {
        self.dataset
            .as_deref()
            .map(|ds| ds.makes.as_slice())
            .unwrap_or(&[])
    }

    /// Interpret a brand selector string from the host.
    pub fn select_brand(&mut self, raw: &str) {
        self.brand = BrandFilter::parse(raw);
    }

    /// Switch the active chart.
    pub fn select_chart(&mut self, chart: ChartKind) {
        self.chart = chart;
    }

    /// The projection for the current selectors, or `None` before any load.
    pub fn projection(&self) -> Option<Projection> {
        self.dataset
            .as_deref()
            .map(|ds| project(ds, &self.brand, self.chart))
    }
}
