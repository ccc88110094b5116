use anyhow::Result;

use crate::chart::kind::ChartKind;
use crate::chart::projection::Projection;

// ---------------------------------------------------------------------------
// Core → renderer boundary
// ---------------------------------------------------------------------------

/// The seam between the core and whatever draws charts. The core hands over
/// a finished projection and never reaches into presentation state; axes,
/// legends, colors, and display wiring are entirely the adapter's business.
pub trait RenderAdapter {
    /// Draw or update the chart for `kind` from `projection`.
    fn render(&mut self, kind: ChartKind, projection: &Projection) -> Result<()>;
}
