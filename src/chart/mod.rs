/// Chart layer: turns the canonical dataset plus the host's selectors into
/// ready-to-draw numeric series.
///
/// ```text
///   Dataset ── BrandFilter ── ChartKind
///                   │
///                   ▼
///            ┌────────────┐
///            │ projection  │  labels + values + title
///            └────────────┘
///                   │
///                   ▼
///             RenderAdapter (host-owned)
/// ```
///
/// Everything here is pure: the same dataset and selectors always produce
/// the same projection, so hosts may cache by (brand, kind) if they like.

pub mod kind;
pub mod projection;
