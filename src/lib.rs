//! Quote-aware CSV ingestion and chart projection for sports-car listings.
//!
//! The pipeline takes one delimited text blob and produces a canonical
//! [`Dataset`]: lines are split and tokenized (commas inside quoted spans
//! stay in the field), rows are zipped with the header and validated,
//! duplicate models are suppressed first-one-wins, and the survivors are
//! parsed into typed [`Listing`]s. From there, [`project`] derives the
//! (labels, values, title) series one chart at a time, scoped by brand.
//! Drawing is someone else's job; see [`RenderAdapter`].

pub mod chart;
pub mod data;
pub mod render;
pub mod session;

pub use chart::kind::{ChartKind, UnknownChartKind};
pub use chart::projection::{
    acceleration_projection, horsepower_projection, price_projection, project, Projection,
};
pub use data::filter::BrandFilter;
pub use data::loader::{load_file, parse_text, LoadError, NumericPolicy};
pub use data::model::{Dataset, IngestStats, Listing, NumericParseError};
pub use render::RenderAdapter;
pub use session::Session;
