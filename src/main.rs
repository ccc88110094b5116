use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use carload::{load_file, project, ChartKind, NumericPolicy, Projection, RenderAdapter, Session};

// ---------------------------------------------------------------------------
// Demo host: the acquisition + render collaborators rolled into one binary
// ---------------------------------------------------------------------------

/// Stand-in for a chart widget: writes each projection as one JSON object
/// per line, ready for whatever charting layer sits on the other side.
struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> RenderAdapter for JsonRenderer<W> {
    fn render(&mut self, kind: ChartKind, projection: &Projection) -> Result<()> {
        let line = serde_json::json!({ "kind": kind, "chart": projection });
        writeln!(self.out, "{line}").context("writing chart JSON")
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("usage: carload <listings.csv> [brand|all] [price|acceleration|horsepower]")?;
    let brand = args.next().unwrap_or_else(|| "all".to_string());
    let chart: Option<ChartKind> = args.next().map(|s| s.parse()).transpose()?;

    // The host owns the numeric policy: keep what parses, report the rest.
    let dataset = load_file(Path::new(&path), NumericPolicy::SkipListing)?;

    let stats = dataset.stats;
    info!(
        "loaded {} listing(s) across {} make(s) from {path}",
        dataset.len(),
        dataset.makes.len()
    );
    if stats.malformed_rows + stats.incomplete_rows + stats.skipped_numeric_rows > 0 {
        info!(
            "dropped {} malformed, {} incomplete, {} non-numeric row(s)",
            stats.malformed_rows, stats.incomplete_rows, stats.skipped_numeric_rows
        );
    }

    let mut session = Session::default();
    session.set_dataset(dataset);
    session.select_brand(&brand);
    let dataset = session.dataset().context("dataset was just loaded")?;

    let mut renderer = JsonRenderer {
        out: io::stdout().lock(),
    };
    let kinds = match chart {
        Some(kind) => vec![kind],
        None => ChartKind::ALL.to_vec(),
    };
    for kind in kinds {
        let projection = project(&dataset, &session.brand, kind);
        renderer.render(kind, &projection)?;
    }

    Ok(())
}
