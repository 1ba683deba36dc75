//! Command-line entry point: open the configured workspace and print a
//! summary, or export the current owner's catalog.
//!
//! Usage: `stockroom <owner> [csv|xlsx] [filename]`

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::Utc;

use stockroom_app::{Catalog, StockroomConfig, Workspace};
use stockroom_export::{ExportFormat, report_export};
use stockroom_infra::StaticIdentity;

fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let mut args = std::env::args().skip(1);
    let Some(owner) = args.next() else {
        bail!("usage: stockroom <owner> [csv|xlsx] [filename]");
    };
    let format = match args.next().as_deref() {
        None => None,
        Some("csv") => Some(ExportFormat::Csv),
        Some("xlsx") => Some(ExportFormat::Spreadsheet),
        Some(other) => bail!("unknown export format {other:?}"),
    };
    let filename = args.next();

    let config = StockroomConfig::from_env().context("invalid configuration")?;
    let workspace = Workspace::open(config, Arc::new(StaticIdentity::signed_in(owner)))
        .context("failed to open workspace")?;
    let now = Utc::now();

    match format {
        Some(format) => {
            let records = workspace.records()?;
            let catalog = Catalog::new(workspace.config());
            let result = catalog.export(&records, format, filename, now.date_naive());
            let notifier = |message: &str| eprintln!("{message}");
            if let Some(artifact) = report_export(format, result, &notifier) {
                std::fs::write(&artifact.filename, &artifact.bytes)
                    .with_context(|| format!("failed to write {}", artifact.filename))?;
                println!("wrote {} ({})", artifact.filename, artifact.mime_type);
            }
        }
        None => {
            let dashboard = workspace.dashboard(now)?;
            let mut out = std::io::stdout().lock();
            for card in &dashboard.cards {
                writeln!(out, "{:<16}{:>6}  {}", card.title, card.count, card.change.value)?;
            }
            for item in &dashboard.feed {
                writeln!(out, "{}  ({})", item.text, item.time_ago)?;
            }
        }
    }

    Ok(())
}
