use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use tracing::{info, warn};

use opd_catalog::CatalogSnapshot;
use opd_order::{coerce_quantity, recompute, OrderDraft};
use opd_schemas::Geolocation;
use opd_submit::{build_submission, deliver, JsonlSink};

use super::boot_session;

pub fn run_quote(
    config_paths: &[String],
    retailer: &str,
    category: &str,
    quantities: &[String],
) -> Result<()> {
    let (_cfg, snapshot) = boot_session(config_paths)?;
    let draft = build_draft(&snapshot, retailer, category, quantities)?;

    let totals = recompute(&draft);
    for (line, amount) in draft.lines().iter().zip(&totals.line_amounts) {
        println!("{}\tx{}\t{}", line.product_name, line.quantity, amount);
    }
    println!("Total: {}", totals.category_total);
    Ok(())
}

pub fn run_submit(
    config_paths: &[String],
    retailer: &str,
    category: &str,
    quantities: &[String],
    lat: Option<&str>,
    lon: Option<&str>,
) -> Result<()> {
    let (cfg, snapshot) = boot_session(config_paths)?;
    let draft = build_draft(&snapshot, retailer, category, quantities)?;

    // Captured once per submission attempt; clap enforces lat and lon
    // arrive together.
    let geolocation = match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Geolocation::new(lat, lon)),
        _ => None,
    };

    let now = Utc::now();
    let records = build_submission(&snapshot, &draft, geolocation.as_ref(), now)?;

    let mut sink = JsonlSink::new(&cfg.sink_path)?;
    match deliver(&mut sink, &records) {
        Ok(receipt) => {
            info!(
                appended = receipt.appended,
                sink = %cfg.sink_path.display(),
                "submission delivered"
            );
            println!(
                "submitted {} records for {category} at {retailer}",
                receipt.appended
            );
            Ok(())
        }
        Err(e) => {
            warn!(
                appended = e.appended,
                batch_size = e.batch_size,
                "submission delivery failed part-way"
            );
            Err(anyhow!(e))
        }
    }
}

/// Assemble a draft from the CLI selections.
///
/// `--qty` values name a product within the selected category; the
/// quantity text goes through the same coercion as any other quantity
/// input. Naming a product outside the category (or a name shared by two
/// products inside it) is a usage error.
fn build_draft(
    snapshot: &CatalogSnapshot,
    retailer: &str,
    category: &str,
    quantities: &[String],
) -> Result<OrderDraft> {
    let mut draft = OrderDraft::new();
    draft.select_retailer(retailer);
    draft.select_category(snapshot, category);

    for pair in quantities {
        let Some((name, raw_qty)) = pair.split_once('=') else {
            bail!("--qty expects PRODUCT=N, got '{pair}'");
        };
        let name = name.trim();

        let matches: Vec<_> = draft
            .lines()
            .iter()
            .filter(|l| l.product_name == name)
            .map(|l| l.product_id)
            .collect();
        let product_id = match matches.as_slice() {
            [] => bail!("product '{name}' is not in category '{category}'"),
            [id] => *id,
            _ => bail!(
                "product name '{name}' is ambiguous in category '{category}'; \
                 {} products share it",
                matches.len()
            ),
        };

        draft.set_quantity(product_id, coerce_quantity(Some(raw_qty)));
    }

    Ok(draft)
}
