pub mod catalog;
pub mod config;
pub mod order;

use anyhow::{Context, Result};
use tracing::info;

use opd_catalog::{CatalogSnapshot, CsvCatalogSource};
use opd_config::{load_layered, SessionConfig};

/// Boot a session: merge the config layers, resolve the typed view, and
/// load the catalog snapshot. A catalog failure here is fatal — the
/// session never starts half-loaded.
pub fn boot_session(config_paths: &[String]) -> Result<(SessionConfig, CatalogSnapshot)> {
    let path_refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
    let loaded = load_layered(&path_refs)?;
    let cfg = SessionConfig::from_value(&loaded.config_json)?;

    info!(config_hash = %loaded.config_hash, "session config resolved");
    if let Some(label) = &cfg.device_label {
        info!(device_label = %label, "device label");
    }

    let source = CsvCatalogSource::new(&cfg.retailers_csv, &cfg.categories_csv, &cfg.products_csv);
    let snapshot =
        CatalogSnapshot::load(&source).context("catalog unavailable; session cannot start")?;

    info!(
        retailers = snapshot.retailers().len(),
        categories = snapshot.categories().len(),
        products = snapshot.products().len(),
        "catalog snapshot loaded"
    );

    Ok((cfg, snapshot))
}
