use anyhow::Result;
use serde_json::json;

use super::boot_session;

pub fn run_check(config_paths: &[String]) -> Result<()> {
    let (_cfg, snapshot) = boot_session(config_paths)?;

    let summary = json!({
        "retailers": snapshot.retailers().len(),
        "categories": snapshot.categories().len(),
        "products": snapshot.products().len(),
    });
    println!("{summary}");
    Ok(())
}

pub fn run_products(config_paths: &[String], category: &str) -> Result<()> {
    let (_cfg, snapshot) = boot_session(config_paths)?;

    let products = snapshot.products_in_category(category);
    if products.is_empty() {
        println!("no products in category '{category}'");
        return Ok(());
    }

    for p in products {
        println!("{}\t{}", p.name, p.unit_price);
    }
    Ok(())
}
