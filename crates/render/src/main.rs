//! Render the product-page attribute block for a product snapshot.
//!
//! Reads a JSON snapshot (`{"name", "sku", "attributes": {..}}`) from a file or
//! stdin and prints either the page data or the JSON-LD document.

mod config;

use std::io::Read;

use anyhow::Context;

use shopattr_catalog::{ProductAttributes, ProductSnapshot};

use config::{OutputMode, RenderConfig, SnapshotSource};

fn load_snapshot(source: &SnapshotSource) -> anyhow::Result<ProductSnapshot> {
    let raw = match source {
        SnapshotSource::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read snapshot from stdin")?;
            buf
        }
        SnapshotSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?,
    };

    serde_json::from_str(&raw).context("snapshot is not a valid product JSON document")
}

fn main() -> anyhow::Result<()> {
    shopattr_observability::init();

    let config = RenderConfig::from_env();
    let product = load_snapshot(&config.source)?;
    tracing::info!(sku = %product.sku, attributes = product.attributes.len(), "rendering product attributes");

    let view = ProductAttributes::new(&product);
    match config.output {
        OutputMode::Page => {
            let page = serde_json::to_string_pretty(&view.page_data()).context("failed to encode page data")?;
            println!("{page}");
        }
        OutputMode::JsonLd => {
            let document = view.structured_data();
            if document.is_empty() {
                tracing::info!(sku = %product.sku, "no Google Shopping attributes; nothing to emit");
            } else {
                println!("{document}");
            }
        }
    }

    Ok(())
}
