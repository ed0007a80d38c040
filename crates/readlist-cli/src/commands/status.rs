//! Status command handler

use anyhow::Result;

use readlist_core::Store;

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let stats = store.storage_stats()?;
    let config = store.config();
    let counts = store.counts();

    match output.format {
        OutputFormat::Json => {
            let counts: serde_json::Map<String, serde_json::Value> = counts
                .iter()
                .map(|(status, n)| (status.as_str().to_string(), serde_json::json!(n)))
                .collect();
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "catalog_url": config.catalog_url,
                    "storage": {
                        "path": stats.path,
                        "exists": stats.exists,
                        "size": stats.size
                    },
                    "counts": counts,
                    "total": store.len()
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.len());
        }
        OutputFormat::Human => {
            println!("readlist Status");
            println!("===============");
            println!();
            println!("Storage:");
            println!("  Location: {}", stats.path.display());
            println!("  Size:     {}", stats.size_human());
            println!();
            println!("Catalog:");
            println!("  URL: {}", config.catalog_url);
            println!();
            println!("Contents:");
            for (status, n) in &counts {
                println!("  {:<18} {}", format!("{}:", status.label()), n);
            }
            println!("  {:<18} {}", "Total:", store.len());
        }
    }

    Ok(())
}
