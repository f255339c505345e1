use anyhow::{Context, Result};
use boundaries::{write_catalog, CatalogScanner, PolygonType};
use std::fs;
use std::path::PathBuf;

pub fn run(scan_folder: PathBuf, output: PathBuf, with_availability: bool) -> Result<()> {
    let catalog = CatalogScanner::new()
        .with_availability(with_availability)
        .scan(&scan_folder)
        .with_context(|| format!("Failed to scan {}", scan_folder.display()))?;

    write_catalog(&output, &catalog).context("Failed to write catalog")?;

    let land_count = catalog
        .iter()
        .filter(|b| b.polygon_type() == PolygonType::Land)
        .count();
    let file_size = fs::metadata(&output).map(|m| m.len()).unwrap_or(0);

    println!("Generated catalog with {} entries", catalog.len());
    println!("  Land: {}", land_count);
    println!("  Maritime: {}", catalog.len() - land_count);
    println!("Saved to {} ({})", output.display(), format_size(file_size));

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
