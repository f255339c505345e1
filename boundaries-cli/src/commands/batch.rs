use anyhow::{bail, Context, Result};
use boundaries::{BoundaryDescriptor, FileFormat, Links};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Columns every CSV input must provide.
const REQUIRED_COLUMNS: [&str; 5] = ["iso_code", "admin_level", "relation_id", "slug", "type"];

/// Columns appended to CSV output, in order.
const OUTPUT_COLUMNS: [&str; 6] = [
    "polygon_type",
    "geojson_dl_link",
    "shp_dl_link",
    "geopackage_dl_link",
    "mapinfo_dl_link",
    "osm_relation_link_id",
];

pub fn run(links: &Links, input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    // Detect file format
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => process_csv(links, &input, output),
        "json" => process_json(links, &input, output),
        _ => bail!("Unsupported file format: {}. Use .csv or .json", extension),
    }
}

fn default_output(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "boundaries".to_string());
    input.with_file_name(format!("{}_links.{}", stem, extension))
}

fn progress_bar(total: u64) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
            )?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn process_csv(links: &Links, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let file = File::open(input).context("Failed to open input file")?;
    let output_path = output.unwrap_or_else(|| default_output(input, "csv"));
    let output_file = File::create(&output_path).context("Failed to create output file")?;

    let count = enhance_csv(links, BufReader::new(file), BufWriter::new(output_file), true)?;

    println!("Enhanced {} boundaries", count);
    println!("Output written to: {}", output_path.display());
    Ok(())
}

/// Append derived link columns to every CSV row. Returns the number of rows.
fn enhance_csv<R: Read, W: Write>(
    links: &Links,
    reader: R,
    writer: W,
    show_progress: bool,
) -> Result<usize> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();

    // Find column indices
    let mut indices = [0usize; 5];
    for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == column)
            .with_context(|| format!("Column '{}' not found in CSV", column))?;
    }
    let [iso_idx, level_idx, relation_idx, slug_idx, type_idx] = indices;

    let flag_indices: Vec<(FileFormat, usize)> = FileFormat::ALL
        .into_iter()
        .filter_map(|format| {
            let column = availability_column(format);
            headers
                .iter()
                .position(|h| h == column)
                .map(|idx| (format, idx))
        })
        .collect();

    // Collect records for progress bar
    let records: Vec<_> = reader.records().collect::<Result<_, _>>()?;
    let pb = if show_progress {
        progress_bar(records.len() as u64)?
    } else {
        ProgressBar::hidden()
    };

    let mut writer = csv::Writer::from_writer(writer);
    let mut new_headers: Vec<&str> = headers.iter().collect();
    new_headers.extend(OUTPUT_COLUMNS);
    writer.write_record(&new_headers)?;

    for (line, record) in records.iter().enumerate() {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let level_cell = field(level_idx);
        let admin_level: u32 = level_cell.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(
                row = line + 1,
                admin_level = %level_cell,
                "Unusable admin_level, deriving links with level 0"
            );
            0
        });

        let mut boundary = BoundaryDescriptor::new(
            field(iso_idx),
            admin_level,
            field(relation_idx),
            field(slug_idx),
            field(type_idx),
        );
        for &(format, idx) in &flag_indices {
            if let Some(flag) = parse_flag(field(idx)) {
                boundary = boundary.with_availability(format, flag);
            }
        }

        let enhanced = links.enhance(&boundary);
        let mut new_record: Vec<&str> = record.iter().collect();
        new_record.push(enhanced.polygon_type.as_str());
        for format in FileFormat::ALL {
            new_record.push(enhanced.link(format).unwrap_or(""));
        }
        new_record.push(&enhanced.osm_relation_link_id);
        writer.write_record(&new_record)?;

        pb.inc(1);
    }

    pb.finish_with_message("done");
    writer.flush()?;

    Ok(records.len())
}

fn availability_column(format: FileFormat) -> &'static str {
    match format {
        FileFormat::GeoJson => "has_geojson",
        FileFormat::Shapefile => "has_shp",
        FileFormat::GeoPackage => "has_gpkg",
        FileFormat::MapInfo => "has_mapinfo",
    }
}

/// Empty cells leave the flag unset.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn process_json(links: &Links, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let catalog = boundaries::load_catalog(input).context("Failed to read catalog")?;

    let pb = progress_bar(catalog.len() as u64)?;
    let mut enhanced = Vec::with_capacity(catalog.len());
    for boundary in &catalog {
        enhanced.push(links.enhance(boundary));
        pb.inc(1);
    }
    pb.finish_with_message("done");

    // Write output
    let output_path = output.unwrap_or_else(|| default_output(input, "json"));
    let output_file = File::create(&output_path).context("Failed to create output file")?;
    let mut writer = BufWriter::new(output_file);
    serde_json::to_writer_pretty(&mut writer, &enhanced)?;
    writer.flush()?;

    println!("Enhanced {} boundaries", enhanced.len());
    println!("Output written to: {}", output_path.display());
    Ok(())
}
