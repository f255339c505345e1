use anyhow::Result;
use boundaries::{LinkConfig, Links, DEFAULT_FILES_BASE_URL, DEFAULT_OSM_BASE_URL};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Boundary download links and Overpass queries
#[derive(Parser)]
#[command(name = "boundaries")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host serving the zipped boundary files
    #[arg(
        long,
        env = "BOUNDARIES_FILES_BASE_URL",
        default_value = DEFAULT_FILES_BASE_URL,
        global = true
    )]
    files_base_url: String,

    /// OpenStreetMap host used for relation links
    #[arg(
        long,
        env = "BOUNDARIES_OSM_BASE_URL",
        default_value = DEFAULT_OSM_BASE_URL,
        global = true
    )]
    osm_base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every derived link for a single boundary
    Links {
        /// ISO 3166-1 alpha-2 country code
        #[arg(long)]
        iso_code: String,

        /// OSM administrative level
        #[arg(long, default_value = "2")]
        admin_level: u32,

        /// OSM relation id
        #[arg(long)]
        relation_id: String,

        /// URL-safe name token
        #[arg(long)]
        slug: String,

        /// Polygon tag: "l" for land, anything else for maritime
        #[arg(long = "type", default_value = "m")]
        polygon_tag: String,

        /// Output result as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Add links to every boundary in a file
    Batch {
        /// Input file (CSV or catalog JSON)
        input: PathBuf,

        /// Output file (same format as input if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print an Overpass-QL query for a country boundary
    Overpass {
        /// ISO 3166-1 alpha-2 country code
        #[arg(long)]
        alpha2: String,

        /// Administrative level (the query always targets level 2)
        #[arg(long, default_value = "2")]
        admin_level: u32,

        /// Only the land part: non-maritime ways plus the coastline
        #[arg(short, long)]
        land_only: bool,
    },

    /// Generate the boundary catalog from an export folder
    Catalog {
        /// Folder to scan
        #[arg(default_value = "misc")]
        scan_folder: PathBuf,

        /// Output catalog file
        #[arg(short, long, default_value = "boundary_catalog.json")]
        output: PathBuf,

        /// Record per-format availability flags on each entry
        #[arg(long)]
        with_availability: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let links = Links::new(LinkConfig::new(cli.files_base_url, cli.osm_base_url));

    match cli.command {
        Commands::Links {
            iso_code,
            admin_level,
            relation_id,
            slug,
            polygon_tag,
            json,
        } => commands::links::run(
            &links,
            iso_code,
            admin_level,
            relation_id,
            slug,
            polygon_tag,
            json,
        ),
        Commands::Batch { input, output } => commands::batch::run(&links, input, output),
        Commands::Overpass {
            alpha2,
            admin_level,
            land_only,
        } => commands::overpass::run(&alpha2, admin_level, land_only),
        Commands::Catalog {
            scan_folder,
            output,
            with_availability,
        } => commands::catalog::run(scan_folder, output, with_availability),
    }
}
