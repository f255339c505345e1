use anyhow::Result;
use boundaries::{BoundaryDescriptor, FileFormat, Links};

pub fn run(
    links: &Links,
    iso_code: String,
    admin_level: u32,
    relation_id: String,
    slug: String,
    polygon_tag: String,
    json: bool,
) -> Result<()> {
    let boundary = BoundaryDescriptor::new(iso_code, admin_level, relation_id, slug, polygon_tag);
    let enhanced = links.enhance(&boundary);

    if json {
        println!("{}", serde_json::to_string_pretty(&enhanced)?);
        return Ok(());
    }

    println!("Polygon: {}", enhanced.polygon_type);
    println!();
    for format in FileFormat::ALL {
        println!(
            "{:<12} {}",
            format.label(),
            enhanced.link(format).unwrap_or("unavailable")
        );
    }
    println!("{:<12} {}", "OSM", enhanced.osm_relation_link_id);

    Ok(())
}
