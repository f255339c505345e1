use anyhow::Result;
use boundaries::{overpass_query, overpass_query_land_only};

pub fn run(alpha2: &str, admin_level: u32, land_only: bool) -> Result<()> {
    println!("{}", query_text(alpha2, admin_level, land_only));
    Ok(())
}

fn query_text(alpha2: &str, admin_level: u32, land_only: bool) -> String {
    if admin_level != 2 {
        tracing::warn!(
            alpha2,
            requested = admin_level,
            "Overpass queries always target admin_level=2"
        );
    }

    if land_only {
        overpass_query_land_only(admin_level, alpha2)
    } else {
        overpass_query(admin_level, alpha2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_text_ignores_requested_level() {
        let query = query_text("AD", 6, false);
        assert_eq!(query, overpass_query(2, "AD"));
        assert!(query.contains(r#"["admin_level"="2"]"#));
        assert!(!query.contains(r#""6""#));
    }

    #[test]
    fn test_query_text_land_only() {
        assert_eq!(query_text("DK", 2, true), overpass_query_land_only(2, "DK"));
    }
}
