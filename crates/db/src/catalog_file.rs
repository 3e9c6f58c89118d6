use std::collections::HashSet;
use std::fs;
use std::path::Path;

use scentwise_core::domain::product::ScentProduct;

use crate::repositories::RepositoryError;

/// Reads a catalog export: a JSON array of products.
///
/// Enum values are checked while decoding; profile rules are left to the service, which skips
/// malformed entries at query time.
pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<Vec<ScentProduct>, RepositoryError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let products: Vec<ScentProduct> = serde_json::from_str(&raw)
        .map_err(|error| RepositoryError::Decode(format!("{}: {error}", path.display())))?;

    let mut seen = HashSet::new();
    if let Some(duplicate) = products.iter().find(|product| !seen.insert(product.id.as_str())) {
        return Err(RepositoryError::Decode(format!(
            "{}: duplicate product id `{}`",
            path.display(),
            duplicate.id
        )));
    }

    Ok(products)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::load_catalog_file;
    use crate::repositories::RepositoryError;

    const CATALOG: &str = r#"[
  {
    "id": "lavender-fields",
    "sku": "CND-LAV-001",
    "name": "Lavender Fields",
    "profile": {
      "primary_notes": [{ "name": "Lavender", "intensity": 8 }],
      "intensity": "LIGHT",
      "mood": ["RELAXING"],
      "season": ["SPRING", "SUMMER"]
    }
  },
  {
    "id": "spiced-hearth",
    "sku": "CND-SPC-001",
    "name": "Spiced Hearth",
    "active": false,
    "profile": {
      "primary_notes": [{ "name": "Cinnamon", "intensity": 8 }],
      "base_notes": [{ "name": "Vanilla", "intensity": 4 }],
      "intensity": "STRONG",
      "mood": ["COZY"],
      "season": ["FALL", "WINTER"]
    }
  }
]"#;

    #[test]
    fn loads_products_with_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("catalog.json");
        fs::write(&path, CATALOG).expect("write catalog");

        let products = load_catalog_file(&path).expect("load catalog");

        assert_eq!(products.len(), 2);
        assert!(products[0].active, "active should default to true");
        assert!(!products[1].active);
        assert!(products[0].profile.middle_notes.is_empty());
        assert_eq!(products[1].profile.all_notes().len(), 2);
    }

    #[test]
    fn unknown_mood_is_a_decode_error() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("catalog.json");
        fs::write(&path, CATALOG.replace("\"COZY\"", "\"MELANCHOLY\"")).expect("write catalog");

        let error = load_catalog_file(&path).expect_err("unknown mood must fail");
        assert!(matches!(error, RepositoryError::Decode(_)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("catalog.json");
        fs::write(&path, CATALOG.replace("spiced-hearth", "lavender-fields")).expect("write");

        let error = load_catalog_file(&path).expect_err("duplicate id must fail");
        assert!(error.to_string().contains("duplicate product id `lavender-fields`"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().expect("tempdir");
        let error =
            load_catalog_file(dir.path().join("absent.json")).expect_err("missing file must fail");
        assert!(matches!(error, RepositoryError::Io(_)));
    }
}
