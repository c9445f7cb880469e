// Partner price-list store
//
// One XLSX file per region, named by the region string, under a partner
// directory. Overwrite-by-name, last-write-wins. Mutation is operator
// serialized; concurrent writers to the same region are not supported.

use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PartnerStore {
    dir: PathBuf,
}

impl PartnerStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store under the platform data directory (`<data>/listino/partners`).
    pub fn default_location() -> Self {
        Self::new(data_root().join("partners"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create or overwrite a region's price list.
    pub fn save(&self, region: &str, bytes: &[u8]) -> Result<PathBuf, String> {
        let path = self.region_path(region)?;
        fs::create_dir_all(&self.dir).map_err(|e| e.to_string())?;
        fs::write(&path, bytes).map_err(|e| e.to_string())?;
        Ok(path)
    }

    pub fn load(&self, region: &str) -> Result<Vec<u8>, String> {
        let path = self.region_path(region)?;
        fs::read(&path).map_err(|e| format!("cannot read partner list '{region}': {e}"))
    }

    pub fn delete(&self, region: &str) -> Result<(), String> {
        let path = self.region_path(region)?;
        fs::remove_file(&path).map_err(|e| format!("cannot delete partner list '{region}': {e}"))
    }

    /// Region names with a stored price list, sorted.
    pub fn list(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut regions: Vec<String> = entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("xlsx") {
                    return None;
                }
                path.file_stem().and_then(|s| s.to_str()).map(String::from)
            })
            .collect();
        regions.sort();
        regions
    }

    fn region_path(&self, region: &str) -> Result<PathBuf, String> {
        let region = region.trim();
        if region.is_empty() {
            return Err("region name must not be empty".into());
        }
        // The region is a file name; path separators would escape the store.
        if region.contains(['/', '\\']) || region == "." || region == ".." {
            return Err(format!("invalid region name '{region}'"));
        }
        Ok(self.dir.join(format!("{region}.xlsx")))
    }
}

/// Well-known fallback client price list, used when no file is supplied.
pub fn default_client_path() -> PathBuf {
    data_root().join("defaults").join("client.xlsx")
}

fn data_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("listino")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = PartnerStore::new(dir.path().to_path_buf());
        store.save("Lombardia", b"fake xlsx bytes").unwrap();
        assert_eq!(store.load("Lombardia").unwrap(), b"fake xlsx bytes");
    }

    #[test]
    fn save_overwrites_by_name() {
        let dir = tempdir().unwrap();
        let store = PartnerStore::new(dir.path().to_path_buf());
        store.save("Lazio", b"v1").unwrap();
        store.save("Lazio", b"v2").unwrap();
        assert_eq!(store.load("Lazio").unwrap(), b"v2");
        assert_eq!(store.list(), vec!["Lazio"]);
    }

    #[test]
    fn list_is_sorted() {
        let dir = tempdir().unwrap();
        let store = PartnerStore::new(dir.path().to_path_buf());
        store.save("Veneto", b"x").unwrap();
        store.save("Lazio", b"x").unwrap();
        store.save("Piemonte", b"x").unwrap();
        assert_eq!(store.list(), vec!["Lazio", "Piemonte", "Veneto"]);
    }

    #[test]
    fn delete_removes_region() {
        let dir = tempdir().unwrap();
        let store = PartnerStore::new(dir.path().to_path_buf());
        store.save("Lazio", b"x").unwrap();
        store.delete("Lazio").unwrap();
        assert!(store.list().is_empty());
        assert!(store.load("Lazio").is_err());
        assert!(store.delete("Lazio").is_err());
    }

    #[test]
    fn region_names_trimmed() {
        let dir = tempdir().unwrap();
        let store = PartnerStore::new(dir.path().to_path_buf());
        store.save(" Lazio ", b"x").unwrap();
        assert_eq!(store.list(), vec!["Lazio"]);
        assert!(store.load("Lazio").is_ok());
    }

    #[test]
    fn hostile_region_names_rejected() {
        let dir = tempdir().unwrap();
        let store = PartnerStore::new(dir.path().to_path_buf());
        assert!(store.save("", b"x").is_err());
        assert!(store.save("../escape", b"x").is_err());
        assert!(store.save("a/b", b"x").is_err());
        assert!(store.save("..", b"x").is_err());
    }

    #[test]
    fn listing_missing_dir_is_empty() {
        let store = PartnerStore::new(PathBuf::from("/nonexistent/listino-test"));
        assert!(store.list().is_empty());
    }
}
