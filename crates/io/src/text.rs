use std::io::Read;
use std::path::Path;

/// Read a text file and convert to UTF-8 if needed. Override CSVs exported
/// from Excel on Windows commonly arrive as Windows-1252.
pub fn read_file_as_utf8(path: &Path) -> Result<String, String> {
    let mut file = std::fs::File::open(path).map_err(|e| e.to_string())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| e.to_string())?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn utf8_passthrough() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("override.csv");
        fs::write(&path, "block,distance,item_id,fixed_price\nBlocco è,D,1,10\n").unwrap();
        let text = read_file_as_utf8(&path).unwrap();
        assert!(text.contains("Blocco è"));
    }

    #[test]
    fn windows_1252_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("override.csv");
        // "è" in Windows-1252 is the single byte 0xE8, invalid as UTF-8
        fs::write(&path, b"block\nBlocco \xE8\n").unwrap();
        let text = read_file_as_utf8(&path).unwrap();
        assert!(text.contains("Blocco è"));
    }
}
