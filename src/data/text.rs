// ============================================================
// Layer 4 — Text File Decoding
// ============================================================
// Both the GloVe file and the dataset JSON are decoded with the
// same `TextEncoding` so that tokens produced from review text
// and tokens read from the embedding file agree byte for byte.
//
// Latin-1 (ISO-8859-1) maps every byte 0x00..=0xFF to the code
// point with the same value, so it never fails. UTF-8 decoding
// fails on invalid sequences.

use std::{fmt, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::data::error::DataError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    #[default]
    Latin1,
    Utf8,
}

impl TextEncoding {
    /// Decode raw bytes read from `path` (the path is only used in errors)
    pub fn decode(self, bytes: Vec<u8>, path: &Path) -> Result<String, DataError> {
        match self {
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Utf8 => String::from_utf8(bytes).map_err(|e| DataError::Encoding {
                path:   path.to_path_buf(),
                offset: e.utf8_error().valid_up_to(),
            }),
        }
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latin1" | "latin-1" | "iso-8859-1" => Ok(TextEncoding::Latin1),
            "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
            other => Err(format!("unknown encoding '{other}' (expected latin1 or utf8)")),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Latin1 => f.write_str("latin1"),
            TextEncoding::Utf8 => f.write_str("utf8"),
        }
    }
}

/// Read a whole file and decode it.
pub fn read_text(path: &Path, encoding: TextEncoding) -> Result<String, DataError> {
    let bytes = fs::read(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    encoding.decode(bytes, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_maps_bytes_to_code_points() {
        let s = TextEncoding::Latin1
            .decode(vec![b'c', 0xE9, b'!'], Path::new("x"))
            .unwrap();
        assert_eq!(s, "c\u{e9}!");
    }

    #[test]
    fn test_utf8_rejects_invalid_bytes() {
        let err = TextEncoding::Utf8
            .decode(vec![b'a', 0xFF], Path::new("bad.txt"))
            .unwrap_err();
        assert!(matches!(err, DataError::Encoding { offset: 1, .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_text(Path::new("/definitely/not/here.txt"), TextEncoding::Utf8)
            .unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn test_parse_encoding_names() {
        assert_eq!("UTF-8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert_eq!("latin1".parse::<TextEncoding>().unwrap(), TextEncoding::Latin1);
        assert!("ascii".parse::<TextEncoding>().is_err());
    }
}
