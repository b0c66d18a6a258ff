use std::path::Path;

use super::GatewayError;

/// Supported dataset encodings. A closed set: file extensions map onto
/// these variants statically and anything else is rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "csv" => Some(Format::Csv),
            _ => None,
        }
    }

    /// Resolve the encoding for a path from its extension.
    pub fn from_path(path: &Path) -> Result<Format, GatewayError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
            .ok_or_else(|| GatewayError::UnsupportedFormat(path.display().to_string()))
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_known_extensions_map_to_variants() {
        assert_eq!(Format::from_extension("json"), Some(Format::Json));
        assert_eq!(Format::from_extension("CSV"), Some(Format::Csv));
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        assert_eq!(Format::from_extension("xlsx"), None);

        let err = Format::from_path(&PathBuf::from("trips.xlsx")).unwrap_err();
        assert!(matches!(err, GatewayError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_extension_is_rejected() {
        let err = Format::from_path(&PathBuf::from("trips")).unwrap_err();
        assert!(matches!(err, GatewayError::UnsupportedFormat(_)));
    }
}
