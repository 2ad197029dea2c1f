use crate::favicon::FaviconError;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const BUILTIN_METADATA: &str = include_str!("../../assets/favicon-meta.json");

const SIZE_PLACEHOLDER: &str = "{size}";

/// Largest frame dimension an ICO directory entry can describe.
pub const MAX_ICO_SIZE: u32 = 256;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaviconMetadata {
    /// The path to the source image, a raster source is overwritten with the
    /// primary size
    pub source: PathBuf,

    /// The square sizes to generate, in processing order
    pub sizes: Vec<u32>,

    /// The size written back to the source path
    pub primary_size: u32,

    /// File name of the non-primary outputs, `{size}` is substituted
    pub file_name_pattern: String,

    /// The icon container assembled from the generated files
    pub ico: IcoMetadata,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcoMetadata {
    /// File name of the icon container, next to the source
    pub file: PathBuf,

    /// The generated sizes to embed as frames
    pub sizes: Vec<u32>,
}

/// Whether `path` names an SVG document, judged by its extension.
pub fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false)
}

impl FaviconMetadata {
    /// Loads the metadata compiled into the binary.
    pub fn builtin() -> Result<Self, FaviconError> {
        Self::from_json(BUILTIN_METADATA)
    }

    /// Parses and validates metadata from a JSON document.
    pub fn from_json(data: &str) -> Result<Self, FaviconError> {
        let metadata =
            serde_json::from_str::<Self>(data).map_err(FaviconError::MetadataParse)?;
        metadata.validate()?;
        Ok(metadata)
    }

    pub fn validate(&self) -> Result<(), FaviconError> {
        if self.sizes.is_empty() {
            return Err(FaviconError::NoSizes);
        }

        let mut seen = HashSet::new();
        for &size in &self.sizes {
            if size == 0 {
                return Err(FaviconError::InvalidSize(size));
            }

            if !seen.insert(size) {
                return Err(FaviconError::DuplicatedSize(size));
            }
        }

        if !seen.contains(&self.primary_size) {
            return Err(FaviconError::PrimarySizeNotListed(self.primary_size));
        }

        if !self.file_name_pattern.contains(SIZE_PLACEHOLDER) {
            return Err(FaviconError::MissingSizePlaceholder(
                self.file_name_pattern.clone(),
            ));
        }

        if let Some(&size) = self
            .ico
            .sizes
            .iter()
            .find(|&&s| s == 0 || s > MAX_ICO_SIZE)
        {
            return Err(FaviconError::IcoSizeOutOfRange(size));
        }

        Ok(())
    }

    /// The directory every output is written into.
    pub fn output_dir(&self) -> &Path {
        self.source.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Where the favicon of the given size lives on disk.
    ///
    /// A raster source is replaced by the primary size. A vector source is
    /// kept, its primary size goes next to it with a `.png` extension.
    pub fn output_path(&self, size: u32) -> PathBuf {
        if size == self.primary_size {
            if is_svg_path(&self.source) {
                return self.source.with_extension("png");
            }

            return self.source.clone();
        }

        let file_name = self
            .file_name_pattern
            .replace(SIZE_PLACEHOLDER, &size.to_string());
        self.output_dir().join(file_name)
    }

    pub fn ico_path(&self) -> PathBuf {
        self.output_dir().join(&self.ico.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(json: &str) -> Result<FaviconMetadata, FaviconError> {
        FaviconMetadata::from_json(json)
    }

    #[test]
    fn builtin_metadata_matches_public_layout() {
        let metadata = FaviconMetadata::builtin().unwrap();

        assert_eq!(metadata.sizes, vec![16, 32, 48, 96, 144, 192, 256, 384, 512]);
        assert_eq!(metadata.primary_size, 512);
        assert_eq!(metadata.ico.sizes, vec![16, 32, 48]);
        assert_eq!(metadata.source, PathBuf::from("../public/favicon.png"));
        assert_eq!(metadata.output_path(512), PathBuf::from("../public/favicon.png"));
        assert_eq!(
            metadata.output_path(48),
            PathBuf::from("../public/favicon-48.png")
        );
        assert_eq!(metadata.ico_path(), PathBuf::from("../public/favicon.ico"));
    }

    #[test]
    fn primary_size_is_explicit_not_the_maximum() {
        let metadata = metadata(
            r#"{
                "source": "out/icon.png",
                "sizes": [16, 512, 32],
                "primarySize": 32,
                "fileNamePattern": "icon-{size}.png",
                "ico": { "file": "icon.ico", "sizes": [16] }
            }"#,
        )
        .unwrap();

        assert_eq!(metadata.output_path(32), PathBuf::from("out/icon.png"));
        assert_eq!(metadata.output_path(512), PathBuf::from("out/icon-512.png"));
    }

    #[test]
    fn vector_source_is_never_an_output() {
        let mut metadata = FaviconMetadata::builtin().unwrap();
        metadata.source = PathBuf::from("public/favicon.SVG");

        assert_eq!(metadata.output_path(512), PathBuf::from("public/favicon.png"));
        assert_eq!(metadata.output_path(16), PathBuf::from("public/favicon-16.png"));
        assert!(metadata
            .sizes
            .iter()
            .all(|&size| metadata.output_path(size) != metadata.source));
    }

    #[test]
    fn rejects_invalid_size_lists() {
        let template = |sizes: &str, primary: u32| {
            format!(
                r#"{{
                    "source": "icon.png",
                    "sizes": {sizes},
                    "primarySize": {primary},
                    "fileNamePattern": "icon-{{size}}.png",
                    "ico": {{ "file": "icon.ico", "sizes": [16] }}
                }}"#
            )
        };

        assert!(matches!(
            metadata(&template("[]", 16)),
            Err(FaviconError::NoSizes)
        ));
        assert!(matches!(
            metadata(&template("[0, 16]", 16)),
            Err(FaviconError::InvalidSize(0))
        ));
        assert!(matches!(
            metadata(&template("[16, 32, 16]", 16)),
            Err(FaviconError::DuplicatedSize(16))
        ));
        assert!(matches!(
            metadata(&template("[16, 32]", 64)),
            Err(FaviconError::PrimarySizeNotListed(64))
        ));
    }

    #[test]
    fn rejects_pattern_without_placeholder_and_oversized_frames() {
        let missing_placeholder = metadata(
            r#"{
                "source": "icon.png",
                "sizes": [16],
                "primarySize": 16,
                "fileNamePattern": "icon.png",
                "ico": { "file": "icon.ico", "sizes": [16] }
            }"#,
        );
        assert!(matches!(
            missing_placeholder,
            Err(FaviconError::MissingSizePlaceholder(_))
        ));

        let oversized = metadata(
            r#"{
                "source": "icon.png",
                "sizes": [16],
                "primarySize": 16,
                "fileNamePattern": "icon-{size}.png",
                "ico": { "file": "icon.ico", "sizes": [16, 512] }
            }"#,
        );
        assert!(matches!(
            oversized,
            Err(FaviconError::IcoSizeOutOfRange(512))
        ));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            metadata(r#"{ "source": 5 }"#),
            Err(FaviconError::MetadataParse(_))
        ));
    }
}
