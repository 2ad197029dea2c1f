mod gen;
mod inputs;
mod mask;
mod meta;
mod render;
mod targets;

pub use crate::favicon::gen::BuildOutputs;
use crate::favicon::gen::OutputGenerator;
use crate::favicon::inputs::SourceImage;
pub use crate::favicon::meta::FaviconMetadata;
use resvg::usvg;
use std::path::PathBuf;
use thiserror::Error;

pub struct FaviconProcessor {
    metadata: FaviconMetadata,
}

impl FaviconProcessor {
    pub fn new(metadata: FaviconMetadata) -> Self {
        Self { metadata }
    }

    pub fn metadata(&self) -> &FaviconMetadata {
        &self.metadata
    }

    /// Generates one circular favicon per configured size.
    ///
    /// The primary size replaces a raster source file (an SVG source is kept
    /// and gets a `.png` sibling), every other size is written next to it. The
    /// first failure stops the run; files written before it are kept.
    pub fn generate(&self) -> Result<BuildOutputs, FaviconError> {
        let source = SourceImage::load(&self.metadata.source)?;

        let (width, height) = source.dimensions();
        tracing::info!(
            "Loaded source {} ({}x{})",
            self.metadata.source.display(),
            width,
            height
        );

        let mut output_generator = OutputGenerator::new();

        for &size in &self.metadata.sizes {
            let path = self.metadata.output_path(size);
            targets::process_png_target(&source, size, &path, &mut output_generator)?;

            if path == self.metadata.source {
                tracing::info!("Updated {} ({}x{})", path.display(), size, size);
            } else {
                tracing::info!("Created {} ({}x{})", path.display(), size, size);
            }
        }

        Ok(output_generator.finalize())
    }

    /// Packs the generated small sizes into the icon container.
    ///
    /// The returned outputs hold the container as `ico`, or nothing if none of
    /// its frames exist.
    pub fn package(&self) -> Result<BuildOutputs, FaviconError> {
        let mut output_generator = OutputGenerator::new();
        targets::process_ico_target(&self.metadata, &mut output_generator)?;
        Ok(output_generator.finalize())
    }
}

#[derive(Error, Debug)]
pub enum FaviconError {
    #[error("an I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("an error occurred while parsing the favicon metadata: {0}")]
    MetadataParse(serde_json::Error),

    #[error("the source image {} does not exist", .0.display())]
    SourceNotFound(PathBuf),

    #[error("failed to decode image: {0}")]
    ImageDecode(image::ImageError),

    #[error("failed to parse SVG: {0}")]
    SvgParse(usvg::Error),

    #[error("the pixmap dimensions are invalid: {width}x{height}")]
    InvalidPixmapDimensions { width: u32, height: u32 },

    #[error("an error occurred while encoding the PNG: {0}")]
    PngEncoding(#[from] png::EncodingError),

    #[error("the icon frame {} is {width}x{height}, larger than an icon can hold", path.display())]
    IcoFrameTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    #[error("the output {name} has already been generated at {}", path.display())]
    DuplicatedOutput { name: String, path: PathBuf },

    #[error("the output {0} was not found in the generated outputs")]
    OutputNotFound(String),

    #[error("no favicon sizes are configured")]
    NoSizes,

    #[error("the favicon size {0} is invalid")]
    InvalidSize(u32),

    #[error("the favicon size {0} is listed more than once")]
    DuplicatedSize(u32),

    #[error("the primary size {0} is not one of the configured sizes")]
    PrimarySizeNotListed(u32),

    #[error("the file name pattern {0} does not contain {{size}}")]
    MissingSizePlaceholder(String),

    #[error("the icon size {0} is outside of 1..=256")]
    IcoSizeOutOfRange(u32),
}
