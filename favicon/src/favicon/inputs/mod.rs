use crate::favicon::meta::is_svg_path;
use crate::favicon::FaviconError;
use image::imageops::FilterType;
use image::RgbaImage;
use resvg::usvg;
use resvg::usvg::TreeParsing;
use std::path::Path;

/// The image every favicon size is derived from.
pub enum SourceImage {
    /// A decoded raster image, always RGBA
    Raster(RgbaImage),

    /// A parsed SVG document, rendered at each requested size
    Vector(resvg::Tree),
}

impl SourceImage {
    /// Loads the source image, picking the decoder by file extension.
    pub fn load(path: &Path) -> Result<Self, FaviconError> {
        if !path.exists() {
            return Err(FaviconError::SourceNotFound(path.to_path_buf()));
        }

        if is_svg_path(path) {
            Self::load_svg(path)
        } else {
            let image = image::open(path).map_err(FaviconError::ImageDecode)?;
            Ok(Self::Raster(image.into_rgba8()))
        }
    }

    fn load_svg(path: &Path) -> Result<Self, FaviconError> {
        let data = std::fs::read_to_string(path)?;

        let parse_options = usvg::Options {
            resources_dir: path.parent().map(Path::to_path_buf),
            ..Default::default()
        };

        let tree =
            usvg::Tree::from_str(&data, &parse_options).map_err(FaviconError::SvgParse)?;

        Ok(Self::Vector(resvg::Tree::from_usvg(&tree)))
    }

    /// Width and height of the source before any resampling.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Raster(image) => image.dimensions(),
            Self::Vector(tree) => (
                tree.size.width().round() as u32,
                tree.size.height().round() as u32,
            ),
        }
    }

    /// Produces a `width`x`height` copy of the source.
    pub fn resample(&self, width: u32, height: u32) -> Result<RgbaImage, FaviconError> {
        match self {
            Self::Raster(image) => Ok(image::imageops::resize(
                image,
                width,
                height,
                FilterType::Lanczos3,
            )),
            Self::Vector(tree) => {
                let pixmap = crate::favicon::render::render_svg_to_pixmap(tree, width, height)?;
                crate::favicon::render::pixmap_to_rgba_image(&pixmap)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba};
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.png");

        match SourceImage::load(&path) {
            Err(FaviconError::SourceNotFound(p)) => assert_eq!(p, path),
            other => panic!("unexpected result: {:?}", other.map(|s| s.dimensions())),
        }
    }

    #[test]
    fn grayscale_source_is_converted_to_rgba() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gray.png");
        GrayImage::from_pixel(8, 4, Luma([90])).save(&path).unwrap();

        let source = SourceImage::load(&path).unwrap();
        assert_eq!(source.dimensions(), (8, 4));

        let resized = source.resample(4, 4).unwrap();
        assert_eq!(resized.dimensions(), (4, 4));
        assert_eq!(*resized.get_pixel(2, 2), Rgba([90, 90, 90, 255]));
    }

    #[test]
    fn svg_source_is_rendered_at_requested_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("icon.SVG");
        std::fs::write(
            &path,
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="32" viewBox="0 0 64 32">
  <rect width="64" height="32" fill="#dc2626"/>
</svg>"##,
        )
        .unwrap();

        let source = SourceImage::load(&path).unwrap();
        assert!(matches!(source, SourceImage::Vector(_)));
        assert_eq!(source.dimensions(), (64, 32));

        let rendered = source.resample(16, 16).unwrap();
        assert_eq!(rendered.dimensions(), (16, 16));
        assert_eq!(*rendered.get_pixel(8, 8), Rgba([220, 38, 38, 255]));
    }

    #[test]
    fn undecodable_source_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(
            SourceImage::load(&path),
            Err(FaviconError::ImageDecode(_))
        ));
    }
}
