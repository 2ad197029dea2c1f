use crate::favicon::FaviconError;
use image::RgbaImage;
use resvg::tiny_skia;

pub fn render_svg_into_pixmap(
    render_tree: &resvg::Tree,
    pixmap: &mut tiny_skia::PixmapMut,
    width: u32,
    height: u32,
) {
    // Stretch the document to cover the whole pixmap
    let x_scale = width as f32 / render_tree.size.width();
    let y_scale = height as f32 / render_tree.size.height();

    let transform = tiny_skia::Transform::from_scale(x_scale, y_scale);
    render_tree.render(transform, pixmap);
}

pub fn render_svg_to_pixmap(
    render_tree: &resvg::Tree,
    target_width: u32,
    target_height: u32,
) -> Result<tiny_skia::Pixmap, FaviconError> {
    // Construct a pixmap to render to
    let mut pixmap = tiny_skia::Pixmap::new(target_width, target_height).ok_or(
        FaviconError::InvalidPixmapDimensions {
            width: target_width,
            height: target_height,
        },
    )?;

    render_svg_into_pixmap(render_tree, &mut pixmap.as_mut(), target_width, target_height);

    Ok(pixmap)
}

/// Converts a premultiplied pixmap into a straight-alpha RGBA image.
pub fn pixmap_to_rgba_image(pixmap: &tiny_skia::Pixmap) -> Result<RgbaImage, FaviconError> {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data).ok_or(
        FaviconError::InvalidPixmapDimensions {
            width: pixmap.width(),
            height: pixmap.height(),
        },
    )
}
