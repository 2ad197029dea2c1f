use crate::favicon::gen::OutputGenerator;
use crate::favicon::inputs::SourceImage;
use crate::favicon::mask;
use crate::favicon::FaviconError;
use image::RgbaImage;
use std::io::Write;
use std::path::Path;

/// Renders one circular favicon of `size`x`size` and writes it to `path`.
pub fn process_png_target(
    source: &SourceImage,
    size: u32,
    path: &Path,
    outputs: &mut OutputGenerator,
) -> Result<(), FaviconError> {
    let resized = source.resample(size, size)?;
    let favicon = mask::apply_circular_mask(&resized);

    let mut writer = outputs.create_output(format!("png-{size}"), path)?;
    encode_png(&favicon, &mut writer)?;
    writer.flush()?;

    Ok(())
}

/// Encodes an RGBA image as an 8-bit PNG.
pub fn encode_png(image: &RgbaImage, writer: &mut impl Write) -> Result<(), FaviconError> {
    let mut encoder = png::Encoder::new(writer, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())?;
    writer.finish()?;

    Ok(())
}
