use crate::favicon::gen::OutputGenerator;
use crate::favicon::meta::{FaviconMetadata, MAX_ICO_SIZE};
use crate::favicon::FaviconError;
use std::io::Write;

/// Packs the previously generated favicons into one icon container.
///
/// Frames are read back from disk; sizes whose file does not exist are
/// skipped. Nothing is written, and no `ico` output recorded, when no frame
/// was found.
pub fn process_ico_target(
    metadata: &FaviconMetadata,
    outputs: &mut OutputGenerator,
) -> Result<(), FaviconError> {
    // Generate a new ICO directory
    let mut icon_dir = ico::IconDir::new(ico::ResourceType::Icon);

    for &size in &metadata.ico.sizes {
        let frame_path = metadata.output_path(size);
        if !frame_path.is_file() {
            tracing::debug!("Skipping missing icon frame {}", frame_path.display());
            continue;
        }

        let frame = image::open(&frame_path)
            .map_err(FaviconError::ImageDecode)?
            .into_rgba8();

        let (width, height) = frame.dimensions();
        if width > MAX_ICO_SIZE || height > MAX_ICO_SIZE {
            return Err(FaviconError::IcoFrameTooLarge {
                path: frame_path,
                width,
                height,
            });
        }

        // Each frame keeps the dimensions it was stored with
        let icon_image = ico::IconImage::from_rgba_data(width, height, frame.into_raw());
        icon_dir.add_entry(ico::IconDirEntry::encode(&icon_image)?);
    }

    if icon_dir.entries().is_empty() {
        return Ok(());
    }

    // Write the ICO directory to the output
    let mut writer = outputs.create_output("ico", metadata.ico_path())?;
    icon_dir.write(&mut writer)?;
    writer.flush()?;

    Ok(())
}
