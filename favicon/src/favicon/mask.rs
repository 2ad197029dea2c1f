use image::{GrayImage, Luma, RgbaImage};

/// Builds a mask with the ellipse inscribed in a `width`x`height` box filled
/// opaque. A pixel belongs to the ellipse when its centre does, so every value
/// is either 0 or 255.
pub fn elliptical_mask(width: u32, height: u32) -> GrayImage {
    let rx = width as f64 / 2.0;
    let ry = height as f64 / 2.0;

    GrayImage::from_fn(width, height, |x, y| {
        let dx = (x as f64 + 0.5 - rx) / rx;
        let dy = (y as f64 + 0.5 - ry) / ry;

        if dx * dx + dy * dy <= 1.0 {
            Luma([u8::MAX])
        } else {
            Luma([0])
        }
    })
}

/// Replaces the alpha channel of `image` with `mask`.
pub fn put_alpha(image: &mut RgbaImage, mask: &GrayImage) {
    for (pixel, alpha) in image.pixels_mut().zip(mask.pixels()) {
        pixel[3] = alpha[0];
    }
}

/// Pastes `layer` onto `canvas`, weighting every channel by the layer's own
/// alpha.
pub fn paste_with_alpha(canvas: &mut RgbaImage, layer: &RgbaImage) {
    for (dst, src) in canvas.pixels_mut().zip(layer.pixels()) {
        let weight = src[3] as u32;
        for channel in 0..4 {
            let blended =
                src[channel] as u32 * weight + dst[channel] as u32 * (255 - weight) + 127;
            dst[channel] = (blended / 255) as u8;
        }
    }
}

/// Cuts the inscribed circle out of `image`, leaving everything else fully
/// transparent.
pub fn apply_circular_mask(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mask = elliptical_mask(width, height);

    let mut masked = image.clone();
    put_alpha(&mut masked, &mask);

    let mut canvas = RgbaImage::new(width, height);
    paste_with_alpha(&mut canvas, &masked);
    canvas
}
