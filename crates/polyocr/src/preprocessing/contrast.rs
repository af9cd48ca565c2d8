use image::GrayImage;

/// Fixed contrast amplification applied to every image before recognition.
pub const CONTRAST_FACTOR: f32 = 2.0;

/// Mean luminance of `image`, rounded half-up. Zero-sized images have mean 0.
pub fn mean_luminance(image: &GrayImage) -> u8 {
    let pixel_count = u64::from(image.width()) * u64::from(image.height());
    if pixel_count == 0 {
        return 0;
    }

    let sum: u64 = image.pixels().map(|p| u64::from(p[0])).sum();
    let mean = sum as f64 / pixel_count as f64;
    (mean + 0.5).floor().min(255.0) as u8
}

/// Blend every pixel away from the mean luminance by `factor`.
///
/// `out = mean + factor * (p - mean)`, clamped to `0..=255` and truncated. A factor of `1.0`
/// is the identity, `0.0` yields a uniform image at the mean, and a uniform input is returned
/// unchanged for any factor.
pub fn enhance_contrast(mut image: GrayImage, factor: f32) -> GrayImage {
    let mean = f32::from(mean_luminance(&image));

    for pixel in image.pixels_mut() {
        let value = mean + factor * (f32::from(pixel[0]) - mean);
        pixel[0] = value.clamp(0.0, 255.0) as u8;
    }

    image
}
