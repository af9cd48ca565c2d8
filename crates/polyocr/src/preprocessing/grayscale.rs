use image::{DynamicImage, GrayImage, Luma};

const RED_WEIGHT: u32 = 19595;
const GREEN_WEIGHT: u32 = 38470;
const BLUE_WEIGHT: u32 = 7471;

/// Single-channel grayscale with ITU-R BT.601 weights (`0.299 R + 0.587 G + 0.114 B`).
///
/// Weights are 16-bit fixed point, rounded half-up. Images that are already luma keep their
/// values; alpha is dropped without compositing.
pub fn to_grayscale(image: &DynamicImage) -> GrayImage {
    match image {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => image.to_luma8(),
        _ => {
            let rgb = image.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                Luma([rec601_luma(r, g, b)])
            })
        }
    }
}

fn rec601_luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = u32::from(r) * RED_WEIGHT + u32::from(g) * GREEN_WEIGHT + u32::from(b) * BLUE_WEIGHT;
    ((weighted + 0x8000) >> 16) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_weights_sum_to_unity() {
        assert_eq!(RED_WEIGHT + GREEN_WEIGHT + BLUE_WEIGHT, 1 << 16);
    }

    #[test]
    fn test_saturated_red_uses_bt601_weights() {
        let rgb = RgbImage::from_pixel(1, 1, Rgb([200, 40, 40]));
        let gray = to_grayscale(&DynamicImage::ImageRgb8(rgb));
        assert_eq!(gray.get_pixel(0, 0)[0], 88);
    }

    #[test]
    fn test_primaries() {
        let rgb = RgbImage::from_fn(3, 1, |x, _| match x {
            0 => Rgb([255, 0, 0]),
            1 => Rgb([0, 255, 0]),
            _ => Rgb([0, 0, 255]),
        });
        let gray = to_grayscale(&DynamicImage::ImageRgb8(rgb));
        assert_eq!(gray.get_pixel(0, 0)[0], 76);
        assert_eq!(gray.get_pixel(1, 0)[0], 150);
        assert_eq!(gray.get_pixel(2, 0)[0], 29);
    }

    #[test]
    fn test_neutral_gray_is_unchanged() {
        let rgb = RgbImage::from_fn(256, 1, |x, _| Rgb([x as u8, x as u8, x as u8]));
        let gray = to_grayscale(&DynamicImage::ImageRgb8(rgb));
        for (x, pixel) in gray.pixels().enumerate() {
            assert_eq!(pixel[0] as usize, x);
        }
    }

    #[test]
    fn test_alpha_is_dropped() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([200, 40, 40, 0]));
        let gray = to_grayscale(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(gray.get_pixel(1, 1)[0], 88);
    }

    #[test]
    fn test_luma_input_passes_through() {
        let luma = GrayImage::from_fn(4, 1, |x, _| Luma([(x * 60) as u8]));
        assert_eq!(to_grayscale(&DynamicImage::ImageLuma8(luma.clone())), luma);
    }
}
