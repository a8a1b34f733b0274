//! Image preprocessing for the skin-type classifier
//!
//! Turns uploaded image bytes into the fixed-shape tensor the model expects:
//! decode, orient, resize to 150x150, force RGB, lay out as NHWC. Pixel
//! values stay in the raw 0-255 range; the model was trained without scaling
//! to [0, 1] and the serving transform must match.

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use ndarray::Array4;

use crate::error::Error;

/// Classifier input geometry. The model's input layer is (1, 150, 150, 3).
pub const INPUT_WIDTH: u32 = 150;
pub const INPUT_HEIGHT: u32 = 150;
pub const INPUT_CHANNELS: usize = 3;

/// Resampling filter used for the 150x150 resize. Catmull-Rom is the bicubic
/// filter the reference model saw at training time; changing it shifts pixel
/// values and therefore predictions.
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Decode image bytes (JPEG, PNG, etc.) with EXIF orientation handling.
/// Phone selfies routinely store orientation as metadata instead of rotated
/// pixels, so decoding without this step feeds the model sideways faces.
pub fn decode_image(data: &[u8]) -> Result<DynamicImage, Error> {
    let image = image::load_from_memory(data)?;

    Ok(apply_exif_orientation(data, image))
}

/// Apply EXIF orientation to correct image rotation
fn apply_exif_orientation(data: &[u8], image: DynamicImage) -> DynamicImage {
    use std::io::Cursor;

    let orientation = match exif::Reader::new().read_from_container(&mut Cursor::new(data)) {
        Ok(exif_data) => exif_data
            .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(1) as u8,
        Err(_) => 1, // No EXIF or error reading, assume normal orientation
    };

    // See: https://exiftool.org/TagNames/EXIF.html (Orientation)
    match orientation {
        1 => image,
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}

/// Transform a decoded image into the model's input tensor.
///
/// Palette, grayscale and alpha-bearing images are converted to RGB before
/// the tensor is built, so every decodable image reaches the model with
/// exactly 3 channels regardless of its original layout or aspect ratio.
pub fn preprocess(image: &DynamicImage) -> Result<Array4<f32>, Error> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::UnsupportedChannelLayout(format!(
            "image has no pixels ({}x{})",
            width, height
        )));
    }

    let resized = image.resize_exact(INPUT_WIDTH, INPUT_HEIGHT, RESIZE_FILTER);
    let rgb = resized.to_rgb8();

    let mut tensor = Array4::<f32>::zeros((
        1,
        INPUT_HEIGHT as usize,
        INPUT_WIDTH as usize,
        INPUT_CHANNELS,
    ));

    for y in 0..INPUT_HEIGHT {
        for x in 0..INPUT_WIDTH {
            let pixel = rgb.get_pixel(x, y);
            // NHWC, raw channel values in [0, 255]
            tensor[[0, y as usize, x as usize, 0]] = pixel[0] as f32;
            tensor[[0, y as usize, x as usize, 1]] = pixel[1] as f32;
            tensor[[0, y as usize, x as usize, 2]] = pixel[2] as f32;
        }
    }

    Ok(tensor)
}

/// Decode and preprocess in one step.
pub fn preprocess_bytes(data: &[u8]) -> Result<Array4<f32>, Error> {
    let image = decode_image(data)?;
    preprocess(&image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb, Rgba};

    fn encode_png(image: &DynamicImage) -> Vec<u8> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        image.write_to(&mut buffer, image::ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    fn solid_rgb(width: u32, height: u32, value: u8) -> DynamicImage {
        DynamicImage::ImageRgb8(ImageBuffer::from_pixel(
            width,
            height,
            Rgb([value, value, value]),
        ))
    }

    #[test]
    fn test_output_shape_regardless_of_input_size() {
        for (w, h) in [(150, 150), (500, 500), (300, 200), (40, 90)] {
            let tensor = preprocess(&solid_rgb(w, h, 128)).unwrap();
            assert_eq!(tensor.dim(), (1, 150, 150, 3));
        }
    }

    #[test]
    fn test_grayscale_converted_to_three_channels() {
        let gray = DynamicImage::ImageLuma8(ImageBuffer::from_pixel(80, 80, Luma([200u8])));
        let tensor = preprocess(&gray).unwrap();
        assert_eq!(tensor.dim(), (1, 150, 150, 3));
        assert_eq!(tensor[[0, 0, 0, 0]], tensor[[0, 0, 0, 1]]);
        assert_eq!(tensor[[0, 0, 0, 1]], tensor[[0, 0, 0, 2]]);
    }

    #[test]
    fn test_black_and_white_image_does_not_fail() {
        // Two-tone image stored as grayscale, like a 1-bit scan
        let mut buf = ImageBuffer::from_pixel(64, 64, Luma([0u8]));
        for x in 0..32 {
            for y in 0..64 {
                buf.put_pixel(x, y, Luma([255u8]));
            }
        }
        let tensor = preprocess(&DynamicImage::ImageLuma8(buf)).unwrap();
        assert_eq!(tensor.dim(), (1, 150, 150, 3));
    }

    #[test]
    fn test_alpha_channel_dropped() {
        let rgba = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(
            160,
            160,
            Rgba([10u8, 20, 30, 128]),
        ));
        let tensor = preprocess(&rgba).unwrap();
        assert_eq!(tensor.dim(), (1, 150, 150, 3));
    }

    #[test]
    fn test_pixel_values_unnormalized() {
        let tensor = preprocess(&solid_rgb(150, 150, 255)).unwrap();
        assert_eq!(tensor[[0, 75, 75, 0]], 255.0);

        let tensor = preprocess(&solid_rgb(150, 150, 0)).unwrap();
        assert_eq!(tensor[[0, 75, 75, 0]], 0.0);
    }

    #[test]
    fn test_resize_determinism_across_source_sizes() {
        // An all-black 500x500 source must produce the identical tensor to a
        // native 150x150 all-black image.
        let native = preprocess(&solid_rgb(150, 150, 0)).unwrap();
        let downscaled = preprocess(&solid_rgb(500, 500, 0)).unwrap();
        assert_eq!(native, downscaled);
    }

    #[test]
    fn test_preprocess_is_deterministic() {
        let image = solid_rgb(320, 240, 77);
        assert_eq!(preprocess(&image).unwrap(), preprocess(&image).unwrap());
    }

    #[test]
    fn test_decode_roundtrip_through_png() {
        let bytes = encode_png(&solid_rgb(200, 100, 50));
        let tensor = preprocess_bytes(&bytes).unwrap();
        assert_eq!(tensor.dim(), (1, 150, 150, 3));
        assert_eq!(tensor[[0, 0, 0, 0]], 50.0);
    }

    #[test]
    fn test_malformed_bytes_produce_decode_error() {
        let result = preprocess_bytes(b"definitely not an image");
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_truncated_png_produces_decode_error() {
        let mut bytes = encode_png(&solid_rgb(100, 100, 10));
        bytes.truncate(bytes.len() / 2);
        assert!(matches!(preprocess_bytes(&bytes), Err(Error::Decode(_))));
    }
}
