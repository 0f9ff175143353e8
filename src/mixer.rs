use crate::distance_field::DistanceGrid;
use crate::error::{Result, SdfError};
use image::{Rgba, RgbaImage};


/// Combines an `Outside` and an `Inside` field into one opaque grayscale image.
/// Each pixel becomes `((255 - outside) + inside) / 2`, rounded down.
pub fn mix(outside: &DistanceGrid, inside: &DistanceGrid) -> Result<RgbaImage> {
    if outside.dimensions() != inside.dimensions() {
        return Err(SdfError::DimensionMismatch {
            outside: outside.dimensions(),
            inside: inside.dimensions(),
        });
    }

    let (width, height) = outside.dimensions();

    Ok(RgbaImage::from_fn(width, height, |x, y| {
        let gray = mix_distances(outside.get(x, y), inside.get(x, y));
        Rgba([gray, gray, gray, 255])
    }))
}

#[inline]
fn mix_distances(outside: u8, inside: u8) -> u8 {
    let sum = (255 - outside as u16) + inside as u16;
    (sum / 2) as u8
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance_field::{compute_field, Polarity};
    use crate::mask_image::RgbaByteImage;

    fn field_of(width: u32, height: u32, pixel: [u8; 4], polarity: Polarity, radius: u32) -> DistanceGrid {
        let buffer: Vec<u8> = pixel.iter().copied().cycle().take(width as usize * height as usize * 4).collect();
        let image = RgbaByteImage::from_slice(width, height, &buffer);
        compute_field(&image, polarity, radius).unwrap()
    }

    #[test]
    fn mixing_floors() {
        assert_eq!(mix_distances(0, 0), 127);
        assert_eq!(mix_distances(0, 255), 255);
        assert_eq!(mix_distances(255, 0), 0);
        assert_eq!(mix_distances(254, 0), 0);
        assert_eq!(mix_distances(252, 0), 1);
        assert_eq!(mix_distances(63, 0), 96);
        assert_eq!(mix_distances(0, 63), 159);
    }

    #[test]
    fn output_is_opaque_gray_of_same_size() {
        let outside = field_of(3, 5, [0, 0, 0, 0], Polarity::Outside, 2);
        let inside = field_of(3, 5, [0, 0, 0, 0], Polarity::Inside, 2);

        let mixed = mix(&outside, &inside).unwrap();
        assert_eq!(mixed.dimensions(), (3, 5));

        for pixel in mixed.pixels() {
            assert_eq!(pixel.0, [255, 255, 255, 255]);
        }
    }

    #[test]
    fn mismatched_fields_are_rejected() {
        let outside = field_of(4, 4, [0, 0, 0, 255], Polarity::Outside, 2);
        let inside = field_of(4, 3, [0, 0, 0, 255], Polarity::Inside, 2);

        match mix(&outside, &inside) {
            Err(SdfError::DimensionMismatch { outside: (4, 4), inside: (4, 3) }) => {}
            other => panic!("unexpected result {:?}", other.map(|image| image.dimensions())),
        }
    }
}
