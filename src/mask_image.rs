
/// Represents an image with a single grayscale mask intensity per pixel.
/// Fully transparent pixels are reported as `255`, the "outside" sentinel,
/// all other pixels report their red channel.
/// MaskImages can be created from byte slices or from `image::RgbaImage`.
pub trait MaskImage {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// The mask intensity of an in-bounds pixel.
    fn mask_value(&self, x: u32, y: u32) -> u8;

    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}

/// The mask value of a single RGBA pixel.
#[inline]
pub fn mask_of_rgba(rgba: [u8; 4]) -> u8 {
    if rgba[3] == 0 { 255 } else { rgba[0] }
}

/// Look up the mask value at possibly out-of-bounds coordinates.
/// Coordinates outside of the image yield `None` and never match anything.
#[inline]
pub fn mask_at<I: MaskImage + ?Sized>(image: &I, x: i64, y: i64) -> Option<u8> {
    if x >= 0 && y >= 0 && x < image.width() as i64 && y < image.height() as i64 {
        Some(image.mask_value(x as u32, y as u32))
    }
    else {
        None
    }
}


/// An image which is described by a slice of bytes with four bytes per pixel,
/// in red, green, blue, alpha order.
pub struct RgbaByteImage<'b> {
    width: u32,
    height: u32,

    /// A row-major image vector with four bytes per pixel.
    buffer: &'b [u8],
}

impl<'b> RgbaByteImage<'b> {
    /// Wrap a row-major RGBA buffer.
    pub fn from_slice(width: u32, height: u32, buffer: &'b [u8]) -> Self {
        debug_assert_eq!(buffer.len(), width as usize * height as usize * 4, "Buffer dimension mismatch");
        RgbaByteImage { width, height, buffer }
    }
}

impl MaskImage for RgbaByteImage<'_> {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn mask_value(&self, x: u32, y: u32) -> u8 {
        let index = (self.width as usize * y as usize + x as usize) * 4;
        mask_of_rgba([
            self.buffer[index], self.buffer[index + 1],
            self.buffer[index + 2], self.buffer[index + 3],
        ])
    }
}

impl MaskImage for image::RgbaImage {
    #[inline]
    fn width(&self) -> u32 {
        image::RgbaImage::width(self)
    }

    #[inline]
    fn height(&self) -> u32 {
        image::RgbaImage::height(self)
    }

    #[inline]
    fn mask_value(&self, x: u32, y: u32) -> u8 {
        mask_of_rgba(self.get_pixel(x, y).0)
    }
}
