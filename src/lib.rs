//! This crate computes signed distance field
//! textures for font and sprite rendering, given a mask image.
//! The algorithm is a brute force search for the nearest unlike pixel
//! within a bounded window around every pixel, performed once for each side
//! of the mask and then mixed into a single grayscale field.

pub mod config;
pub mod distance_field;
pub mod error;
pub mod mask_image;
pub mod mixer;
pub mod pipeline;

pub use error::{Result, SdfError};

pub mod prelude {
    pub use crate::{
        generate_distance_field,
        generate_distance_texture,
    };

    pub use crate::mask_image::{
        MaskImage, RgbaByteImage
    };

    pub use crate::distance_field::{
        compute_field, compute_fields,
        DistanceGrid, Polarity
    };

    pub use crate::config::SdfConfig;
    pub use crate::error::{Result, SdfError};
    pub use crate::mixer::mix;
}


use prelude::*;
use image::RgbaImage;

/// Compute the full resolution signed distance field of the specified image.
pub fn generate_distance_field<I>(image: &I, config: &SdfConfig) -> Result<RgbaImage>
    where I: MaskImage + Sync + ?Sized
{
    pipeline::generate(image, config)
}

/// Compute the signed distance field of the specified image,
/// downsampled to the configured target width.
pub fn generate_distance_texture<I>(image: &I, config: &SdfConfig) -> Result<RgbaImage>
    where I: MaskImage + Sync + ?Sized
{
    pipeline::process(image, config)
}
