use crate::error::{Result, SdfError};
use crate::mask_image::{mask_at, MaskImage};
use rayon::prelude::*;
use std::fmt;


/// Selects which side of the mask threshold a distance pass measures from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Polarity {
    /// Measures the distance to the nearest pixel whose mask is not `0`.
    Outside,

    /// Measures the distance to the nearest pixel whose mask is not `255`.
    Inside,
}

impl Polarity {
    /// The mask value a candidate must differ from in order to count.
    #[inline]
    pub fn threshold(self) -> u8 {
        match self {
            Polarity::Outside => 0,
            Polarity::Inside => 255,
        }
    }

    /// The squared distance assumed before any candidate was found.
    /// `Outside` starts at the largest squared distance along an axis of the window,
    /// `Inside` starts at its threshold value.
    #[inline]
    pub fn baseline(self, search_radius: u32) -> u64 {
        match self {
            Polarity::Outside => search_radius as u64 * search_radius as u64,
            Polarity::Inside => self.threshold() as u64,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Outside => f.write_str("outside"),
            Polarity::Inside => f.write_str("inside"),
        }
    }
}


/// Unsigned, quantized distances of one polarity pass,
/// with the same dimensions as the image it was computed from.
#[derive(Clone, PartialEq, Debug)]
pub struct DistanceGrid {
    width: u32,
    height: u32,

    /// A row-major vector with one distance per pixel.
    distances: Vec<u8>,
}

impl DistanceGrid {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.distances[self.flatten_index(x, y)]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.distances
    }

    #[inline]
    pub fn flatten_index(&self, x: u32, y: u32) -> usize {
        self.width as usize * y as usize + x as usize
    }
}


/// The factor by which an integer distance is scaled into the `0..=255` range.
#[inline]
pub fn quantization_scalar(search_radius: u32) -> u32 {
    255 / search_radius
}

/// Computes the distance field of one polarity by scanning the square window
/// `[x - radius, x + radius) × [y - radius, y + radius)` around every pixel.
/// The upper bound of the window is exclusive.
pub fn compute_field<I>(image: &I, polarity: Polarity, search_radius: u32) -> Result<DistanceGrid>
    where I: MaskImage + ?Sized
{
    validate(image, search_radius)?;

    let (width, height) = image.dimensions();
    let mut distances = vec![0_u8; width as usize * height as usize];

    for (y, row) in distances.chunks_mut(width as usize).enumerate() {
        fill_row(image, polarity, search_radius, y as u32, row);
    }

    log::debug!("computed {} field of {}x{} with search radius {}", polarity, width, height, search_radius);
    Ok(DistanceGrid { width, height, distances })
}

/// Same as `compute_field`, but distributes the rows across the rayon thread pool.
pub fn compute_field_parallel<I>(image: &I, polarity: Polarity, search_radius: u32) -> Result<DistanceGrid>
    where I: MaskImage + Sync + ?Sized
{
    validate(image, search_radius)?;

    let (width, height) = image.dimensions();
    let mut distances = vec![0_u8; width as usize * height as usize];

    distances.par_chunks_mut(width as usize).enumerate().for_each(|(y, row)| {
        fill_row(image, polarity, search_radius, y as u32, row);
    });

    log::debug!("computed {} field of {}x{} with search radius {} in parallel", polarity, width, height, search_radius);
    Ok(DistanceGrid { width, height, distances })
}

/// Computes the `Outside` and `Inside` fields of an image.
/// If `parallel` is set, both passes run concurrently and each pass
/// distributes its rows across the rayon thread pool.
/// The result does not depend on `parallel`.
pub fn compute_fields<I>(image: &I, search_radius: u32, parallel: bool) -> Result<(DistanceGrid, DistanceGrid)>
    where I: MaskImage + Sync + ?Sized
{
    validate(image, search_radius)?;

    if parallel {
        let (outside, inside) = rayon::join(
            || compute_field_parallel(image, Polarity::Outside, search_radius),
            || compute_field_parallel(image, Polarity::Inside, search_radius),
        );

        Ok((outside?, inside?))
    }
    else {
        Ok((
            compute_field(image, Polarity::Outside, search_radius)?,
            compute_field(image, Polarity::Inside, search_radius)?,
        ))
    }
}

fn validate<I: MaskImage + ?Sized>(image: &I, search_radius: u32) -> Result<()> {
    let (width, height) = image.dimensions();

    if width == 0 || height == 0 {
        return Err(SdfError::InvalidDimensions { width, height });
    }

    if search_radius == 0 {
        return Err(SdfError::InvalidParameter { name: "search_radius", value: search_radius });
    }

    Ok(())
}

#[inline]
fn fill_row<I>(image: &I, polarity: Polarity, search_radius: u32, y: u32, row: &mut [u8])
    where I: MaskImage + ?Sized
{
    for (x, distance) in row.iter_mut().enumerate() {
        *distance = pixel_distance(image, polarity, search_radius, x as u32, y);
    }
}

/// The quantized distance of a single pixel to the nearest unlike pixel in its window.
#[inline]
fn pixel_distance<I>(image: &I, polarity: Polarity, search_radius: u32, x: u32, y: u32) -> u8
    where I: MaskImage + ?Sized
{
    let threshold = polarity.threshold();
    let radius = search_radius as i64;
    let (x, y) = (x as i64, y as i64);

    let mut current = polarity.baseline(search_radius);

    for candidate_x in (x - radius)..(x + radius) {
        for candidate_y in (y - radius)..(y + radius) {
            match mask_at(image, candidate_x, candidate_y) {
                Some(mask) if mask != threshold => {
                    let dx = x - candidate_x;
                    let dy = y - candidate_y;
                    current = current.min((dx * dx + dy * dy) as u64);
                }

                _ => {}
            }
        }
    }

    quantize(current, search_radius)
}

/// `floor(sqrt(squared_distance)) * (255 / radius)`, saturated at 255.
#[inline]
fn quantize(squared_distance: u64, search_radius: u32) -> u8 {
    let distance = integer_sqrt(squared_distance);
    let scaled = distance.saturating_mul(quantization_scalar(search_radius) as u64);
    scaled.min(255) as u8
}

/// The largest integer whose square does not exceed `value`.
#[inline]
fn integer_sqrt(value: u64) -> u64 {
    let mut root = (value as f64).sqrt() as u64;

    // correct floating point error at large values
    while root * root > value { root -= 1; }
    while (root + 1) * (root + 1) <= value { root += 1; }

    root
}
