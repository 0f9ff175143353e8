use std::path::PathBuf;

/// Everything that can go wrong while generating a distance field.
/// None of these are recoverable within a single run.
#[derive(Debug, thiserror::Error)]
pub enum SdfError {
    /// The source image has no pixels along at least one axis.
    #[error("invalid image dimensions {width}x{height}, both must be at least 1")]
    InvalidDimensions { width: u32, height: u32 },

    /// A numeric parameter is outside of its valid range.
    #[error("invalid parameter `{name}` = {value}, must be positive")]
    InvalidParameter { name: &'static str, value: u32 },

    /// The two polarity fields were not computed from the same source.
    #[error(
        "distance field dimensions differ: outside is {}x{}, inside is {}x{}",
        outside.0, outside.1, inside.0, inside.1
    )]
    DimensionMismatch { outside: (u32, u32), inside: (u32, u32) },

    /// Reading, decoding, encoding or writing an image failed.
    #[error("image i/o failed for `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration file `{}`: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigSource,
    },
}

/// Why a configuration file was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ConfigSource {
    #[error(transparent)]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SdfError>;
