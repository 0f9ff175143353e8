use crate::error::{ConfigSource, Result, SdfError};
use serde::{Deserialize, Serialize};
use std::path::Path;


/// Tunable parameters of the distance field generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdfConfig {
    /// Half-width of the square window scanned around every pixel.
    pub search_radius: u32,

    /// Width of the written image, the height follows the aspect ratio.
    pub target_width: u32,

    /// Compute both polarity passes and their rows on the rayon thread pool.
    pub parallel: bool,
}

impl SdfConfig {
    pub const DEFAULT_SEARCH_RADIUS: u32 = 8;
    pub const DEFAULT_TARGET_WIDTH: u32 = 256;

    /// Rejects parameters that would make the computation meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.search_radius == 0 {
            return Err(SdfError::InvalidParameter { name: "search_radius", value: self.search_radius });
        }

        if self.target_width == 0 {
            return Err(SdfError::InvalidParameter { name: "target_width", value: self.target_width });
        }

        Ok(())
    }

    /// Reads a configuration from a JSON file.
    /// Missing fields fall back to their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_error = |source: ConfigSource| SdfError::Config { path: path.to_path_buf(), source };

        let text = std::fs::read_to_string(path).map_err(|error| config_error(error.into()))?;
        let config: SdfConfig = serde_json::from_str(&text).map_err(|error| config_error(error.into()))?;

        config.validate()?;
        Ok(config)
    }
}

impl Default for SdfConfig {
    fn default() -> Self {
        SdfConfig {
            search_radius: Self::DEFAULT_SEARCH_RADIUS,
            target_width: Self::DEFAULT_TARGET_WIDTH,
            parallel: true,
        }
    }
}
