//! File-to-file HLS adjustment.

use std::path::Path;

use crate::color::{hls_to_rgb, rgb_to_hls};
use crate::error::Result;
use crate::image::{self, ImageTensor};

use super::adjust::{adjust_hls, Config};

/// Pipeline applying HLS adjustments to RGB images.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Create a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        tracing::info!("Initializing pipeline with config: {config:?}");

        Ok(Self { config })
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Adjust an RGB tensor in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the tensor is not `(N, 3, H, W)`.
    pub fn apply(&self, rgb: &ImageTensor) -> Result<ImageTensor> {
        let hls = rgb_to_hls(rgb)?;
        let adjusted = adjust_hls(&hls, &self.config)?;
        hls_to_rgb(&adjusted)
    }

    /// Load an image, adjust it and save the result.
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input image
    /// * `output_path` - Path to save the processed image
    ///
    /// # Errors
    ///
    /// Returns an error if loading, conversion or saving fails.
    pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        tracing::info!("Processing image: {}", input_path.display());

        let (rgb, (width, height)) = image::load_image(input_path)?;
        tracing::info!("Loaded {width}x{height} image");

        let output = if self.config.is_identity() {
            tracing::info!("Identity adjustment, skipping conversion");
            rgb
        } else {
            tracing::info!("Adjusting in HLS space...");
            self.apply(&rgb)?
        };

        tracing::info!("Saving output to: {}", output_path.display());
        image::save_image(&output, output_path, self.config.output_quality)?;

        tracing::info!("Processing complete");
        Ok(())
    }
}
