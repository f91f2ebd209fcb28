//! Background removal: the eraser seam and the multi-cycle driver.

mod background;
pub mod border_key;
pub mod command;
pub mod config;
pub mod cycles;

use std::sync::Arc;

use image::RgbaImage;

use crate::error::Result;

pub use border_key::BorderKeyEraser;
pub use command::CommandEraser;
pub use config::{EraserConfig, EraserKind};
pub use cycles::erase_cycles;

/// Replaces background pixels of an image with transparency.
///
/// `Ok(None)` means the eraser produced nothing usable for this image.
pub trait BackgroundEraser: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn erase(&self, image: &RgbaImage) -> Result<Option<RgbaImage>>;
}

/// Build the eraser selected by the configuration.
pub fn eraser_from_config(config: &EraserConfig) -> Arc<dyn BackgroundEraser> {
    match config.kind {
        EraserKind::BorderKey => Arc::new(BorderKeyEraser::from_config(config)),
        EraserKind::Command => Arc::new(CommandEraser::new(config.command.clone())),
    }
}
