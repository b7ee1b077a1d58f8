//! HLS adjustment pipeline: RGB -> HLS -> adjust -> RGB.

mod adjust;
mod process;

pub use adjust::{adjust_hls, Config};
pub use process::Pipeline;
