//! Capture of rendered letters and their packaging as PDF or PNG.

use std::time::Duration;

use letter_core::constants::{OVERSAMPLE, SETTLE_TIMEOUT};

pub mod assets;
pub mod error;
pub mod pdf;
pub mod pipeline;
pub mod preview;
pub mod raster;

pub use assets::{AssetSource, Delay, MemoryAssets, SettledAssets, settle_assets};
pub use error::{AssetError, ExportError, RenderCaptureError};
pub use pdf::{PageAssembler, PdfAssembler, page_size_pt};
pub use pipeline::{ExportedFile, capture_settled, export_pdf, export_png, export_with};
pub use preview::encode_png;
pub use raster::{Raster, capture, inline_assets};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExportConfig {
    /// Device pixels per document pixel.
    pub scale: f32,
    /// Upper bound on waiting for image assets before capture.
    pub settle_timeout: Duration,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            scale: OVERSAMPLE,
            settle_timeout: SETTLE_TIMEOUT,
        }
    }
}
