use thiserror::Error;

/// One asset could not be fetched. Capture still proceeds without it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("asset {href} not found")]
    NotFound { href: String },
    #[error("asset {href}: {message}")]
    Fetch { href: String, message: String },
}

impl AssetError {
    pub fn href(&self) -> &str {
        match self {
            AssetError::NotFound { href } | AssetError::Fetch { href, .. } => href,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderCaptureError {
    #[error("SVG parse error: {0}")]
    Parse(#[from] usvg::Error),
    #[error("pixmap allocation failed for {width}x{height}")]
    Pixmap { width: u32, height: u32 },
    #[error("container has zero size")]
    Empty,
    #[error("invalid capture scale {0}")]
    Scale(f32),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Capture(#[from] RenderCaptureError),
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}
