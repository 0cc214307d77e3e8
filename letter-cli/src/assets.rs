use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use letter_export::{AssetError, AssetSource, Delay};

/// Assets read from a directory, keyed by their path relative to it.
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirAssets { root: root.into() }
    }
}

impl AssetSource for DirAssets {
    async fn fetch(&self, href: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.root.join(href.trim_start_matches('/'));
        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => AssetError::NotFound {
                href: href.to_string(),
            },
            _ => AssetError::Fetch {
                href: href.to_string(),
                message: e.to_string(),
            },
        })
    }
}

pub struct TokioDelay;

impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}
