use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use futures::StreamExt;
use futures::stream::FuturesUnordered;

use crate::error::AssetError;

/// Where image assets referenced by a rendered document come from.
pub trait AssetSource {
    fn fetch(&self, href: &str) -> impl Future<Output = Result<Vec<u8>, AssetError>>;
}

/// Timer used to bound how long capture waits for assets.
pub trait Delay {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// In-memory asset table.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssets {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, href: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.files.insert(href.to_string(), bytes.into());
        self
    }
}

impl AssetSource for MemoryAssets {
    async fn fetch(&self, href: &str) -> Result<Vec<u8>, AssetError> {
        self.files
            .get(href)
            .cloned()
            .ok_or_else(|| AssetError::NotFound {
                href: href.to_string(),
            })
    }
}

/// Outcome of waiting on a document's assets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SettledAssets {
    pub loaded: HashMap<String, Vec<u8>>,
    pub failed: Vec<String>,
    pub timed_out: Vec<String>,
}

impl SettledAssets {
    pub fn get(&self, href: &str) -> Option<&[u8]> {
        self.loaded.get(href).map(Vec::as_slice)
    }

    /// True when every asset either loaded or failed before the deadline.
    pub fn complete(&self) -> bool {
        self.timed_out.is_empty()
    }
}

/// Fetch every asset concurrently and return once all of them have loaded or
/// failed, or `timeout` has elapsed, whichever comes first. Assets still
/// pending at the deadline are reported in `timed_out`.
pub async fn settle_assets<S, D>(hrefs: &[String], source: &S, delay: &D, timeout: Duration) -> SettledAssets
where
    S: AssetSource,
    D: Delay,
{
    let mut unique: Vec<&str> = Vec::new();
    for h in hrefs {
        if !unique.contains(&h.as_str()) {
            unique.push(h.as_str());
        }
    }

    let mut out = SettledAssets::default();
    if unique.is_empty() {
        return out;
    }

    let pending: FuturesUnordered<_> = unique
        .iter()
        .map(|&href| async move { (href, source.fetch(href).await) })
        .collect();
    let mut stream = std::pin::pin!(pending.take_until(delay.sleep(timeout)));
    while let Some((href, res)) = stream.next().await {
        match res {
            Ok(bytes) => {
                out.loaded.insert(href.to_string(), bytes);
            }
            Err(e) => {
                tracing::warn!(error = %e, "asset failed to load; capturing without it");
                out.failed.push(href.to_string());
            }
        }
    }

    for href in unique {
        if !out.loaded.contains_key(href) && !out.failed.iter().any(|f| f == href) {
            out.timed_out.push(href.to_string());
        }
    }
    if !out.timed_out.is_empty() {
        tracing::warn!(
            timed_out = ?out.timed_out,
            timeout_ms = timeout.as_millis() as u64,
            "assets still pending at the settle deadline"
        );
    }
    tracing::debug!(
        loaded = out.loaded.len(),
        failed = out.failed.len(),
        timed_out = out.timed_out.len(),
        "assets settled"
    );
    out
}
