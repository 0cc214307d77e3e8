use std::time::Duration;

use letter_export::{AssetError, AssetSource, Delay};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

use crate::utils::asset_url;

/// Assets fetched over HTTP relative to the page's base URL.
pub struct FetchAssets {
    pub window: Window,
}

impl AssetSource for FetchAssets {
    async fn fetch(&self, href: &str) -> Result<Vec<u8>, AssetError> {
        let url = asset_url(href);
        let fail = |message: String| AssetError::Fetch {
            href: href.to_string(),
            message,
        };
        let resp = JsFuture::from(self.window.fetch_with_str(&url))
            .await
            .map_err(|e| fail(format!("{e:?}")))?;
        let resp: Response = resp.dyn_into().map_err(|_| fail("not a Response".into()))?;
        if resp.status() == 404 {
            return Err(AssetError::NotFound {
                href: href.to_string(),
            });
        }
        if !resp.ok() {
            return Err(fail(format!("HTTP {}", resp.status())));
        }
        let buf = resp.array_buffer().map_err(|e| fail(format!("{e:?}")))?;
        let buf = JsFuture::from(buf).await.map_err(|e| fail(format!("{e:?}")))?;
        Ok(js_sys::Uint8Array::new(&buf).to_vec())
    }
}

/// `setTimeout` wrapped as a future.
pub struct TimeoutDelay {
    pub window: Window,
}

impl Delay for TimeoutDelay {
    async fn sleep(&self, duration: Duration) {
        let ms = duration.as_millis().min(i32::MAX as u128) as i32;
        let window = self.window.clone();
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        });
        let _ = JsFuture::from(promise).await;
    }
}
