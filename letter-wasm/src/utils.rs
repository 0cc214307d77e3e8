use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, Document, HtmlCanvasElement, HtmlElement, MouseEvent, Url};

/// Log a message to the browser console.
pub fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

/// Show a message to the operator in `#status` and mirror it to the console.
pub fn set_status(document: &Document, msg: &str) {
    log(msg);
    if let Some(el) = document.get_element_by_id("status") {
        el.set_text_content(Some(msg));
    }
}

pub fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn set_hidden(document: &Document, id: &str, hidden: bool) {
    if let Some(el) = element::<HtmlElement>(document, id) {
        el.set_hidden(hidden);
    }
}

pub fn set_disabled(document: &Document, id: &str, disabled: bool) {
    if let Some(btn) = element::<web_sys::HtmlButtonElement>(document, id) {
        btn.set_disabled(disabled);
    }
}

/// Build an absolute URL for an asset, taking into account the optional
/// `window.__BASE_URL` which is set by the host page.
pub fn asset_url(path: &str) -> String {
    let p = path.trim();
    if p.starts_with("http://") || p.starts_with("https://") || p.starts_with("data:") {
        return p.to_string();
    }
    let base = web_sys::window()
        .and_then(|w| {
            let v = js_sys::Reflect::get(&w, &JsValue::from_str("__BASE_URL")).ok()?;
            v.as_string()
        })
        .unwrap_or_else(|| "/".to_string());
    let base = if base.ends_with('/') { base } else { format!("{base}/") };
    format!("{}{}", base, p.trim_start_matches('/'))
}

/// Canvas backing-store coordinates of a mouse event, correct even when CSS
/// scales the canvas element.
pub fn event_canvas_coords(e: &MouseEvent, cv: &HtmlCanvasElement) -> (f64, f64) {
    let rect = cv.get_bounding_client_rect();
    let x = (e.client_x() as f64 - rect.left()) * (cv.width() as f64) / rect.width().max(1.0);
    let y = (e.client_y() as f64 - rect.top()) * (cv.height() as f64) / rect.height().max(1.0);
    (x, y)
}

/// Hand `bytes` to the browser as a file download.
pub fn download_bytes(
    document: &Document,
    bytes: &[u8],
    mime: &str,
    file_name: &str,
) -> Result<(), JsValue> {
    let parts = Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let opts = BlobPropertyBag::new();
    opts.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    let a = document.create_element("a")?.dyn_into::<HtmlElement>()?;
    a.set_attribute("href", &url)?;
    a.set_attribute("download", file_name)?;
    a.click();
    Url::revoke_object_url(&url)?;
    Ok(())
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    percent_encoding::percent_decode_str(s)
        .decode_utf8()
        .unwrap_or_else(|_| s.into())
        .to_string()
}
