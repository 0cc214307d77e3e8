use std::sync::{Arc, OnceLock};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use letter_core::RenderedDocument;

use crate::assets::SettledAssets;
use crate::error::RenderCaptureError;

/// Straight-alpha RGBA8 bitmap of a captured document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Raster {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.rgba.get(i..i + 4).and_then(|p| p.try_into().ok())
    }

    /// Packed RGB8, alpha dropped. The document background is opaque white.
    pub fn rgb(&self) -> Vec<u8> {
        self.rgba
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect()
    }
}

fn font_db() -> Arc<usvg::fontdb::Database> {
    static DB: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = usvg::fontdb::Database::new();
        for face in fonts::faces() {
            db.load_font_data(face.to_vec());
        }
        if fonts::bundled() {
            db.set_sans_serif_family(fonts::SANS_FAMILY);
        } else {
            tracing::warn!("bundled fonts missing; falling back to system fonts");
            db.load_system_fonts();
        }
        Arc::new(db)
    })
    .clone()
}

fn mime_for(href: &str) -> &'static str {
    let lower = href.to_ascii_lowercase();
    if lower.ends_with(".svg") {
        "image/svg+xml"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else {
        "image/png"
    }
}

/// Replace every asset reference with an inline data URI. References that did
/// not settle are blanked so the image is skipped instead of resolved from
/// the working directory.
pub fn inline_assets(doc: &RenderedDocument, assets: &SettledAssets) -> String {
    let mut svg = doc.svg.clone();
    for href in &doc.image_hrefs {
        let attr = format!("xlink:href=\"{href}\"");
        let replacement = match assets.get(href) {
            Some(bytes) => format!(
                "xlink:href=\"data:{};base64,{}\"",
                mime_for(href),
                STANDARD.encode(bytes)
            ),
            None => "xlink:href=\"\"".to_string(),
        };
        svg = svg.replace(&attr, &replacement);
    }
    svg
}

/// Rasterize `doc` at `scale` device pixels per document pixel.
///
/// Returns `Ok(None)` when there is no rendered document yet; a capture
/// request that races ahead of rendering is not an error.
pub fn capture(
    doc: Option<&RenderedDocument>,
    assets: &SettledAssets,
    scale: f32,
) -> Result<Option<Raster>, RenderCaptureError> {
    let Some(doc) = doc else {
        tracing::debug!("capture requested before the document was rendered");
        return Ok(None);
    };
    if !scale.is_finite() || scale <= 0.0 {
        return Err(RenderCaptureError::Scale(scale));
    }

    let svg = inline_assets(doc, assets);
    let opt = usvg::Options {
        fontdb: font_db(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opt)?;

    let size = tree.size();
    let w_px = (size.width() * scale).ceil() as u32;
    let h_px = (size.height() * scale).ceil() as u32;
    if w_px == 0 || h_px == 0 {
        return Err(RenderCaptureError::Empty);
    }
    let mut pixmap = tiny_skia::Pixmap::new(w_px, h_px).ok_or(RenderCaptureError::Pixmap {
        width: w_px,
        height: h_px,
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    let rgba = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    tracing::debug!(
        letter = %doc.letter_type,
        width = w_px,
        height = h_px,
        "document captured"
    );
    Ok(Some(Raster {
        width: w_px,
        height: h_px,
        rgba,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use letter_core::LetterType;

    const RED_DOT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="#ff0000"/></svg>"##;

    fn doc_with_image() -> RenderedDocument {
        RenderedDocument {
            letter_type: LetterType::Generic,
            svg: concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="40" height="20" viewBox="0 0 40 20">"#,
                r#"<image xlink:href="dot.svg" x="0" y="0" width="20" height="20"/>"#,
                "</svg>"
            )
            .to_string(),
            width_mm: 10.0,
            height_mm: 5.0,
            image_hrefs: vec!["dot.svg".to_string()],
        }
    }

    fn settled(with_dot: bool) -> SettledAssets {
        let mut s = SettledAssets::default();
        if with_dot {
            s.loaded.insert("dot.svg".into(), RED_DOT.as_bytes().to_vec());
        } else {
            s.failed.push("dot.svg".into());
        }
        s
    }

    #[test]
    fn missing_document_is_a_no_op() {
        assert!(capture(None, &SettledAssets::default(), 3.0).unwrap().is_none());
    }

    #[test]
    fn oversampling_multiplies_dimensions() {
        let r = capture(Some(&doc_with_image()), &settled(true), 3.0)
            .unwrap()
            .unwrap();
        assert_eq!((r.width, r.height), (120, 60));
        assert_eq!(r.rgba.len(), 120 * 60 * 4);
        assert_eq!(r.rgb().len(), 120 * 60 * 3);
    }

    #[test]
    fn settled_image_is_drawn_and_missing_one_is_skipped() {
        let doc = doc_with_image();
        let with = capture(Some(&doc), &settled(true), 1.0).unwrap().unwrap();
        assert_eq!(with.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(with.pixel(30, 10), Some([255, 255, 255, 255]));

        let without = capture(Some(&doc), &settled(false), 1.0).unwrap().unwrap();
        assert_eq!(without.pixel(10, 10), Some([255, 255, 255, 255]));
    }

    #[test]
    fn bad_scale_and_bad_svg_are_errors() {
        let doc = doc_with_image();
        assert!(matches!(
            capture(Some(&doc), &settled(true), 0.0),
            Err(RenderCaptureError::Scale(_))
        ));
        let broken = RenderedDocument {
            svg: "<svg".into(),
            ..doc
        };
        assert!(matches!(
            capture(Some(&broken), &settled(true), 1.0),
            Err(RenderCaptureError::Parse(_))
        ));
    }

    #[test]
    fn inlining_uses_data_uris() {
        let svg = inline_assets(&doc_with_image(), &settled(true));
        assert!(svg.contains("xlink:href=\"data:image/svg+xml;base64,"));
        assert!(!svg.contains("dot.svg"));
    }
}
