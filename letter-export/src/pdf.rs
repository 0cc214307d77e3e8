use letter_core::Orientation;
use pdf_writer::{Content, Name, Pdf, Rect, Ref};

use crate::raster::Raster;

const PT_PER_MM: f32 = 72.0 / 25.4;

/// Turns one captured bitmap into the bytes of a downloadable document.
pub trait PageAssembler {
    fn assemble(&self, raster: &Raster, orientation: Orientation) -> Vec<u8>;
}

/// A4 page size in points for `orientation`.
pub fn page_size_pt(orientation: Orientation) -> (f32, f32) {
    let (w, h) = orientation.page_mm();
    (w as f32 * PT_PER_MM, h as f32 * PT_PER_MM)
}

/// Single-page A4 PDF with the bitmap stretched over the whole page. The
/// image stream is stored uncompressed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PdfAssembler;

impl PageAssembler for PdfAssembler {
    fn assemble(&self, raster: &Raster, orientation: Orientation) -> Vec<u8> {
        let (w_pt, h_pt) = page_size_pt(orientation);

        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let image_id = Ref::new(4);
        let content_id = Ref::new(5);
        let image_name = Name(b"Im1");

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, w_pt, h_pt));
        page.parent(page_tree_id);
        page.contents(content_id);
        page.resources().x_objects().pair(image_name, image_id);
        drop(page);

        let rgb = raster.rgb();
        let mut image = pdf.image_xobject(image_id, &rgb);
        image.width(raster.width as i32);
        image.height(raster.height as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        drop(image);

        let mut content = Content::new();
        content.save_state();
        content.transform([w_pt, 0.0, 0.0, h_pt, 0.0, 0.0]);
        content.x_object(image_name);
        content.restore_state();
        pdf.stream(content_id, &content.finish());

        tracing::debug!(
            ?orientation,
            width = raster.width,
            height = raster.height,
            "pdf assembled"
        );
        pdf.finish()
    }
}
