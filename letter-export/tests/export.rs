use std::cell::RefCell;
use std::future::Future;
use std::time::Duration;

use futures::executor::block_on;
use futures::future;
use letter_core::{
    AddressDraft, GenericLetter, Language, LetterRequest, LetterType, Orientation,
    RenderedDocument, Session, TutuLetter, render,
};
use letter_export::{
    AssetError, AssetSource, Delay, ExportConfig, ExportError, MemoryAssets, PageAssembler,
    PdfAssembler, Raster, RenderCaptureError, export_pdf, export_png, export_with,
};

const LOGO: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><circle cx="5" cy="5" r="5" fill="#e11d48"/></svg>"##;

struct Never;
impl Delay for Never {
    fn sleep(&self, _: Duration) -> impl Future<Output = ()> {
        future::pending()
    }
}

struct Instant;
impl Delay for Instant {
    fn sleep(&self, _: Duration) -> impl Future<Output = ()> {
        future::ready(())
    }
}

/// Every fetch hangs forever.
struct Hanging;
impl AssetSource for Hanging {
    async fn fetch(&self, _: &str) -> Result<Vec<u8>, AssetError> {
        future::pending().await
    }
}

#[derive(Default)]
struct Recording {
    calls: RefCell<Vec<(Orientation, u32, u32)>>,
}

impl PageAssembler for Recording {
    fn assemble(&self, raster: &Raster, orientation: Orientation) -> Vec<u8> {
        self.calls
            .borrow_mut()
            .push((orientation, raster.width, raster.height));
        b"page".to_vec()
    }
}

fn config() -> ExportConfig {
    ExportConfig {
        scale: 0.25,
        settle_timeout: Duration::from_millis(50),
    }
}

fn assets() -> MemoryAssets {
    MemoryAssets::new().with("logo.svg", LOGO)
}

fn draft(tracking: &str) -> AddressDraft {
    AddressDraft {
        name: "Meera Shah".into(),
        house_number: "12".into(),
        address_line1: "Lake Road".into(),
        city: "Ahmedabad".into(),
        state: "gujarat".into(),
        zip_code: "380001".into(),
        phone: "9876543210".into(),
        tracking_id: tracking.into(),
        ..Default::default()
    }
}

#[test]
fn three_addresses_export_as_one_landscape_page() {
    let mut session = Session::new();
    for t in ["TRK1", "TRK2", "TRK3"] {
        session.submit_address(draft(t)).unwrap();
    }
    let grid = session.open_preview().unwrap();
    let filled: Vec<_> = grid
        .slots()
        .iter()
        .map(|s| s.address.as_ref().map(|a| a.tracking_id().to_string()))
        .collect();
    assert_eq!(
        filled,
        [Some("TRK1".into()), Some("TRK2".into()), Some("TRK3".into()), None]
    );

    let doc = render(&LetterRequest::Address(grid));
    let rec = Recording::default();
    let file = block_on(export_with(&rec, Some(&doc), &assets(), &Never, &config()))
        .unwrap()
        .unwrap();

    assert_eq!(file.file_name, "address-letter.pdf");
    assert_eq!(file.bytes, b"page");
    let calls = rec.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (orientation, w, h) = calls[0];
    assert_eq!(orientation, Orientation::Landscape);
    assert!(w > h);
}

#[test]
fn letters_export_portrait() {
    let doc = render(&LetterRequest::Generic(GenericLetter {
        customer_name: "Ravi".into(),
    }));
    let rec = Recording::default();
    let file = block_on(export_with(&rec, Some(&doc), &assets(), &Never, &config()))
        .unwrap()
        .unwrap();
    assert_eq!(file.file_name, "generic-letter.pdf");
    assert_eq!(rec.calls.borrow()[0].0, Orientation::Portrait);
}

#[test]
fn tutu_letter_exports_portrait() {
    let doc = render(&LetterRequest::Tutu(TutuLetter {
        language: Language::Gujarati,
        english_name: "Asha".into(),
        local_name: "આશા".into(),
    }));
    let rec = Recording::default();
    let file = block_on(export_with(&rec, Some(&doc), &assets(), &Never, &config()))
        .unwrap()
        .unwrap();
    assert_eq!(file.file_name, "tutu-letter.pdf");
    let calls = rec.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (orientation, w, h) = calls[0];
    assert_eq!(orientation, Orientation::Portrait);
    assert!(h > w);
}

#[test]
fn failed_capture_never_reaches_the_assembler() {
    let doc = render(&LetterRequest::Generic(GenericLetter {
        customer_name: "Ravi".into(),
    }));
    let rec = Recording::default();

    let bad_scale = ExportConfig {
        scale: 0.0,
        ..config()
    };
    let err = block_on(export_with(&rec, Some(&doc), &assets(), &Never, &bad_scale)).unwrap_err();
    assert!(matches!(
        err,
        ExportError::Capture(RenderCaptureError::Scale(_))
    ));

    let broken = RenderedDocument {
        svg: "<svg".into(),
        ..doc
    };
    let err = block_on(export_with(&rec, Some(&broken), &assets(), &Never, &config())).unwrap_err();
    assert!(matches!(
        err,
        ExportError::Capture(RenderCaptureError::Parse(_))
    ));

    assert!(rec.calls.borrow().is_empty());
}

#[test]
fn control_characters_in_an_address_still_export() {
    let mut session = Session::new();
    let mut d = draft("TRK\u{1}7");
    d.name = "Meera\u{1}Shah".into();
    session.submit_address(d).unwrap();
    let doc = render(&LetterRequest::Address(session.open_preview().unwrap()));
    let pdf = block_on(export_pdf(Some(&doc), &assets(), &Never, &config()))
        .unwrap()
        .unwrap();
    assert!(pdf.bytes.starts_with(b"%PDF-"));
}

#[test]
fn export_before_render_does_nothing() {
    let rec = Recording::default();
    let out = block_on(export_with(&rec, None, &assets(), &Never, &config())).unwrap();
    assert!(out.is_none());
    assert!(rec.calls.borrow().is_empty());
}

#[test]
fn stalled_assets_do_not_block_export() {
    let doc = render(&LetterRequest::Generic(GenericLetter {
        customer_name: "Ravi".into(),
    }));
    let file = block_on(export_pdf(Some(&doc), &Hanging, &Instant, &config()))
        .unwrap()
        .unwrap();
    assert!(file.bytes.starts_with(b"%PDF-"));
}

#[test]
fn real_pdf_and_png_outputs() {
    let mut session = Session::new();
    session.submit_address(draft("TRK9")).unwrap();
    let doc = render(&LetterRequest::Address(session.open_preview().unwrap()));
    assert_eq!(doc.letter_type, LetterType::Address);

    let pdf = block_on(export_pdf(Some(&doc), &assets(), &Never, &config()))
        .unwrap()
        .unwrap();
    assert!(pdf.bytes.starts_with(b"%PDF-"));
    let direct = PdfAssembler.assemble(
        &Raster {
            width: 1,
            height: 1,
            rgba: vec![0, 0, 0, 255],
        },
        Orientation::Landscape,
    );
    assert!(direct.starts_with(b"%PDF-"));

    let png = block_on(export_png(Some(&doc), &assets(), &Never, &config()))
        .unwrap()
        .unwrap();
    assert_eq!(png.file_name, "address-letter.png");
    assert!(png.bytes.starts_with(b"\x89PNG"));
}
