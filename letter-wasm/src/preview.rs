use std::cell::RefCell;
use std::rc::Rc;

use letter_core::{ExportOutcome, LabelGrid, LetterRequest, LetterType, render};
use letter_export::{ExportConfig, Raster, capture_settled, export_pdf};
use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData, MouseEvent};

use crate::assets::{FetchAssets, TimeoutDelay};
use crate::constants::{DRAG_OUTLINE, PREVIEW_SCALE};
use crate::forms;
use crate::state::State;
use crate::utils::{
    download_bytes, element, event_canvas_coords, log, set_disabled, set_hidden, set_status,
};

/// Enable or disable every button whose availability depends on state.
pub fn update_buttons(s: &State) {
    let doc = &s.document;
    let ready = s.flow.can_export();
    set_disabled(doc, "downloadBtn", !ready);
    set_disabled(doc, "printBtn", !ready);
    let has_addresses = s.session.can_preview();
    set_disabled(
        doc,
        "previewBtn",
        s.letter_type == LetterType::Address && !has_addresses,
    );
    set_disabled(doc, "clearAddresses", !s.session.can_clear());
    if let Some(el) = doc.get_element_by_id("addressCount") {
        el.set_text_content(Some(&s.session.count().to_string()));
    }
}

fn build_request(s: &mut State) -> Option<LetterRequest> {
    let fields = forms::fields_for(s.letter_type);
    match s.letter_type {
        LetterType::Address => match s.session.open_preview() {
            Ok(grid) => {
                s.grid = Some(grid.clone());
                Some(LetterRequest::Address(grid))
            }
            Err(e) => {
                set_status(&s.document, &format!("Cannot preview: {e}"));
                None
            }
        },
        LetterType::Tutu => match forms::read_tutu(&s.document).validate() {
            Ok(letter) => {
                forms::show_errors(&s.document, fields, None);
                Some(LetterRequest::Tutu(letter))
            }
            Err(errs) => {
                forms::show_errors(&s.document, fields, Some(&errs));
                None
            }
        },
        LetterType::Generic => match forms::read_generic(&s.document).validate() {
            Ok(letter) => {
                forms::show_errors(&s.document, fields, None);
                Some(LetterRequest::Generic(letter))
            }
            Err(errs) => {
                forms::show_errors(&s.document, fields, Some(&errs));
                None
            }
        },
    }
}

pub fn open_preview(st: &Rc<RefCell<State>>) {
    let request = {
        let mut s = st.borrow_mut();
        if s.flow.is_open() {
            return;
        }
        let Some(request) = build_request(&mut s) else {
            return;
        };
        s.flow.open();
        set_hidden(&s.document, "previewDialog", false);
        update_buttons(&s);
        set_status(&s.document, "Rendering preview...");
        request
    };
    rerender(st, request);
}

/// Lay out `request` again and capture it for the canvas in the background.
fn rerender(st: &Rc<RefCell<State>>, request: LetterRequest) {
    let (doc, generation, window) = {
        let mut s = st.borrow_mut();
        let doc = render(&request);
        s.doc = Some(doc.clone());
        s.generation += 1;
        (doc, s.generation, s.window.clone())
    };
    let st = st.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let config = ExportConfig {
            scale: PREVIEW_SCALE,
            ..ExportConfig::default()
        };
        let source = FetchAssets {
            window: window.clone(),
        };
        let delay = TimeoutDelay { window };
        let captured = capture_settled(Some(&doc), &source, &delay, &config).await;

        let mut s = st.borrow_mut();
        if s.generation != generation || !s.flow.is_open() {
            return;
        }
        match captured {
            Ok(Some(raster)) => {
                s.preview = Some(raster);
                draw(&s);
                if s.flow.rendered().is_ok() {
                    set_status(&s.document, "Preview ready");
                }
            }
            Ok(None) => {}
            Err(e) => set_status(&s.document, &format!("Preview failed: {e}")),
        }
        update_buttons(&s);
    });
}

fn set_stroke_style(ctx: &web_sys::CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(color),
    );
}

/// Paint the captured preview, plus the drop target outline while dragging.
pub fn draw(s: &State) {
    let Some(raster) = &s.preview else {
        return;
    };
    if s.canvas.width() != raster.width {
        s.canvas.set_width(raster.width);
    }
    if s.canvas.height() != raster.height {
        s.canvas.set_height(raster.height);
    }
    match ImageData::new_with_u8_clamped_array_and_sh(Clamped(&raster.rgba[..]), raster.width, raster.height) {
        Ok(img) => {
            if let Err(e) = s.ctx.put_image_data(&img, 0.0, 0.0) {
                set_status(&s.document, &format!("Cannot draw preview: {e:?}"));
            }
        }
        Err(e) => set_status(&s.document, &format!("Cannot draw preview: {e:?}")),
    }

    let (Some(over), Some(doc)) = (s.drag_over, &s.doc) else {
        return;
    };
    let Some(r) = LabelGrid::position_rect(over) else {
        return;
    };
    let k = raster.width as f64 / doc.width_mm;
    set_stroke_style(&s.ctx, DRAG_OUTLINE);
    s.ctx.set_line_width(4.0);
    s.ctx.stroke_rect(r.x * k, r.y * k, r.w * k, r.h * k);
}

/// Label-sheet position under the pointer, if any.
fn slot_under(s: &State, e: &MouseEvent) -> Option<usize> {
    let doc = s.doc.as_ref()?;
    let (x, y) = event_canvas_coords(e, &s.canvas);
    let k = doc.width_mm / s.canvas.width().max(1) as f64;
    LabelGrid::position_at(x * k, y * k)
}

pub fn drag_start(st: &Rc<RefCell<State>>, e: &MouseEvent) {
    let mut s = st.borrow_mut();
    if s.grid.is_none() || !s.flow.can_export() {
        return;
    }
    let from = slot_under(&s, e);
    s.drag_from = from;
    s.drag_over = from;
    draw(&s);
}

pub fn drag_move(st: &Rc<RefCell<State>>, e: &MouseEvent) {
    let mut s = st.borrow_mut();
    if s.drag_from.is_none() {
        return;
    }
    let over = slot_under(&s, e);
    if over != s.drag_over {
        s.drag_over = over;
        draw(&s);
    }
}

/// Finish a drag. A release outside every slot leaves the sheet unchanged.
pub fn drag_end(st: &Rc<RefCell<State>>, e: &MouseEvent) {
    let request = {
        let mut s = st.borrow_mut();
        let Some(from) = s.drag_from.take() else {
            return;
        };
        s.drag_over = None;
        let dest = slot_under(&s, e);
        let moved = s.grid.as_mut().map(|g| g.move_slot(from, dest)).unwrap_or(false);
        if !moved {
            draw(&s);
            return;
        }
        s.grid.clone().map(LetterRequest::Address)
    };
    if let Some(request) = request {
        rerender(st, request);
    }
}

/// Paint a full-resolution capture into `#printCanvas`, the only element
/// the print stylesheet shows.
fn paint_print_canvas(document: &Document, raster: &Raster) -> Result<(), JsValue> {
    let canvas = element::<HtmlCanvasElement>(document, "printCanvas")
        .ok_or_else(|| JsValue::from_str("canvas #printCanvas not found"))?;
    canvas.set_width(raster.width);
    canvas.set_height(raster.height);
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    let img = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(&raster.rgba[..]),
        raster.width,
        raster.height,
    )?;
    ctx.put_image_data(&img, 0.0, 0.0)
}

/// Capture the current document at the export factor, then open the
/// browser's print dialog on it.
pub fn print(st: &Rc<RefCell<State>>) {
    let (doc, window) = {
        let s = st.borrow();
        if let Err(e) = s.flow.print() {
            set_status(&s.document, &e.to_string());
            return;
        }
        let Some(doc) = s.doc.clone() else {
            return;
        };
        set_status(&s.document, "Preparing print...");
        (doc, s.window.clone())
    };
    let st = st.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let source = FetchAssets {
            window: window.clone(),
        };
        let delay = TimeoutDelay { window };
        let captured = capture_settled(Some(&doc), &source, &delay, &ExportConfig::default()).await;

        let s = st.borrow();
        if !s.flow.is_open() || s.doc.as_ref() != Some(&doc) {
            log("print capture is out of date; discarded");
            return;
        }
        match captured {
            Ok(Some(raster)) => {
                if let Err(e) = paint_print_canvas(&s.document, &raster) {
                    set_status(&s.document, &format!("Print failed: {e:?}"));
                    return;
                }
                set_status(&s.document, "Preview ready");
                if let Err(e) = s.window.print() {
                    set_status(&s.document, &format!("Print failed: {e:?}"));
                }
            }
            Ok(None) => {}
            Err(e) => set_status(&s.document, &format!("Print failed: {e}")),
        }
    });
}

pub fn start_export(st: &Rc<RefCell<State>>) {
    let (doc, window, export_id) = {
        let mut s = st.borrow_mut();
        let Some(doc) = s.doc.clone() else {
            return;
        };
        let export_id = match s.flow.begin_export() {
            Ok(id) => id,
            Err(e) => {
                set_status(&s.document, &e.to_string());
                return;
            }
        };
        update_buttons(&s);
        set_status(&s.document, "Preparing PDF...");
        (doc, s.window.clone(), export_id)
    };
    let st = st.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let source = FetchAssets {
            window: window.clone(),
        };
        let delay = TimeoutDelay { window };
        let result = export_pdf(Some(&doc), &source, &delay, &ExportConfig::default()).await;

        let mut s = st.borrow_mut();
        if !s.flow.is_current_export(export_id) {
            log("export finished after its preview closed; discarded");
            return;
        }
        let outcome = match result {
            Ok(Some(file)) => {
                match download_bytes(&s.document, &file.bytes, "application/pdf", &file.file_name) {
                    Ok(()) => ExportOutcome::Done,
                    Err(e) => ExportOutcome::Failed(format!("{e:?}")),
                }
            }
            Ok(None) => ExportOutcome::Failed("nothing was rendered".into()),
            Err(e) => ExportOutcome::Failed(e.to_string()),
        };
        let msg = match &outcome {
            ExportOutcome::Done => format!("Saved {}", doc.letter_type.file_name()),
            ExportOutcome::Failed(e) => format!("PDF export failed: {e}"),
        };
        s.flow.finish_export(export_id, outcome);
        set_status(&s.document, &msg);
        update_buttons(&s);
    });
}

pub fn close(st: &Rc<RefCell<State>>) {
    let mut s = st.borrow_mut();
    s.flow.close();
    s.grid = None;
    s.doc = None;
    s.preview = None;
    s.drag_from = None;
    s.drag_over = None;
    set_hidden(&s.document, "previewDialog", true);
    update_buttons(&s);
}
