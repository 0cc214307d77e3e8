use std::cell::RefCell;
use std::rc::Rc;

use letter_core::{AddressDraft, LetterType, PreviewFlow, Session};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent};

mod assets;
mod constants;
mod forms;
mod preview;
mod state;
mod utils;

use constants::ADDRESS_FIELDS;
use state::{STATE, State};
use utils::{element, get_query_param, log, set_status};

fn init_canvas(
    document: &Document,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let cv = document
        .get_element_by_id("previewCanvas")
        .ok_or_else(|| JsValue::from_str("canvas #previewCanvas not found"))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = cv
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((cv, ctx))
}

/// Wire a click handler onto the element with `id`, if present.
fn on_click(
    state: &Rc<RefCell<State>>,
    id: &str,
    handler: impl Fn(&Rc<RefCell<State>>) + 'static,
) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();
    let Some(el) = element::<HtmlElement>(&doc, id) else {
        log(&format!("#{id} not found; handler not attached"));
        return Ok(());
    };
    let st = state.clone();
    let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || handler(&st)));
    el.set_onclick(Some(onclick.as_ref().unchecked_ref()));
    onclick.forget();
    Ok(())
}

fn submit_address(st: &Rc<RefCell<State>>) {
    let mut s = st.borrow_mut();
    let draft = forms::read_address(&s.document);
    match s.session.submit_address(draft) {
        Ok(count) => {
            forms::write_address(&s.document, &s.session.draft);
            forms::show_errors(&s.document, &ADDRESS_FIELDS, None);
            set_status(&s.document, &format!("Address added ({count} total)"));
        }
        Err(errs) => {
            forms::show_errors(&s.document, &ADDRESS_FIELDS, Some(&errs));
            set_status(&s.document, "Please fix the highlighted fields");
        }
    }
    preview::update_buttons(&s);
}

fn clear_addresses(st: &Rc<RefCell<State>>) {
    let mut s = st.borrow_mut();
    s.session.clear();
    forms::write_address(&s.document, &AddressDraft::default());
    forms::show_errors(&s.document, &ADDRESS_FIELDS, None);
    set_status(&s.document, "All addresses cleared");
    preview::update_buttons(&s);
}

fn select_letter(st: &Rc<RefCell<State>>, letter: LetterType) {
    let mut s = st.borrow_mut();
    s.letter_type = letter;
    forms::show_form(&s.document, letter);
    if let Some(sel) = element::<web_sys::HtmlSelectElement>(&s.document, "letterType") {
        sel.set_value(letter.as_str());
    }
    preview::update_buttons(&s);
}

fn attach_ui(state: Rc<RefCell<State>>) -> Result<(), JsValue> {
    let doc = state.borrow().document.clone();

    if let Some(sel) = element::<web_sys::HtmlSelectElement>(&doc, "letterType") {
        let st = state.clone();
        let sel2 = sel.clone();
        let onchange = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            if let Some(letter) = LetterType::parse(&sel2.value()) {
                select_letter(&st, letter);
            }
        }));
        sel.set_onchange(Some(onchange.as_ref().unchecked_ref()));
        onchange.forget();
    }

    on_click(&state, "addAddress", submit_address)?;
    on_click(&state, "clearAddresses", clear_addresses)?;
    on_click(&state, "previewBtn", preview::open_preview)?;
    on_click(&state, "closePreview", preview::close)?;
    on_click(&state, "printBtn", preview::print)?;
    on_click(&state, "downloadBtn", preview::start_export)?;

    // Slot drag-and-drop on the preview canvas. Move and release are tracked
    // on the window so a drop outside the sheet still ends the drag.
    {
        let st = state.clone();
        let mousedown = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            preview::drag_start(&st, &e);
        }));
        state
            .borrow()
            .canvas
            .add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())?;
        mousedown.forget();
    }
    {
        let st = state.clone();
        let mousemove = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            preview::drag_move(&st, &e);
        }));
        state
            .borrow()
            .window
            .add_event_listener_with_callback("mousemove", mousemove.as_ref().unchecked_ref())?;
        mousemove.forget();
    }
    {
        let st = state.clone();
        let mouseup = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |e: MouseEvent| {
            preview::drag_end(&st, &e);
        }));
        state
            .borrow()
            .window
            .add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())?;
        mouseup.forget();
    }
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;
    let (canvas, ctx) = init_canvas(&document)?;
    forms::populate_selects(&document);

    // ?type=ADDRESS preselects a template
    let initial = window
        .location()
        .search()
        .ok()
        .and_then(|search| get_query_param(&search, "type"))
        .and_then(|t| LetterType::parse(&t))
        .unwrap_or(LetterType::Address);

    let state = Rc::new(RefCell::new(State {
        window,
        document,
        canvas,
        ctx,
        session: Session::new(),
        letter_type: initial,
        flow: PreviewFlow::new(),
        grid: None,
        doc: None,
        preview: None,
        generation: 0,
        drag_from: None,
        drag_over: None,
    }));
    STATE.with(|st| st.replace(Some(state.clone())));

    attach_ui(state.clone())?;
    select_letter(&state, initial);
    utils::set_hidden(&state.borrow().document, "previewDialog", true);
    log("letter front end ready");
    Ok(())
}

/// Number of addresses collected this session. Exposed for the host page.
#[wasm_bindgen]
pub fn address_count() -> usize {
    STATE.with(|st| {
        st.borrow()
            .as_ref()
            .map(|s| s.borrow().session.count())
            .unwrap_or(0)
    })
}
