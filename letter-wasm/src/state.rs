use std::cell::RefCell;
use std::rc::Rc;

use letter_core::{LabelGrid, LetterType, PreviewFlow, RenderedDocument, Session};
use letter_export::Raster;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

/// Page-lifetime state shared by every callback.
pub struct State {
    pub window: Window,
    pub document: Document,
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub session: Session,
    pub letter_type: LetterType,
    pub flow: PreviewFlow,
    /// Working copy of the label sheet for the open preview.
    pub grid: Option<LabelGrid>,
    pub doc: Option<RenderedDocument>,
    pub preview: Option<Raster>,
    /// Bumped on every re-render so a stale capture is not drawn.
    pub generation: u64,
    pub drag_from: Option<usize>,
    pub drag_over: Option<usize>,
}

thread_local! {
    pub static STATE: RefCell<Option<Rc<RefCell<State>>>> = const { RefCell::new(None) };
}
