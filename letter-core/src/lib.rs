//! Shipping-letter domain: address entry and validation, the per-session
//! address collection, the 2 x 2 label sheet with slot reordering, preview
//! state, and SVG layout of every letter template.

pub mod address;
pub mod collection;
pub mod constants;
pub mod content;
pub mod error;
pub mod flow;
pub mod grid;
pub mod letters;
pub mod render;

pub use address::{AddressDraft, AddressRecord, Region, REGIONS};
pub use collection::{AddressCollection, Session};
pub use error::{FlowError, ValidationError, ValidationErrors, ValidationKind};
pub use flow::{ExportOutcome, PreviewFlow, PreviewPhase};
pub use grid::{move_item, LabelGrid, Slot, SlotRect};
pub use letters::{GenericDraft, GenericLetter, Language, LetterType, Orientation, TutuDraft, TutuLetter};
pub use render::{render, LetterRequest, RenderedDocument};
