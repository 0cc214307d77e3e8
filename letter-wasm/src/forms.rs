use letter_core::{
    AddressDraft, GenericDraft, LetterType, Language, REGIONS, TutuDraft, ValidationErrors,
};
use web_sys::{Document, HtmlInputElement, HtmlSelectElement};

use crate::constants::{ADDRESS_FIELDS, GENERIC_FIELDS, TUTU_FIELDS};
use crate::utils::{element, set_hidden};

/// Current value of an input or select, empty when the element is missing.
fn value(doc: &Document, id: &str) -> String {
    if let Some(input) = element::<HtmlInputElement>(doc, id) {
        return input.value();
    }
    element::<HtmlSelectElement>(doc, id)
        .map(|s| s.value())
        .unwrap_or_default()
}

fn set_value(doc: &Document, id: &str, v: &str) {
    if let Some(input) = element::<HtmlInputElement>(doc, id) {
        input.set_value(v);
    } else if let Some(sel) = element::<HtmlSelectElement>(doc, id) {
        sel.set_value(v);
    }
}

pub fn read_address(doc: &Document) -> AddressDraft {
    AddressDraft {
        name: value(doc, "name"),
        house_number: value(doc, "houseNumber"),
        address_line1: value(doc, "addressLine1"),
        address_line2: value(doc, "addressLine2"),
        city: value(doc, "city"),
        state: value(doc, "state"),
        zip_code: value(doc, "zipCode"),
        phone: value(doc, "phone"),
        tracking_id: value(doc, "trackingId"),
    }
}

pub fn write_address(doc: &Document, draft: &AddressDraft) {
    set_value(doc, "name", &draft.name);
    set_value(doc, "houseNumber", &draft.house_number);
    set_value(doc, "addressLine1", &draft.address_line1);
    set_value(doc, "addressLine2", &draft.address_line2);
    set_value(doc, "city", &draft.city);
    set_value(doc, "state", &draft.state);
    set_value(doc, "zipCode", &draft.zip_code);
    set_value(doc, "phone", &draft.phone);
    set_value(doc, "trackingId", &draft.tracking_id);
}

pub fn read_tutu(doc: &Document) -> TutuDraft {
    TutuDraft {
        language: value(doc, "language"),
        english_name: value(doc, "englishName"),
        local_name: value(doc, "localName"),
    }
}

pub fn read_generic(doc: &Document) -> GenericDraft {
    GenericDraft {
        customer_name: value(doc, "customerName"),
    }
}

/// Write each field's message into `#err-<field>`, clearing the rest.
pub fn show_errors(doc: &Document, fields: &[&str], errs: Option<&ValidationErrors>) {
    for field in fields {
        let Some(el) = doc.get_element_by_id(&format!("err-{field}")) else {
            continue;
        };
        let msg = errs.and_then(|e| e.get(field)).map(|e| e.message());
        el.set_text_content(msg.as_deref());
    }
}

pub fn fields_for(letter: LetterType) -> &'static [&'static str] {
    match letter {
        LetterType::Tutu => &TUTU_FIELDS,
        LetterType::Generic => &GENERIC_FIELDS,
        LetterType::Address => &ADDRESS_FIELDS,
    }
}

/// Show only the form that belongs to `letter`.
pub fn show_form(doc: &Document, letter: LetterType) {
    for t in LetterType::ALL {
        set_hidden(doc, &format!("form-{}", t.as_str()), t != letter);
    }
}

fn fill_select<'a>(doc: &Document, id: &str, options: impl IntoIterator<Item = (&'a str, &'a str)>) {
    let Some(sel) = doc.get_element_by_id(id) else {
        return;
    };
    sel.set_inner_html("");
    for (value, label) in options {
        if let Ok(opt) = doc.create_element("option") {
            let _ = opt.set_attribute("value", value);
            opt.set_text_content(Some(label));
            let _ = sel.append_child(&opt);
        }
    }
}

/// Populate the fixed option lists.
pub fn populate_selects(doc: &Document) {
    fill_select(
        doc,
        "letterType",
        LetterType::ALL.iter().map(|t| (t.as_str(), t.title())),
    );
    fill_select(
        doc,
        "language",
        std::iter::once(("", "Select language"))
            .chain(Language::ALL.iter().map(|l| (l.as_str(), l.title()))),
    );
    fill_select(
        doc,
        "state",
        std::iter::once(("", "Select state")).chain(REGIONS.iter().map(|r| (*r, *r))),
    );
}
