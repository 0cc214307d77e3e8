use serde::Serialize;

use crate::constants::{A4_LONG_MM, A4_SHORT_MM, DOC_PX_PER_MM, LOGO_HREF, SLOT_COUNT};
use crate::content::{self, Paragraph};
use crate::grid::{LabelGrid, Slot, SlotRect};
use crate::letters::{GenericLetter, LetterType, TutuLetter};

/// Everything a preview or export needs to draw one letter.
#[derive(Clone, Debug)]
pub enum LetterRequest {
    Tutu(TutuLetter),
    Generic(GenericLetter),
    Address(LabelGrid),
}

impl LetterRequest {
    pub fn letter_type(&self) -> LetterType {
        match self {
            LetterRequest::Tutu(_) => LetterType::Tutu,
            LetterRequest::Generic(_) => LetterType::Generic,
            LetterRequest::Address(_) => LetterType::Address,
        }
    }
}

/// A fully laid-out container, ready for capture.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedDocument {
    pub letter_type: LetterType,
    pub svg: String,
    pub width_mm: f64,
    pub height_mm: f64,
    /// Image assets referenced by `svg`, deduplicated, in document order.
    pub image_hrefs: Vec<String>,
}

impl RenderedDocument {
    pub fn width_px(&self) -> u32 {
        (self.width_mm * DOC_PX_PER_MM).ceil() as u32
    }

    pub fn height_px(&self) -> u32 {
        (self.height_mm * DOC_PX_PER_MM).ceil() as u32
    }
}

pub fn render(req: &LetterRequest) -> RenderedDocument {
    match req {
        LetterRequest::Tutu(l) => render_tutu(l),
        LetterRequest::Generic(l) => render_generic(l),
        LetterRequest::Address(g) => render_label_sheet(g),
    }
}

// Typography (mm).
const PAGE_PAD_MM: f64 = 8.5;
const BODY_FONT_MM: f64 = 4.2;
const LINE_GAP: f64 = 1.5;
const PARA_GAP_MM: f64 = 4.2;
const LETTER_LOGO_MM: f64 = 30.0;
const FOOTER_FONT_MM: f64 = 3.2;
const LABEL_LOGO_MM: f64 = 16.0;
const LABEL_FONT_MM: f64 = 4.8;
const LABEL_SMALL_MM: f64 = 3.7;

#[derive(Clone, Copy)]
enum Anchor {
    Start,
    Middle,
    End,
}

/// Minimal SVG writer working in sheet millimeters.
struct SvgDoc {
    body: String,
    hrefs: Vec<String>,
}

impl SvgDoc {
    fn new() -> Self {
        SvgDoc {
            body: String::new(),
            hrefs: Vec::new(),
        }
    }

    fn text(&mut self, x: f64, y: f64, size: f64, bold: bool, anchor: Anchor, txt: &str) {
        let anchor = match anchor {
            Anchor::Start => "",
            Anchor::Middle => " text-anchor=\"middle\"",
            Anchor::End => " text-anchor=\"end\"",
        };
        let weight = if bold { " font-weight=\"bold\"" } else { "" };
        self.body.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.2}\" fill=\"#111\"{}{}>{}</text>\n",
            px(x),
            px(y),
            px(size),
            weight,
            anchor,
            svg_escape(txt)
        ));
    }

    fn hline(&mut self, x0: f64, x1: f64, y: f64, width_mm: f64, color: &str) {
        self.body.push_str(&format!(
            "<path d=\"M {:.2} {:.2} L {:.2} {:.2}\" stroke=\"{}\" stroke-width=\"{:.2}\"/>\n",
            px(x0),
            px(y),
            px(x1),
            px(y),
            color,
            px(width_mm)
        ));
    }

    fn vline(&mut self, x: f64, y0: f64, y1: f64, color: &str) {
        self.body.push_str(&format!(
            "<path d=\"M {:.2} {:.2} L {:.2} {:.2}\" stroke=\"{}\" stroke-width=\"1\"/>\n",
            px(x),
            px(y0),
            px(x),
            px(y1),
            color
        ));
    }

    fn dashed_rect(&mut self, r: SlotRect) {
        self.body.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"none\" stroke=\"#9ca3af\" stroke-width=\"2\" stroke-dasharray=\"10 6\"/>\n",
            px(r.x),
            px(r.y),
            px(r.w),
            px(r.h)
        ));
    }

    fn image(&mut self, href: &str, x: f64, y: f64, w: f64, h: f64) {
        if !self.hrefs.iter().any(|h| h == href) {
            self.hrefs.push(href.to_string());
        }
        self.body.push_str(&format!(
            "<image xlink:href=\"{}\" x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" preserveAspectRatio=\"xMidYMid meet\"/>\n",
            svg_escape(href),
            px(x),
            px(y),
            px(w),
            px(h)
        ));
    }

    fn finish(self, letter_type: LetterType, width_mm: f64, height_mm: f64) -> RenderedDocument {
        let (w, h) = (px(width_mm).ceil(), px(height_mm).ceil());
        let mut s = String::new();
        s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        s.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n"
        ));
        s.push_str("<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");
        s.push_str(&self.body);
        s.push_str("</svg>\n");
        RenderedDocument {
            letter_type,
            svg: s,
            width_mm,
            height_mm,
            image_hrefs: self.hrefs,
        }
    }
}

fn px(mm: f64) -> f64 {
    mm * DOC_PX_PER_MM
}

/// Escape markup characters and drop those XML 1.0 does not allow at all
/// (C0 controls other than tab, newline and carriage return, plus U+FFFE
/// and U+FFFF).
fn svg_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c < ' ' || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => out.push(c),
        }
    }
    out
}

/// Rough advance width of one character in ems. Indic vowel signs and
/// viramas attach to the previous glyph and take little extra room.
fn char_em(c: char) -> f64 {
    match c {
        ' ' => 0.28,
        'i' | 'l' | 'j' | '.' | ',' | ':' | ';' | '!' | '\'' | '|' => 0.28,
        'M' | 'W' | 'm' | 'w' => 0.85,
        c if c.is_ascii_uppercase() || c.is_ascii_digit() => 0.62,
        c if c.is_ascii() => 0.52,
        '\u{0900}'..='\u{0903}'
        | '\u{093A}'..='\u{094F}'
        | '\u{0951}'..='\u{0957}'
        | '\u{0962}'..='\u{0963}'
        | '\u{0A81}'..='\u{0A83}'
        | '\u{0ABC}'
        | '\u{0ABE}'..='\u{0ACD}'
        | '\u{0AE2}'..='\u{0AE3}' => 0.1,
        _ => 0.6,
    }
}

pub(crate) fn text_width_mm(s: &str, font_mm: f64) -> f64 {
    s.chars().map(char_em).sum::<f64>() * font_mm
}

/// Greedy word wrap by estimated width. A single word wider than the line
/// is kept whole.
pub(crate) fn wrap(text: &str, max_mm: f64, font_mm: f64) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        if cur.is_empty() {
            cur.push_str(word);
            continue;
        }
        let candidate = format!("{cur} {word}");
        if text_width_mm(&candidate, font_mm) > max_mm {
            out.push(std::mem::take(&mut cur));
            cur.push_str(word);
        } else {
            cur = candidate;
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

/// One laid-out text line relative to the top of its block.
struct LaidLine {
    text: String,
    bold: bool,
    baseline: f64,
}

fn layout_paragraphs(paras: &[Paragraph], width_mm: f64, font_mm: f64) -> (Vec<LaidLine>, f64) {
    let line_h = font_mm * LINE_GAP;
    let mut y = 0.0;
    let mut lines = Vec::new();
    for (i, p) in paras.iter().enumerate() {
        if i > 0 {
            y += PARA_GAP_MM;
        }
        for hard in &p.lines {
            for text in wrap(hard, width_mm, font_mm) {
                y += line_h;
                lines.push(LaidLine {
                    text,
                    bold: p.bold,
                    baseline: y - (line_h - font_mm) / 2.0,
                });
            }
        }
    }
    (lines, y)
}

/// Portrait page with logo header, body blocks and company footer. The page
/// grows past A4 height when the body does not fit.
fn letter_page(doc: &mut SvgDoc, top: f64, blocks: &[(Vec<Paragraph>, f64)]) -> f64 {
    let width = A4_SHORT_MM;
    let inner = width - 2.0 * PAGE_PAD_MM;
    let logo_y = top + PAGE_PAD_MM;
    doc.image(
        LOGO_HREF,
        (width - LETTER_LOGO_MM) / 2.0,
        logo_y,
        LETTER_LOGO_MM,
        LETTER_LOGO_MM,
    );
    let rule_y = logo_y + LETTER_LOGO_MM + 6.0;
    doc.hline(PAGE_PAD_MM, width - PAGE_PAD_MM, rule_y, 0.5, "#000");

    let mut y = rule_y + 8.0;
    for (paras, gap_before) in blocks {
        y += gap_before;
        let (lines, h) = layout_paragraphs(paras, inner, BODY_FONT_MM);
        for l in lines {
            doc.text(PAGE_PAD_MM, y + l.baseline, BODY_FONT_MM, l.bold, Anchor::Start, &l.text);
        }
        y += h;
    }

    let footer_h = 8.0 + 2.0 * FOOTER_FONT_MM * LINE_GAP;
    let height = (y + footer_h + PAGE_PAD_MM - top).max(A4_LONG_MM);
    let footer_top = top + height - PAGE_PAD_MM - footer_h;
    doc.hline(PAGE_PAD_MM, width - PAGE_PAD_MM, footer_top, 0.25, "#d1d5db");
    let mut fy = footer_top + 4.0;
    for line in content::COMPANY_FOOTER {
        fy += FOOTER_FONT_MM * LINE_GAP;
        doc.text(width / 2.0, fy, FOOTER_FONT_MM, false, Anchor::Middle, line);
    }
    height
}

fn render_tutu(l: &TutuLetter) -> RenderedDocument {
    let mut doc = SvgDoc::new();
    let mut top = 0.0;
    top += letter_page(&mut doc, top, &[(content::tutu_english(&l.english_name), 0.0)]);
    top += letter_page(
        &mut doc,
        top,
        &[(content::tutu_local(l.language, &l.local_name), 0.0)],
    );
    top += letter_page(
        &mut doc,
        top,
        &[
            (content::gift_english(&l.english_name), 0.0),
            (content::gift_local(l.language, &l.local_name), 16.0),
        ],
    );
    doc.finish(LetterType::Tutu, A4_SHORT_MM, top)
}

fn render_generic(l: &GenericLetter) -> RenderedDocument {
    let mut doc = SvgDoc::new();
    let [en, hi, signoff] = content::generic(&l.customer_name);
    let height = letter_page(&mut doc, 0.0, &[(en, 4.0), (hi, 8.0), (signoff, 4.0)]);
    doc.finish(LetterType::Generic, A4_SHORT_MM, height)
}

fn render_label_sheet(grid: &LabelGrid) -> RenderedDocument {
    let mut doc = SvgDoc::new();
    for (index, slot) in grid.slots().iter().enumerate().take(SLOT_COUNT) {
        let Some(r) = LabelGrid::position_rect(index) else {
            continue;
        };
        // cell separators: right border on the left column, bottom border on the top row
        if index % 2 == 0 {
            doc.vline(r.x + r.w + 2.0, r.y, r.y + r.h, "#e5e7eb");
        }
        if index < 2 {
            doc.hline(r.x, r.x + r.w, r.y + r.h + 2.0, 0.25, "#e5e7eb");
        }
        label_block(&mut doc, r, slot);
    }
    doc.finish(LetterType::Address, A4_LONG_MM, A4_SHORT_MM)
}

fn label_block(doc: &mut SvgDoc, r: SlotRect, slot: &Slot) {
    let Some(addr) = &slot.address else {
        doc.dashed_rect(r);
        doc.text(
            r.x + r.w / 2.0,
            r.y + r.h / 2.0,
            LABEL_SMALL_MM,
            false,
            Anchor::Middle,
            content::EMPTY_SLOT_TEXT,
        );
        return;
    };
    let pad = 4.0;
    let (x0, x1) = (r.x + pad, r.x + r.w - pad);
    doc.image(
        LOGO_HREF,
        r.x + (r.w - LABEL_LOGO_MM) / 2.0,
        r.y + pad,
        LABEL_LOGO_MM,
        LABEL_LOGO_MM,
    );
    let rule_y = r.y + pad + LABEL_LOGO_MM + 3.0;
    doc.hline(x0, x1, rule_y, 0.5, "#000");

    let head_y = rule_y + 7.0;
    doc.text(x0, head_y, 4.2, false, Anchor::Start, "Ship To");
    doc.text(
        x1,
        head_y,
        4.2,
        false,
        Anchor::End,
        &format!("Tracking Number: {}", addr.tracking_id()),
    );

    let mut y = head_y + 3.0;
    for line in addr.label_lines() {
        y += LABEL_FONT_MM * 1.35;
        doc.text(x0, y, LABEL_FONT_MM, true, Anchor::Start, &line);
    }

    let step = LABEL_SMALL_MM * 1.25;
    let n = content::RETURN_ADDRESS.len() as f64 + 1.0;
    let mut ry = r.y + r.h - pad - step * (n - 1.0);
    doc.text(x1, ry, LABEL_SMALL_MM, true, Anchor::End, content::RETURN_ADDRESS_HEADING);
    for line in content::RETURN_ADDRESS {
        ry += step;
        doc.text(x1, ry, LABEL_SMALL_MM, false, Anchor::End, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AddressDraft;
    use crate::letters::Language;

    fn rec(t: &str) -> crate::address::AddressRecord {
        AddressDraft {
            name: "A & B".into(),
            house_number: "1".into(),
            address_line1: "Main St".into(),
            city: "X".into(),
            state: "Gujarat".into(),
            zip_code: "123456".into(),
            phone: "1234567890".into(),
            tracking_id: t.into(),
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn escaping_drops_characters_xml_cannot_hold() {
        assert_eq!(svg_escape("Meera\u{1}Shah"), "MeeraShah");
        assert_eq!(svg_escape("a<b> & \"c\"\u{FFFF}"), "a&lt;b&gt; &amp; &quot;c&quot;");
        assert_eq!(svg_escape("तुम्हारा\tok"), "तुम्हारा\tok");

        let draft = AddressDraft {
            name: "Meera\u{1}Shah".into(),
            house_number: "1".into(),
            address_line1: "Main\u{8} St".into(),
            city: "X".into(),
            state: "Gujarat".into(),
            zip_code: "123456".into(),
            phone: "1234567890".into(),
            tracking_id: "T\u{1b}9".into(),
            ..Default::default()
        };
        let grid = LabelGrid::from_records(&[draft.validate().unwrap()]);
        let doc = render(&LetterRequest::Address(grid));
        assert!(doc.svg.contains("MeeraShah"));
        assert!(doc.svg.contains("Tracking Number: T9"));
        assert!(!doc.svg.chars().any(|c| c < ' ' && !matches!(c, '\t' | '\n' | '\r')));
    }

    #[test]
    fn wrap_respects_width_and_keeps_words() {
        let lines = wrap("aaaa bbbb cccc dddd", 12.0, 4.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), "aaaa bbbb cccc dddd");
        assert_eq!(wrap("", 10.0, 4.0), Vec::<String>::new());
        assert_eq!(wrap("supercalifragilistic", 5.0, 4.0), vec!["supercalifragilistic"]);
    }

    #[test]
    fn label_sheet_is_landscape_with_placeholders() {
        let grid = LabelGrid::from_records(&[rec("T1"), rec("T2"), rec("T3")]);
        let doc = render(&LetterRequest::Address(grid));
        assert_eq!(doc.letter_type, LetterType::Address);
        assert_eq!((doc.width_mm, doc.height_mm), (297.0, 210.0));
        assert_eq!(doc.svg.matches("Tracking Number:").count(), 3);
        assert_eq!(doc.svg.matches(content::EMPTY_SLOT_TEXT).count(), 1);
        assert_eq!(doc.svg.matches("stroke-dasharray").count(), 1);
        assert!(doc.svg.contains("A &amp; B"));
        assert_eq!(doc.image_hrefs, vec![LOGO_HREF.to_string()]);
    }

    #[test]
    fn label_order_follows_slot_order() {
        let mut grid = LabelGrid::from_records(&[rec("T1"), rec("T2")]);
        grid.move_slot(0, Some(1));
        let svg = render(&LetterRequest::Address(grid)).svg;
        let a = svg.find("Tracking Number: T2").unwrap();
        let b = svg.find("Tracking Number: T1").unwrap();
        assert!(a < b);
    }

    #[test]
    fn tutu_letter_stacks_three_portrait_pages() {
        let doc = render(&LetterRequest::Tutu(TutuLetter {
            language: Language::Hindi,
            english_name: "Asha".into(),
            local_name: "आशा".into(),
        }));
        assert_eq!(doc.width_mm, 210.0);
        assert!(doc.height_mm >= 3.0 * 297.0);
        assert_eq!(doc.svg.matches("<image ").count(), 3);
        assert!(doc.svg.contains("Dear Asha,"));
        assert!(doc.svg.contains("आशा,"));
    }

    #[test]
    fn generic_letter_is_one_portrait_page() {
        let doc = render(&LetterRequest::Generic(GenericLetter {
            customer_name: "Ravi".into(),
        }));
        assert_eq!(doc.letter_type.orientation(), crate::letters::Orientation::Portrait);
        assert!(doc.height_mm >= 297.0);
        assert!(doc.svg.contains("Dear Ravi,"));
        assert_eq!(doc.width_px(), 840);
    }
}
