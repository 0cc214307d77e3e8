//! Static template text. Paragraphs are separated by blank lines, a single
//! newline inside a paragraph is a hard line break, a leading `# ` marks a
//! bold heading, and `{name}` is replaced by the addressee.

use crate::letters::Language;

/// One block of letter text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paragraph {
    pub lines: Vec<String>,
    pub bold: bool,
}

pub const COMPANY_FOOTER: [&str; 2] = [
    "Com. Add: B-602, Kadamb Greens, Zundal, Gandhi Nagar, Ahmedabad, Gujarat, India",
    "+91 977-301-3115 / +91-972-244-1030 keshivsbabycorp@gmail.com",
];

pub const RETURN_ADDRESS_HEADING: &str = "If Undelivered, Please return to";
pub const RETURN_ADDRESS: [&str; 5] = [
    "Baby Corp,",
    "614, Ganesh Glory, Jagatpur",
    "Road, Gota,",
    "Ahmedabad - 382481, Gujarat",
    "Phone: 9722441030",
];

pub const EMPTY_SLOT_TEXT: &str = "Drag address here";

const TUTU_EN: &str = include_str!("../content/tutu_en.txt");
const TUTU_HINDI: &str = include_str!("../content/tutu_hindi.txt");
const TUTU_GUJARATI: &str = include_str!("../content/tutu_gujarati.txt");
const TUTU_MARATHI: &str = include_str!("../content/tutu_marathi.txt");
const GIFT_EN: &str = include_str!("../content/gift_en.txt");
const GIFT_HINDI: &str = include_str!("../content/gift_hindi.txt");
const GIFT_GUJARATI: &str = include_str!("../content/gift_gujarati.txt");
const GIFT_MARATHI: &str = include_str!("../content/gift_marathi.txt");
const GENERIC_EN: &str = include_str!("../content/generic_en.txt");
const GENERIC_HINDI: &str = include_str!("../content/generic_hindi.txt");
const GENERIC_SIGNOFF: &str = include_str!("../content/generic_signoff.txt");

pub fn tutu_english(name: &str) -> Vec<Paragraph> {
    parse(TUTU_EN, name)
}

pub fn tutu_local(lang: Language, name: &str) -> Vec<Paragraph> {
    let src = match lang {
        Language::Hindi => TUTU_HINDI,
        Language::Gujarati => TUTU_GUJARATI,
        Language::Marathi => TUTU_MARATHI,
    };
    parse(src, name)
}

pub fn gift_english(name: &str) -> Vec<Paragraph> {
    parse(GIFT_EN, name)
}

pub fn gift_local(lang: Language, name: &str) -> Vec<Paragraph> {
    let src = match lang {
        Language::Hindi => GIFT_HINDI,
        Language::Gujarati => GIFT_GUJARATI,
        Language::Marathi => GIFT_MARATHI,
    };
    parse(src, name)
}

/// English body, Hindi block, sign-off.
pub fn generic(name: &str) -> [Vec<Paragraph>; 3] {
    [
        parse(GENERIC_EN, name),
        parse(GENERIC_HINDI, name),
        parse(GENERIC_SIGNOFF, name),
    ]
}

fn parse(src: &str, name: &str) -> Vec<Paragraph> {
    src.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            let (bold, body) = match block.strip_prefix("# ") {
                Some(rest) => (true, rest),
                None => (false, block),
            };
            Paragraph {
                lines: body.lines().map(|l| l.replace("{name}", name)).collect(),
                bold,
            }
        })
        .collect()
}
