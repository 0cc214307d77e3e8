use std::fmt;

use serde::{Deserialize, Serialize};

use crate::address::required;
use crate::constants::{A4_LONG_MM, A4_SHORT_MM};
use crate::error::{ValidationErrors, ValidationKind};

/// Which template the operator picked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LetterType {
    Tutu,
    Generic,
    Address,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// A4 page size (width, height) in mm for this orientation.
    pub fn page_mm(self) -> (f64, f64) {
        match self {
            Orientation::Portrait => (A4_SHORT_MM, A4_LONG_MM),
            Orientation::Landscape => (A4_LONG_MM, A4_SHORT_MM),
        }
    }
}

impl LetterType {
    pub const ALL: [LetterType; 3] = [LetterType::Tutu, LetterType::Generic, LetterType::Address];

    pub fn as_str(self) -> &'static str {
        match self {
            LetterType::Tutu => "TUTU",
            LetterType::Generic => "GENERIC",
            LetterType::Address => "ADDRESS",
        }
    }

    pub fn parse(s: &str) -> Option<LetterType> {
        LetterType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Address sheets print landscape; every letter prints portrait.
    pub fn orientation(self) -> Orientation {
        match self {
            LetterType::Address => Orientation::Landscape,
            LetterType::Tutu | LetterType::Generic => Orientation::Portrait,
        }
    }

    pub fn file_name(self) -> String {
        format!("{}-letter.pdf", self.as_str().to_lowercase())
    }

    /// Title shown in the selector.
    pub fn title(self) -> &'static str {
        match self {
            LetterType::Tutu => "TUTU Letter",
            LetterType::Generic => "Generic Letter",
            LetterType::Address => "Address Letter",
        }
    }
}

impl fmt::Display for LetterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Second language of a TUTU letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Hindi,
    Gujarati,
    Marathi,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Hindi, Language::Gujarati, Language::Marathi];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::Hindi => "hindi",
            Language::Gujarati => "gujarati",
            Language::Marathi => "marathi",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Language::Hindi => "Hindi",
            Language::Gujarati => "Gujarati",
            Language::Marathi => "Marathi",
        }
    }

    pub fn parse(s: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

/// Raw TUTU form input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TutuDraft {
    pub language: String,
    pub english_name: String,
    pub local_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutuLetter {
    pub language: Language,
    pub english_name: String,
    pub local_name: String,
}

impl TutuDraft {
    pub fn validate(&self) -> Result<TutuLetter, ValidationErrors> {
        let mut errs = ValidationErrors::default();
        let language = if self.language.trim().is_empty() {
            errs.push("language", ValidationKind::Required);
            None
        } else {
            let l = Language::parse(&self.language);
            if l.is_none() {
                errs.push("language", ValidationKind::UnknownOption);
            }
            l
        };
        let english_name = required(&mut errs, "englishName", &self.english_name);
        let local_name = required(&mut errs, "localName", &self.local_name);
        match language {
            Some(language) if errs.is_empty() => Ok(TutuLetter {
                language,
                english_name,
                local_name,
            }),
            _ => Err(errs),
        }
    }
}

/// Raw GENERIC form input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenericDraft {
    pub customer_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericLetter {
    pub customer_name: String,
}

impl GenericDraft {
    pub fn validate(&self) -> Result<GenericLetter, ValidationErrors> {
        let mut errs = ValidationErrors::default();
        let customer_name = required(&mut errs, "customerName", &self.customer_name);
        errs.into_result(|| GenericLetter { customer_name })
    }
}
