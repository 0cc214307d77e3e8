use anyhow::{Context, Result, bail};
use letter_core::{
    AddressDraft, GenericDraft, LetterRequest, LetterType, Session, TutuDraft, ValidationErrors,
};
use serde::Deserialize;

/// On-disk form of one operator session: the chosen template and what was
/// typed into its form(s).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionFile {
    pub letter_type: Option<LetterType>,
    pub addresses: Vec<AddressDraft>,
    pub tutu: Option<TutuDraft>,
    pub generic: Option<GenericDraft>,
}

fn report(errs: &ValidationErrors) -> String {
    errs.iter()
        .map(|e| format!("  {}: {}", e.field, e.message()))
        .collect::<Vec<_>>()
        .join("\n")
}

impl SessionFile {
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("session file is not valid JSON")
    }

    /// Validate the relevant form(s) and build the letter to render.
    /// `moves` only apply to address sheets.
    pub fn into_request(self, moves: &[(usize, usize)]) -> Result<LetterRequest> {
        let Some(letter_type) = self.letter_type else {
            bail!("session file has no letterType (expected TUTU, GENERIC or ADDRESS)");
        };
        match letter_type {
            LetterType::Tutu => {
                let draft = self.tutu.context("letterType is TUTU but no `tutu` form was given")?;
                let letter = draft
                    .validate()
                    .map_err(|e| anyhow::anyhow!("TUTU form is invalid:\n{}", report(&e)))?;
                Ok(LetterRequest::Tutu(letter))
            }
            LetterType::Generic => {
                let draft = self
                    .generic
                    .context("letterType is GENERIC but no `generic` form was given")?;
                let letter = draft
                    .validate()
                    .map_err(|e| anyhow::anyhow!("GENERIC form is invalid:\n{}", report(&e)))?;
                Ok(LetterRequest::Generic(letter))
            }
            LetterType::Address => {
                let mut session = Session::new();
                for (i, draft) in self.addresses.into_iter().enumerate() {
                    session
                        .submit_address(draft)
                        .map_err(|e| anyhow::anyhow!("address #{} is invalid:\n{}", i + 1, report(&e)))?;
                }
                if session.count() > letter_core::constants::SLOT_COUNT {
                    tracing::warn!(
                        count = session.count(),
                        "only the first four addresses fit on the sheet"
                    );
                }
                let mut grid = session
                    .open_preview()
                    .context("an address sheet needs at least one address")?;
                for &(from, to) in moves {
                    if !grid.move_slot(from, Some(to)) && from != to {
                        bail!("slot move {from}:{to} is out of range (positions are 0-3)");
                    }
                }
                Ok(LetterRequest::Address(grid))
            }
        }
    }
}
