use serde::Serialize;
use thiserror::Error;

/// Why a single form field was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    Required,
    Length { expected: usize },
    NotDigits,
    UnknownOption,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {}", self.message())]
pub struct ValidationError {
    pub field: &'static str,
    pub kind: ValidationKind,
}

impl ValidationError {
    pub fn new(field: &'static str, kind: ValidationKind) -> Self {
        ValidationError { field, kind }
    }

    /// Message shown inline next to the field.
    pub fn message(&self) -> String {
        message_for(self.kind, self.field)
    }
}

fn message_for(kind: ValidationKind, field: &str) -> String {
    match kind {
        ValidationKind::Required => format!("{} is required", human_field(field)),
        ValidationKind::Length { expected } => {
            format!("{} must be exactly {} digits", human_field(field), expected)
        }
        ValidationKind::NotDigits => format!("{} must contain digits only", human_field(field)),
        ValidationKind::UnknownOption => format!("Select a valid {}", human_field(field)),
    }
}

fn human_field(field: &str) -> &str {
    match field {
        "name" => "Name",
        "houseNumber" => "House number",
        "addressLine1" => "Address line 1",
        "city" => "City",
        "state" => "State",
        "zipCode" => "Zip code",
        "phone" => "Phone number",
        "trackingId" => "Tracking ID",
        "language" => "Language",
        "englishName" => "Name",
        "localName" => "Name in selected language",
        "customerName" => "Customer name",
        other => other,
    }
}

/// Every failing field of one submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Error)]
#[error("{}", joined_messages(&self.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, kind: ValidationKind) {
        self.0.push(ValidationError::new(field, kind));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub(crate) fn into_result<T>(self, ok: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.0.is_empty() { Ok(ok()) } else { Err(self) }
    }
}

fn joined_messages(errs: &[ValidationError]) -> String {
    errs.iter()
        .map(ValidationError::message)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Rejected preview/export transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("preview is closed")]
    Closed,
    #[error("preview is still rendering")]
    NotReady,
    #[error("an export is already in flight")]
    ExportInFlight,
    #[error("no addresses to preview")]
    Empty,
}
