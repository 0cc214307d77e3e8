/// Oversampling for the on-screen preview. Print and PDF export use the full factor.
pub const PREVIEW_SCALE: f32 = 0.75;

/// Address form inputs, in tab order. Ids match the draft's wire names.
pub const ADDRESS_FIELDS: [&str; 9] = [
    "name",
    "houseNumber",
    "addressLine1",
    "addressLine2",
    "city",
    "state",
    "zipCode",
    "phone",
    "trackingId",
];
pub const TUTU_FIELDS: [&str; 3] = ["language", "englishName", "localName"];
pub const GENERIC_FIELDS: [&str; 1] = ["customerName"];

/// Highlight drawn around the slot under the pointer while dragging.
pub const DRAG_OUTLINE: &str = "#db2777";
