//! Application-wide constants.
//! Values are expressed in millimeters unless noted otherwise.

use std::time::Duration;

/// A4 short edge (mm).
pub const A4_SHORT_MM: f64 = 210.0;
/// A4 long edge (mm).
pub const A4_LONG_MM: f64 = 297.0;
/// Document pixels per millimeter before oversampling.
pub const DOC_PX_PER_MM: f64 = 4.0;
/// Oversampling factor applied when capturing a document for print.
pub const OVERSAMPLE: f32 = 3.0;

/// Number of positions on a label sheet (2 rows x 2 columns).
pub const SLOT_COUNT: usize = 4;
pub const GRID_COLUMNS: usize = 2;
/// Outer padding of the label sheet (mm).
pub const SHEET_PAD_MM: f64 = 8.0;
/// Gap between label positions (mm).
pub const SLOT_GAP_MM: f64 = 4.0;

/// Exact digit count of an accepted zip code.
pub const ZIP_LEN: usize = 6;
/// Exact digit count of an accepted phone number.
pub const PHONE_LEN: usize = 10;

/// Upper bound on waiting for image assets before capture.
pub const SETTLE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Logo asset referenced by every template, relative to the asset root.
pub const LOGO_HREF: &str = "logo.svg";
