//! Font faces bundled at build time. A face that could not be fetched is
//! present as an empty slice and should be skipped.

pub const NOTO_SANS_REGULAR: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/NotoSans-Regular.ttf"));
pub const NOTO_SANS_BOLD: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/NotoSans-Bold.ttf"));
pub const NOTO_DEVANAGARI_REGULAR: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/NotoSansDevanagari-Regular.ttf"));
pub const NOTO_DEVANAGARI_BOLD: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/NotoSansDevanagari-Bold.ttf"));
pub const NOTO_GUJARATI_REGULAR: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/NotoSansGujarati-Regular.ttf"));
pub const NOTO_GUJARATI_BOLD: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/NotoSansGujarati-Bold.ttf"));

/// Family used as the document's `sans-serif`.
pub const SANS_FAMILY: &str = "Noto Sans";

/// Every non-empty face, Latin first so it wins for ASCII text.
pub fn faces() -> impl Iterator<Item = &'static [u8]> {
    [
        NOTO_SANS_REGULAR,
        NOTO_SANS_BOLD,
        NOTO_DEVANAGARI_REGULAR,
        NOTO_DEVANAGARI_BOLD,
        NOTO_GUJARATI_REGULAR,
        NOTO_GUJARATI_BOLD,
    ]
    .into_iter()
    .filter(|f| !f.is_empty())
}

/// True when at least the Latin face is available.
pub fn bundled() -> bool {
    !NOTO_SANS_REGULAR.is_empty()
}
