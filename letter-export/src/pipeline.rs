use letter_core::RenderedDocument;

use crate::ExportConfig;
use crate::assets::{AssetSource, Delay, settle_assets};
use crate::error::ExportError;
use crate::pdf::{PageAssembler, PdfAssembler};
use crate::preview::encode_png;
use crate::raster::{Raster, capture};

/// Bytes ready to be saved under `file_name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Wait for the document's assets, then rasterize it.
pub async fn capture_settled<S, D>(
    doc: Option<&RenderedDocument>,
    source: &S,
    delay: &D,
    config: &ExportConfig,
) -> Result<Option<Raster>, ExportError>
where
    S: AssetSource,
    D: Delay,
{
    let Some(doc) = doc else {
        return Ok(capture(None, &Default::default(), config.scale)?);
    };
    let assets = settle_assets(&doc.image_hrefs, source, delay, config.settle_timeout).await;
    Ok(capture(Some(doc), &assets, config.scale)?)
}

/// Capture `doc` and hand the bitmap to `assembler` once.
pub async fn export_with<A, S, D>(
    assembler: &A,
    doc: Option<&RenderedDocument>,
    source: &S,
    delay: &D,
    config: &ExportConfig,
) -> Result<Option<ExportedFile>, ExportError>
where
    A: PageAssembler,
    S: AssetSource,
    D: Delay,
{
    let Some(doc) = doc else {
        tracing::debug!("export requested before the document was rendered");
        return Ok(None);
    };
    let Some(raster) = capture_settled(Some(doc), source, delay, config).await? else {
        return Ok(None);
    };
    let letter = doc.letter_type;
    let bytes = assembler.assemble(&raster, letter.orientation());
    tracing::info!(file = %letter.file_name(), bytes = bytes.len(), "export ready");
    Ok(Some(ExportedFile {
        file_name: letter.file_name(),
        bytes,
    }))
}

/// Single-page A4 PDF of `doc`, oriented by letter type.
pub async fn export_pdf<S, D>(
    doc: Option<&RenderedDocument>,
    source: &S,
    delay: &D,
    config: &ExportConfig,
) -> Result<Option<ExportedFile>, ExportError>
where
    S: AssetSource,
    D: Delay,
{
    export_with(&PdfAssembler, doc, source, delay, config).await
}

/// PNG of the captured raster, named after the PDF it stands in for.
pub async fn export_png<S, D>(
    doc: Option<&RenderedDocument>,
    source: &S,
    delay: &D,
    config: &ExportConfig,
) -> Result<Option<ExportedFile>, ExportError>
where
    S: AssetSource,
    D: Delay,
{
    let Some(doc) = doc else {
        return Ok(None);
    };
    let Some(raster) = capture_settled(Some(doc), source, delay, config).await? else {
        return Ok(None);
    };
    let file_name = doc.letter_type.file_name().replace(".pdf", ".png");
    Ok(Some(ExportedFile {
        file_name,
        bytes: encode_png(&raster)?,
    }))
}
