use png::{BitDepth, ColorType, Encoder};

use crate::raster::Raster;

/// Encode a capture as an RGBA8 PNG in memory.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, png::EncodingError> {
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, raster.width, raster.height);
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        let mut writer = enc.write_header()?;
        writer.write_image_data(&raster.rgba)?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_png_signature() {
        let r = Raster {
            width: 2,
            height: 2,
            rgba: vec![255; 16],
        };
        let bytes = encode_png(&r).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
