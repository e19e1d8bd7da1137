use std::io::Cursor;

use crate::foundation::error::{CardError, CardResult};
use crate::render::backend::FrameRGBA;

/// Straight-alpha copy of a frame's pixel data.
pub fn unpremultiplied_rgba8(frame: &FrameRGBA) -> Vec<u8> {
    let mut out = frame.data.clone();
    if !frame.premultiplied {
        return out;
    }
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

/// Encode a frame as PNG bytes.
pub fn encode_png(frame: &FrameRGBA) -> CardResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(CardError::encode(format!(
            "frame data length {} does not match {}x{} RGBA8",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let img = image::RgbaImage::from_raw(frame.width, frame.height, unpremultiplied_rgba8(frame))
        .ok_or_else(|| CardError::encode("failed to wrap frame pixels"))?;
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| CardError::encode(format!("png encode failed: {e}")))?;
    Ok(buf.into_inner())
}
