use std::path::Path;

use anyhow::Context;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Canvas, Size};
use crate::foundation::error::{ScrubError, ScrubResult};
use crate::foundation::math::{mul_div255_u8, unpremultiply_rgba8_in_place};
use crate::render::fit::CoverFit;

/// Default clear color of an opaque surface.
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// CPU drawing surface holding premultiplied RGBA8 pixels.
///
/// Content persists between draws; only [`Surface::resize`] (to a different size) and
/// [`Surface::clear`] discard it.
#[derive(Clone, Debug)]
pub struct Surface {
    canvas: Canvas,
    clear_rgba: [u8; 4],
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a surface cleared to `clear_rgba` (premultiplied).
    pub fn new(canvas: Canvas, clear_rgba: [u8; 4]) -> Self {
        let mut s = Self {
            canvas,
            clear_rgba,
            data: vec![0; canvas.pixel_count() * 4],
        };
        s.clear();
        s
    }

    /// Current pixel dimensions.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Raw premultiplied pixels.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4;
        let p = &self.data[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Reset every pixel to the clear color.
    pub fn clear(&mut self) {
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&self.clear_rgba);
        }
    }

    /// Change pixel dimensions. Returns `true` if the size changed, in which case the content
    /// is cleared; the buffer is reused when possible.
    pub fn resize(&mut self, canvas: Canvas) -> bool {
        if canvas == self.canvas {
            return false;
        }
        self.canvas = canvas;
        self.data.resize(canvas.pixel_count() * 4, 0);
        self.clear();
        true
    }

    /// Draw `image` with cover-fit placement, composited over the clear color.
    ///
    /// Sampling is bilinear in premultiplied space. Returns the placement used.
    pub fn draw_cover(&mut self, image: &PreparedImage) -> ScrubResult<CoverFit> {
        let fit = CoverFit::compute(
            Size::new(f64::from(image.width), f64::from(image.height)),
            self.canvas.size(),
        )
        .ok_or_else(|| ScrubError::validation("cannot cover-fit an empty image or surface"))?;

        let width = self.canvas.width as usize;
        let bg = self.clear_rgba;
        for (y, row) in self.data.chunks_exact_mut(width * 4).enumerate() {
            let cy = y as f64 + 0.5;
            for (x, px) in row.chunks_exact_mut(4).enumerate() {
                let (ix, iy) = fit.to_image(x as f64 + 0.5, cy);
                let s = sample_bilinear(image, ix - 0.5, iy - 0.5);
                let inv = 255u16 - u16::from(s[3]);
                for c in 0..4 {
                    px[c] = s[c].saturating_add(mul_div255_u8(u16::from(bg[c]), inv));
                }
            }
        }
        Ok(fit)
    }

    /// Copy out the pixels in straight (non-premultiplied) alpha.
    pub fn to_frame(&self) -> FrameRGBA {
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data,
            premultiplied: false,
        }
    }

    /// Write the surface as a PNG file, creating parent directories.
    pub fn save_png(&self, path: &Path) -> ScrubResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let frame = self.to_frame();
        image::save_buffer_with_format(
            path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Bilinear sample at continuous pixel-center coordinates, clamped to the edges.
fn sample_bilinear(image: &PreparedImage, x: f64, y: f64) -> [u8; 4] {
    let max_x = f64::from(image.width - 1);
    let max_y = f64::from(image.height - 1);
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);
    let fx = x - f64::from(x0);
    let fy = y - f64::from(y0);

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = f64::from(p00[c]) * (1.0 - fx) + f64::from(p10[c]) * fx;
        let bottom = f64::from(p01[c]) * (1.0 - fx) + f64::from(p11[c]) * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
