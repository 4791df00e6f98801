use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb888,
    prelude::Point,
    text::{Baseline, Text},
    Drawable as _,
};
use fontdue::Font as FontData;
use unicode_segmentation::UnicodeSegmentation;

use super::{Drawable, PixelSurface};
use crate::geometry::{Coord, Position};
use crate::graphics::{Color, Font, MonoSize};

/// Minimum glyph coverage for a pixel to be written; there is no anti-aliasing
pub const COVERAGE_THRESHOLD: u8 = 128;

/// Places a string on the surface.
///
/// The canvas resolves the active color and font and hands them over unchanged;
/// the renderer decides which pixels that means.
pub trait TextRenderer: Send {
    /// `origin` is the left end of the baseline of the first line
    fn render(
        &self,
        surface: &mut PixelSurface,
        text: &str,
        origin: Position,
        color: Color,
        font: &Font,
    );
}

/// Default renderer: `embedded-graphics` for the built-in mono faces, `fontdue` for typefaces
#[derive(Clone, Copy, Debug, Default)]
pub struct GlyphRasterizer;

impl TextRenderer for GlyphRasterizer {
    fn render(
        &self,
        surface: &mut PixelSurface,
        text: &str,
        origin: Position,
        color: Color,
        font: &Font,
    ) {
        if text.is_empty() {
            return;
        }
        match font {
            Font::Mono(size) => render_mono(surface, text, origin, color, *size),
            Font::Face { typeface, size } => {
                if !size.is_finite() || *size <= 0.0 {
                    log::warn!("skipping text with unusable font size {size}");
                    return;
                }
                let line_height = font.line_height() as Coord;
                render_face(surface, text, origin, color, typeface.data(), *size, line_height)
            }
        }
    }
}

/// Lays mono text out one cell at a time, so pen positions far off the surface are
/// never handed to `embedded-graphics`; cells that miss the surface are skipped.
fn render_mono(
    surface: &mut PixelSurface,
    text: &str,
    origin: Position,
    color: Color,
    size: MonoSize,
) {
    let face = size.face();
    let style = MonoTextStyle::new(face, Rgb888::new(color.red, color.green, color.blue));
    let cell_width = face.character_size.width as i64;
    let cell_height = face.character_size.height as i64;
    let pitch = cell_width + face.character_spacing as i64;
    let (surface_width, surface_height) = (surface.width() as i64, surface.height() as i64);

    let mut encoded = [0; 4];
    for (row, line) in text.split('\n').enumerate() {
        let baseline = origin.y as i64 + row as i64 * cell_height;
        let top = baseline - face.baseline as i64;
        if top >= surface_height || top + cell_height <= 0 {
            continue;
        }
        for (column, character) in line.chars().enumerate() {
            let left = origin.x as i64 + column as i64 * pitch;
            if left >= surface_width {
                break;
            }
            if left + cell_width <= 0 {
                continue;
            }
            let (Ok(x), Ok(y)) = (Coord::try_from(left), Coord::try_from(baseline)) else {
                continue;
            };
            // Infallible target
            let _ = Text::with_baseline(
                character.encode_utf8(&mut encoded),
                Point::new(x, y),
                style,
                Baseline::Alphabetic,
            )
            .draw(surface);
        }
    }
}

fn render_face(
    surface: &mut PixelSurface,
    text: &str,
    origin: Position,
    color: Color,
    font: &FontData,
    size: f32,
    line_height: Coord,
) {
    let mut baseline = origin.y;
    for line in text.split('\n') {
        let mut cursor = origin.x;
        // Combining marks share the pen position of their base character
        for cluster in line.graphemes(true) {
            let mut advance = 0;
            for (i, character) in cluster.chars().enumerate() {
                let raster = Raster::rasterize(font, size, character);
                raster.draw_at(surface, Position::new(cursor, baseline), color);
                if i == 0 {
                    advance = raster.advance;
                }
            }
            cursor = cursor.saturating_add(advance);
        }
        baseline = baseline.saturating_add(line_height);
    }
}

/// Output of rasterization, for a given font and size.
///
/// Offsets are relative to the pen position on the baseline, with `fontdue`'s
/// subpixel metrics already converted to integer pixels.
#[derive(Clone)]
struct Raster {
    bitmap: Vec<u8>,
    bitmap_width: usize,

    /// From the pen to the left edge of the bitmap
    left: Coord,
    /// From the baseline up to the top row of the bitmap
    top: Coord,

    advance: Coord,
}
impl Raster {
    fn rasterize(font: &FontData, font_size: f32, character: char) -> Self {
        let (metrics, bitmap) = font.rasterize(character, font_size);

        Self {
            bitmap,
            bitmap_width: metrics.width,
            left: metrics.xmin,
            top: metrics.ymin + metrics.height as Coord,
            advance: metrics.advance_width.round() as Coord,
        }
    }
}
impl Drawable for Raster {
    fn draw_at(&self, surface: &mut PixelSurface, position: Position, color: Color) {
        if self.bitmap_width == 0 {
            return;
        }
        self.bitmap
            .iter()
            .enumerate()
            .filter(|(_, coverage)| **coverage >= COVERAGE_THRESHOLD)
            .for_each(|(bmp_i, _)| {
                let bmp_x = (bmp_i % self.bitmap_width) as Coord;
                let bmp_y = (bmp_i / self.bitmap_width) as Coord;

                surface.set(
                    position.x.saturating_add(self.left + bmp_x),
                    position.y.saturating_sub(self.top - bmp_y),
                    color,
                );
            })
    }
}
