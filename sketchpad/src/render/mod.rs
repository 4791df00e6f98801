/// Filled disc and fixed-thickness ring
pub mod shapes;

/// Everything involving text rasterization lives here.
pub mod text;

use std::convert::Infallible;

use embedded_graphics::{
    geometry::{OriginDimensions, Size as EgSize},
    pixelcolor::{Rgb888, RgbColor},
    prelude::DrawTarget,
    Pixel as EgPixel,
};

use crate::geometry::{Coord, Position, Size};
use crate::graphics::{pack, unpack, Color};

/// Fixed-size offscreen pixel buffer.
///
/// Pixels are stored row-major as packed `0x00RRGGBB` words, so a flush is a plain copy.
/// Every write is bounds-checked; anything outside `[0, width) x [0, height)` is dropped.
#[derive(Clone)]
pub struct PixelSurface {
    size: Size,
    buffer: Vec<u32>,
}
impl PixelSurface {
    pub fn new(size: Size, background: Color) -> Self {
        Self {
            size,
            buffer: vec![pack(background); size.area()],
        }
    }

    pub fn dimensions(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// The raw packed frame, row-major
    pub fn pixels(&self) -> &[u32] {
        &self.buffer
    }

    #[inline]
    fn index(&self, position: Position) -> Option<usize> {
        self.size
            .contains(position)
            .then(|| position.y as usize * self.size.width as usize + position.x as usize)
    }

    pub fn get(&self, x: Coord, y: Coord) -> Option<Color> {
        self.index(Position::new(x, y))
            .map(|index| unpack(self.buffer[index]))
    }

    pub fn set(&mut self, x: Coord, y: Coord, color: Color) {
        if let Some(index) = self.index(Position::new(x, y)) {
            self.buffer[index] = pack(color);
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.buffer.fill(pack(color));
    }

    /// Fills the axis-aligned rectangle spanned by two opposite corners.
    ///
    /// The region is `[min(x1, x2), min(x1, x2) + |x1 - x2|)` and likewise for `y`:
    /// the far edge is exclusive, so `x1 == x2` or `y1 == y2` fills nothing.
    pub fn fill_rect(&mut self, x1: Coord, y1: Coord, x2: Coord, y2: Coord, color: Color) {
        let (left, right) = clip_span(x1, x2, self.size.width);
        let (top, bottom) = clip_span(y1, y2, self.size.height);
        if left >= right || top >= bottom {
            return;
        }

        let value = pack(color);
        let stride = self.size.width as usize;
        for row in top..bottom {
            self.buffer[row * stride + left..row * stride + right].fill(value);
        }
    }

    /// Straight line including both end points; a zero-length line is a single pixel.
    ///
    /// Steps one pixel at a time along the major axis, rounding the minor axis to the
    /// nearest pixel (ties away from the start). Only the steps whose major coordinate
    /// lands on the surface are visited, so far-off end points cost nothing.
    pub fn draw_line(&mut self, x1: Coord, y1: Coord, x2: Coord, y2: Coord, color: Color) {
        let (x1, y1, x2, y2) = (x1 as i64, y1 as i64, x2 as i64, y2 as i64);
        let (dx, dy) = ((x2 - x1).abs(), (y2 - y1).abs());
        let sx = if x1 <= x2 { 1 } else { -1 };
        let sy = if y1 <= y2 { 1 } else { -1 };

        // (start, step, length) of the major axis, then the same for the minor axis
        let (major, minor, limit) = if dx >= dy {
            ((x1, sx, dx), (y1, sy, dy), self.size.width as i64)
        } else {
            ((y1, sy, dy), (x1, sx, dx), self.size.height as i64)
        };
        let Some(steps) = clip_steps(major.0, major.1, major.2, limit) else {
            return;
        };

        for k in steps {
            let along = major.0 + major.1 * k;
            let across = minor.0 + minor.1 * minor_offset(k, minor.2, major.2);
            let (x, y) = if dx >= dy { (along, across) } else { (across, along) };
            if let (Ok(x), Ok(y)) = (Coord::try_from(x), Coord::try_from(y)) {
                self.set(x, y, color);
            }
        }
    }
}

/// Steps `k` in `0..=length` for which `start + step * k` falls in `[0, limit)`
fn clip_steps(
    start: i64,
    step: i64,
    length: i64,
    limit: i64,
) -> Option<std::ops::RangeInclusive<i64>> {
    let (low, high) = match step {
        1 => (-start, limit - 1 - start),
        _ => (start - (limit - 1), start),
    };
    let (low, high) = (low.max(0), high.min(length));
    (low <= high).then(|| low..=high)
}

/// `round(k * minor / major)` in integers, without overflow
#[inline]
fn minor_offset(k: i64, minor: i64, major: i64) -> i64 {
    if major == 0 {
        return 0;
    }
    let (k, minor, major) = (k as i128, minor as i128, major as i128);
    ((2 * k * minor + major) / (2 * major)) as i64
}

/// Normalizes two edge coordinates into a half-open index range clipped to `[0, limit)`
fn clip_span(a: Coord, b: Coord, limit: u32) -> (usize, usize) {
    let start = a.min(b) as i64;
    let end = start + (a as i64 - b as i64).abs();
    let clamp = |value: i64| value.clamp(0, limit as i64) as usize;
    (clamp(start), clamp(end))
}

/// Lets `embedded-graphics` primitives and mono text draw straight into the buffer
impl DrawTarget for PixelSurface {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = EgPixel<Self::Color>>,
    {
        for EgPixel(point, color) in pixels {
            self.set(point.x, point.y, Color::new(color.r(), color.g(), color.b()));
        }
        Ok(())
    }
}

impl OriginDimensions for PixelSurface {
    fn size(&self) -> EgSize {
        EgSize::new(self.size.width, self.size.height)
    }
}

/// Anything that can be stamped onto the surface around a position
pub trait Drawable {
    fn draw_at(&self, surface: &mut PixelSurface, position: Position, color: Color);
}
