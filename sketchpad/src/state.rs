use crate::graphics::{named, Color, Font};

/// The ambient pen: one active color and one active font, read by every draw call.
///
/// Owned by a single canvas. Changing either only affects operations issued afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawingState {
    foreground: Color,
    font: Font,
}
impl DrawingState {
    pub fn foreground(&self) -> Color {
        self.foreground
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }
}
impl Default for DrawingState {
    fn default() -> Self {
        Self {
            foreground: named::BLACK,
            font: Font::default(),
        }
    }
}
