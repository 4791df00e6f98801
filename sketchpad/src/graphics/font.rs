use std::sync::Arc;

use embedded_graphics::mono_font::{
    ascii::{FONT_10X20, FONT_6X10, FONT_8X13},
    MonoFont,
};

use super::Typeface;

/// Sizes of the built-in monospaced bitmap face
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MonoSize {
    /// 6x10 cells
    Small,
    /// 8x13 cells
    #[default]
    Medium,
    /// 10x20 cells
    Large,
}
impl MonoSize {
    pub(crate) fn face(self) -> &'static MonoFont<'static> {
        match self {
            MonoSize::Small => &FONT_6X10,
            MonoSize::Medium => &FONT_8X13,
            MonoSize::Large => &FONT_10X20,
        }
    }
}

/// Font descriptor used for text operations.
///
/// The built-in [`Font::Mono`] faces need no font files, so they are the default.
/// [`Font::Face`] renders an outline [`Typeface`] at a pixel size.
#[derive(Clone, Debug)]
pub enum Font {
    Mono(MonoSize),
    Face { typeface: Arc<Typeface>, size: f32 },
}
impl Font {
    pub fn face(typeface: Arc<Typeface>, size: f32) -> Self {
        Self::Face { typeface, size }
    }

    /// Nominal line height in pixels
    pub fn line_height(&self) -> u32 {
        match self {
            Font::Mono(size) => size.face().character_size.height,
            Font::Face { typeface, size } => typeface
                .data()
                .horizontal_line_metrics(*size)
                .map(|metrics| metrics.new_line_size)
                .unwrap_or(*size)
                .ceil() as u32,
        }
    }
}
impl Default for Font {
    fn default() -> Self {
        Font::Mono(MonoSize::default())
    }
}

/// Two faces are equal when they share the same parsed typeface at the same size
impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Font::Mono(a), Font::Mono(b)) => a == b,
            (
                Font::Face { typeface, size },
                Font::Face {
                    typeface: other_typeface,
                    size: other_size,
                },
            ) => Arc::ptr_eq(typeface, other_typeface) && size == other_size,
            _ => false,
        }
    }
}
