pub mod font;
pub mod typeface;

pub use font::{Font, MonoSize};
pub use palette::named;
pub use typeface::{FontError, Typeface};

use palette::Srgb;

/// Opaque sRGB color, 8 bits per channel
pub type Color = Srgb<u8>;

/// Packs a color into the `0x00RRGGBB` word used by the frame buffer
#[inline]
pub fn pack(color: Color) -> u32 {
    (color.red as u32) << 16 | (color.green as u32) << 8 | color.blue as u32
}

/// Inverse of [`pack`]; the top byte is ignored
#[inline]
pub fn unpack(value: u32) -> Color {
    Srgb::new((value >> 16) as u8, (value >> 8) as u8, value as u8)
}
