/// In-memory sink, for tests and scripts without a screen
pub mod headless;

/// On-screen sink backed by `winit` and `softbuffer`
pub mod window;

pub use headless::Headless;
pub use window::WindowSink;

use crate::geometry::{Coord, Position, Size};
use crate::graphics::{unpack, Color};
use crate::render::PixelSurface;

/// Where a canvas sends its buffer.
///
/// `present` is fire-and-forget: it hands the current frame over and returns
/// without waiting for it to reach the screen.
pub trait DisplaySink {
    /// Asks for the display to become visible; called once when the canvas is created
    fn show(&mut self, _title: &str, _size: Size) {}

    fn present(&mut self, surface: &PixelSurface);

    fn add_click_listener(&mut self, _handler: PointerHandler) {
        log::debug!("display does not deliver pointer input, dropping click listener");
    }

    fn add_motion_listener(&mut self, _handler: PointerHandler) {
        log::debug!("display does not deliver pointer input, dropping motion listener");
    }
}

/// A snapshot of the buffer as handed to the display
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub size: Size,
    pub pixels: Vec<u32>,
}
impl Frame {
    pub fn capture(surface: &PixelSurface) -> Self {
        Self {
            size: surface.dimensions(),
            pixels: surface.pixels().to_vec(),
        }
    }

    /// Overwrites this frame in place, reusing its allocation
    pub fn copy_from(&mut self, surface: &PixelSurface) {
        self.size = surface.dimensions();
        self.pixels.clear();
        self.pixels.extend_from_slice(surface.pixels());
    }

    pub fn get(&self, x: Coord, y: Coord) -> Option<Color> {
        self.size
            .contains(Position::new(x, y))
            .then(|| unpack(self.pixels[y as usize * self.size.width as usize + x as usize]))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Pressed,
    Released,
    Moved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Surface coordinates
    pub position: Position,
    /// `None` for motion
    pub button: Option<PointerButton>,
}

pub type PointerHandler = Box<dyn FnMut(&PointerEvent) + Send>;

/// Registered pointer handlers: clicks get presses and releases, motion gets moves
#[derive(Default)]
pub struct Listeners {
    click: Vec<PointerHandler>,
    motion: Vec<PointerHandler>,
}
impl Listeners {
    pub fn add_click(&mut self, handler: PointerHandler) {
        self.click.push(handler);
    }

    pub fn add_motion(&mut self, handler: PointerHandler) {
        self.motion.push(handler);
    }

    pub fn is_empty(&self) -> bool {
        self.click.is_empty() && self.motion.is_empty()
    }

    pub fn dispatch(&mut self, event: &PointerEvent) {
        let handlers = match event.kind {
            PointerKind::Pressed | PointerKind::Released => &mut self.click,
            PointerKind::Moved => &mut self.motion,
        };
        handlers.iter_mut().for_each(|handler| handler(event));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::graphics::named::{RED, WHITE};

    #[test]
    fn frame_reads_back_pixels() {
        let mut surface = PixelSurface::new(Size::new(3, 2), WHITE);
        surface.set(2, 1, RED);
        let frame = Frame::capture(&surface);
        assert_eq!(frame.get(2, 1), Some(RED));
        assert_eq!(frame.get(0, 0), Some(WHITE));
        assert_eq!(frame.get(3, 0), None);
    }

    #[test]
    fn listeners_route_by_kind() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::default();
        let clicks = seen.clone();
        listeners.add_click(Box::new(move |event| {
            clicks.lock().unwrap().push(("click", event.kind))
        }));
        let moves = seen.clone();
        listeners.add_motion(Box::new(move |event| {
            moves.lock().unwrap().push(("motion", event.kind))
        }));

        for kind in [PointerKind::Moved, PointerKind::Pressed, PointerKind::Released] {
            listeners.dispatch(&PointerEvent {
                kind,
                position: Position::new(1, 1),
                button: None,
            });
        }

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("motion", PointerKind::Moved),
                ("click", PointerKind::Pressed),
                ("click", PointerKind::Released),
            ]
        );
    }
}
