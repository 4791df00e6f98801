use super::{DisplaySink, Frame, Listeners, PointerEvent, PointerHandler};
use crate::geometry::Size;
use crate::render::PixelSurface;

/// Keeps the last presented frame and counts what the canvas asked for
#[derive(Default)]
pub struct Headless {
    title: Option<String>,
    shows: usize,
    presents: usize,
    last_frame: Option<Frame>,
    listeners: Listeners,
}
impl Headless {
    pub fn new() -> Self {
        Self::default()
    }

    /// Title passed to the last `show`
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn shows(&self) -> usize {
        self.shows
    }

    pub fn presents(&self) -> usize {
        self.presents
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    /// Feeds a pointer event to the registered listeners, as a windowing system would
    pub fn dispatch(&mut self, event: &PointerEvent) {
        self.listeners.dispatch(event);
    }
}

impl DisplaySink for Headless {
    fn show(&mut self, title: &str, _size: Size) {
        self.title = Some(title.to_owned());
        self.shows += 1;
    }

    fn present(&mut self, surface: &PixelSurface) {
        self.presents += 1;
        match self.last_frame {
            Some(ref mut frame) => frame.copy_from(surface),
            None => self.last_frame = Some(Frame::capture(surface)),
        }
    }

    fn add_click_listener(&mut self, handler: PointerHandler) {
        self.listeners.add_click(handler);
    }

    fn add_motion_listener(&mut self, handler: PointerHandler) {
        self.listeners.add_motion(handler);
    }
}
