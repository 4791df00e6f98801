use crate::config::CanvasConfig;
use crate::display::{DisplaySink, Headless, PointerEvent};
use crate::error::CanvasError;
use crate::geometry::{Coord, Position, Size};
use crate::graphics::{Color, Font};
use crate::pause::{Interrupter, Pacer, PauseObserver};
use crate::render::{
    shapes::{Disc, Ring},
    text::{GlyphRasterizer, TextRenderer},
    Drawable, PixelSurface,
};
use crate::repaint::RepaintScheduler;
use crate::state::DrawingState;

/// An immediate-mode drawing surface bound to a display.
///
/// Every draw call takes its color explicitly and also makes it the active color.
/// After the buffer has been changed the repaint scheduler decides whether the
/// display gets the new frame right away or waits for [`Canvas::repaint`].
pub struct Canvas<D: DisplaySink> {
    title: String,
    surface: PixelSurface,
    state: DrawingState,
    scheduler: RepaintScheduler,
    pacer: Pacer,
    text: Box<dyn TextRenderer>,
    display: D,
}

impl<D: DisplaySink> Canvas<D> {
    /// Allocates a `width` x `height` buffer filled with `background` and shows it.
    ///
    /// The foreground starts black and repaints start out automatic.
    pub fn new(
        title: impl Into<String>,
        width: i64,
        height: i64,
        background: Color,
        display: D,
    ) -> Result<Self, CanvasError> {
        let invalid = CanvasError::InvalidDimensions { width, height };
        let width = u32::try_from(width).map_err(|_| invalid.clone())?;
        let height = u32::try_from(height).map_err(|_| invalid.clone())?;
        if width == 0 || height == 0 {
            return Err(invalid);
        }

        let size = Size::new(width, height);
        let mut canvas = Self {
            title: title.into(),
            surface: PixelSurface::new(size, background),
            state: DrawingState::default(),
            scheduler: RepaintScheduler::default(),
            pacer: Pacer::new(),
            text: Box::new(GlyphRasterizer),
            display,
        };
        log::info!("created {}x{} canvas {:?}", width, height, canvas.title);
        canvas.display.show(&canvas.title, size);
        Ok(canvas)
    }

    /// Builds a canvas from configuration, loading its font if one is set
    pub fn from_config(config: &CanvasConfig, display: D) -> eyre::Result<Self> {
        let font = config.resolve_font()?;
        let mut canvas = Self::new(
            config.title.clone(),
            config.width,
            config.height,
            config.background_color(),
            display,
        )?;
        canvas.state.set_font(font);
        Ok(canvas)
    }

    /// Replaces the default [`GlyphRasterizer`]
    pub fn with_text_renderer(mut self, renderer: impl TextRenderer + 'static) -> Self {
        self.text = Box::new(renderer);
        self
    }

    pub fn with_pause_observer(mut self, observer: impl PauseObserver + 'static) -> Self {
        self.pacer.set_observer(observer);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Reads one pixel of the buffer; `None` outside the surface
    pub fn pixel(&self, x: Coord, y: Coord) -> Option<Color> {
        self.surface.get(x, y)
    }

    pub fn draw_point(&mut self, x: Coord, y: Coord, color: Color) {
        self.state.set_foreground(color);
        self.surface.set(x, y, color);
        self.finish();
    }

    pub fn draw_line(&mut self, x1: Coord, y1: Coord, x2: Coord, y2: Coord, color: Color) {
        self.state.set_foreground(color);
        self.surface.draw_line(x1, y1, x2, y2, color);
        self.finish();
    }

    /// Filled axis-aligned rectangle between two opposite corners, far edges exclusive
    pub fn draw_rectangle(&mut self, x1: Coord, y1: Coord, x2: Coord, y2: Coord, color: Color) {
        self.state.set_foreground(color);
        self.surface.fill_rect(x1, y1, x2, y2, color);
        self.finish();
    }

    pub fn draw_disc(&mut self, x: Coord, y: Coord, radius: Coord, color: Color) {
        self.state.set_foreground(color);
        Disc { radius }.draw_at(&mut self.surface, Position::new(x, y), color);
        self.finish();
    }

    /// Five pixel thick ring with outer radius `radius`; see [`Ring`] for small radii
    pub fn draw_circle(&mut self, x: Coord, y: Coord, radius: Coord, color: Color) {
        self.state.set_foreground(color);
        Ring { radius }.draw_at(&mut self.surface, Position::new(x, y), color);
        self.finish();
    }

    /// Writes `text` with its baseline starting at `(x, y)` in the active font
    pub fn draw_text(&mut self, text: &str, x: Coord, y: Coord, color: Color) {
        self.state.set_foreground(color);
        self.text.render(
            &mut self.surface,
            text,
            Position::new(x, y),
            self.state.foreground(),
            self.state.font(),
        );
        self.finish();
    }

    pub fn draw_number(&mut self, number: i64, x: Coord, y: Coord, color: Color) {
        self.draw_text(&number.to_string(), x, y, color);
    }

    /// Paints the whole buffer; the active color is left alone
    pub fn clear(&mut self, color: Color) {
        self.surface.fill(color);
        self.finish();
    }

    pub fn foreground_color(&self) -> Color {
        self.state.foreground()
    }

    pub fn set_foreground_color(&mut self, color: Color) {
        self.state.set_foreground(color);
    }

    pub fn font(&self) -> &Font {
        self.state.font()
    }

    pub fn set_font(&mut self, font: Font) {
        self.state.set_font(font);
    }

    pub fn auto_repaint(&self) -> bool {
        self.scheduler.is_auto()
    }

    pub fn set_auto_repaint(&mut self, auto: bool) {
        self.scheduler.set_auto(auto);
    }

    /// Sends the buffer to the display now, whatever the repaint mode
    pub fn repaint(&mut self) {
        log::debug!("presenting {:?}", self.title);
        self.display.present(&self.surface);
    }

    /// Blocks this thread for `millis` milliseconds, or less if interrupted
    pub fn pause(&self, millis: u64) {
        self.pacer.pause(millis);
    }

    /// A handle that cuts short the pause in progress, usable from other threads
    pub fn interrupter(&self) -> Interrupter {
        self.pacer.interrupter()
    }

    pub fn add_click_listener(&mut self, handler: impl FnMut(&PointerEvent) + Send + 'static) {
        self.display.add_click_listener(Box::new(handler));
    }

    pub fn add_motion_listener(&mut self, handler: impl FnMut(&PointerEvent) + Send + 'static) {
        self.display.add_motion_listener(Box::new(handler));
    }

    /// The underlying display
    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Raw access to the pixel buffer. Changes made here are not flushed automatically.
    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut PixelSurface {
        &mut self.surface
    }

    fn finish(&mut self) {
        if self.scheduler.after_mutation() {
            self.repaint();
        }
    }
}

impl Canvas<Headless> {
    /// A canvas with the default configuration and no screen
    pub fn headless() -> Self {
        let config = CanvasConfig::default();
        Self::new(
            config.title.clone(),
            config.width,
            config.height,
            config.background_color(),
            Headless::new(),
        )
        .unwrap_or_else(|_| unreachable!("default dimensions are positive"))
    }
}
