use std::{
    num::NonZeroU32,
    rc::Rc,
    sync::{Arc, Mutex, PoisonError},
    thread,
};

use eyre::{eyre, WrapErr};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy},
    window::{Window, WindowBuilder},
};

use super::{
    DisplaySink, Frame, Listeners, PointerButton, PointerEvent, PointerHandler, PointerKind,
};
use crate::canvas::Canvas;
use crate::config::CanvasConfig;
use crate::geometry::{Position, Size};
use crate::render::PixelSurface;

/// Messages from the script thread to the event loop
#[derive(Clone, Copy, Debug)]
enum Wake {
    Show,
    Present,
}

/// The display half of a windowed canvas.
///
/// Lives on the script thread. Frames are handed over through a shared slot and
/// the event loop is woken to blit them, so presenting never waits for the screen.
pub struct WindowSink {
    proxy: EventLoopProxy<Wake>,
    frame: Arc<Mutex<Frame>>,
    listeners: Arc<Mutex<Listeners>>,
}
impl WindowSink {
    fn wake(&self, wake: Wake) {
        if self.proxy.send_event(wake).is_err() {
            log::debug!("event loop already closed, dropping {wake:?}");
        }
    }
}

impl DisplaySink for WindowSink {
    fn show(&mut self, title: &str, size: Size) {
        log::info!("showing {title:?} at {}x{}", size.width, size.height);
        self.wake(Wake::Show);
    }

    fn present(&mut self, surface: &PixelSurface) {
        self.frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .copy_from(surface);
        self.wake(Wake::Present);
    }

    fn add_click_listener(&mut self, handler: PointerHandler) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add_click(handler);
    }

    fn add_motion_listener(&mut self, handler: PointerHandler) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add_motion(handler);
    }
}

/// Opens a window for `config` and runs `script` against its canvas.
///
/// The event loop takes over the calling thread (which must be the main thread on
/// most platforms); the script runs on its own thread. Closing the window cuts
/// short any pause the script is in and ends the loop.
pub fn run<F>(config: CanvasConfig, script: F) -> eyre::Result<()>
where
    F: FnOnce(Canvas<WindowSink>) + Send + 'static,
{
    let event_loop = EventLoopBuilder::<Wake>::with_user_event()
        .build()
        .map_err(|e| eyre!("creating event loop: {e}"))?;

    let frame = Arc::new(Mutex::new(Frame {
        size: Size::new(0, 0),
        pixels: Vec::new(),
    }));
    let listeners = Arc::new(Mutex::new(Listeners::default()));
    let sink = WindowSink {
        proxy: event_loop.create_proxy(),
        frame: frame.clone(),
        listeners: listeners.clone(),
    };

    let canvas = Canvas::from_config(&config, sink).wrap_err("setting up canvas")?;
    // The background is visible before the first flush
    frame
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .copy_from(canvas.surface());

    let window = Rc::new(
        WindowBuilder::new()
            .with_title(canvas.title())
            .with_inner_size(PhysicalSize::new(canvas.width(), canvas.height()))
            .with_resizable(false)
            .with_visible(false)
            .build(&event_loop)
            .map_err(|e| eyre!("creating window: {e}"))?,
    );
    let context = softbuffer::Context::new(window.clone())
        .map_err(|e| eyre!("creating softbuffer context: {e}"))?;
    let mut surface = softbuffer::Surface::new(&context, window.clone())
        .map_err(|e| eyre!("creating softbuffer surface: {e}"))?;

    let interrupter = canvas.interrupter();
    thread::Builder::new()
        .name("sketchpad-script".to_owned())
        .spawn(move || {
            script(canvas);
            log::info!("script finished");
        })
        .wrap_err("spawning script thread")?;

    let mut cursor = Position::default();
    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);

            match event {
                Event::UserEvent(Wake::Show) => window.set_visible(true),
                Event::UserEvent(Wake::Present) => window.request_redraw(),

                Event::WindowEvent { window_id, event } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested => {
                            log::info!("window closed");
                            interrupter.interrupt();
                            elwt.exit();
                        }
                        WindowEvent::RedrawRequested => {
                            if let Err(err) = redraw(&mut surface, &window, &frame) {
                                log::error!("redraw failed: {err:#}");
                            }
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            cursor = convert_position(position);
                            route(
                                &listeners,
                                PointerEvent {
                                    kind: PointerKind::Moved,
                                    position: cursor,
                                    button: None,
                                },
                            );
                        }
                        WindowEvent::MouseInput { state, button, .. } => route(
                            &listeners,
                            PointerEvent {
                                kind: match state {
                                    ElementState::Pressed => PointerKind::Pressed,
                                    ElementState::Released => PointerKind::Released,
                                },
                                position: cursor,
                                button: Some(convert_button(button)),
                            },
                        ),
                        _ => (),
                    }
                }
                _ => (),
            }
        })
        .map_err(|e| eyre!("running event loop: {e}"))
}

fn route(listeners: &Mutex<Listeners>, event: PointerEvent) {
    log::trace!("pointer {event:?}");
    listeners
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .dispatch(&event);
}

fn redraw(
    surface: &mut softbuffer::Surface<Rc<Window>, Rc<Window>>,
    window: &Window,
    frame: &Mutex<Frame>,
) -> eyre::Result<()> {
    let size = window.inner_size();
    let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
    else {
        return Ok(());
    };
    surface
        .resize(width, height)
        .map_err(|e| eyre!("resizing surface: {e}"))?;

    let mut buffer = surface
        .buffer_mut()
        .map_err(|e| eyre!("mapping buffer: {e}"))?;
    blit(
        &frame.lock().unwrap_or_else(PoisonError::into_inner),
        &mut buffer,
        size.width as usize,
        size.height as usize,
    );
    buffer
        .present()
        .map_err(|e| eyre!("presenting buffer: {e}"))
}

/// Copies `frame` into the top left of a `width` x `height` target; the rest is black
fn blit(frame: &Frame, target: &mut [u32], width: usize, height: usize) {
    target.fill(0);

    let stride = frame.size.width as usize;
    let copy_width = width.min(stride);
    for row in 0..height.min(frame.size.height as usize) {
        target[row * width..row * width + copy_width]
            .copy_from_slice(&frame.pixels[row * stride..row * stride + copy_width]);
    }
}

fn convert_position(position: PhysicalPosition<f64>) -> Position {
    Position::new(position.x.floor() as i32, position.y.floor() as i32)
}

fn convert_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Right => PointerButton::Right,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Back => PointerButton::Other(3),
        MouseButton::Forward => PointerButton::Other(4),
        MouseButton::Other(n) => PointerButton::Other(n),
    }
}
