use std::sync::{Arc, Mutex};
use std::time::Duration;

use sketchpad::{
    display::{PointerButton, PointerKind},
    geometry::Position,
    named::{BLACK, BLUE, GREEN, RED, WHITE},
    pause::PauseObserver,
    render::{text::TextRenderer, PixelSurface},
    Canvas, CanvasError, Color, Font, Headless, MonoSize, PointerEvent,
};

fn canvas(width: i64, height: i64) -> Canvas<Headless> {
    Canvas::new("scenario", width, height, WHITE, Headless::new()).unwrap()
}

fn colored(canvas: &Canvas<Headless>, color: Color) -> Vec<(i32, i32)> {
    let mut out = Vec::new();
    for y in 0..canvas.height() as i32 {
        for x in 0..canvas.width() as i32 {
            if canvas.pixel(x, y) == Some(color) {
                out.push((x, y));
            }
        }
    }
    out
}

#[test]
fn rectangle_on_ten_by_ten() {
    let mut canvas = canvas(10, 10);
    canvas.draw_rectangle(2, 2, 5, 5, BLACK);
    assert_eq!(canvas.pixel(3, 3), Some(BLACK));
    assert_eq!(canvas.pixel(6, 6), Some(WHITE));
}

#[test]
fn zero_radius_disc_colors_one_pixel() {
    let mut canvas = canvas(10, 10);
    canvas.draw_disc(5, 5, 0, RED);
    assert_eq!(colored(&canvas, RED), vec![(5, 5)]);
}

#[test]
fn point_reads_back() {
    let mut canvas = canvas(16, 9);
    for (x, y) in [(0, 0), (15, 8), (7, 4)] {
        canvas.draw_point(x, y, GREEN);
        assert_eq!(canvas.pixel(x, y), Some(GREEN));
    }
}

#[test]
fn out_of_bounds_drawing_is_silent() {
    let mut canvas = canvas(8, 8);
    canvas.draw_point(-1, 3, RED);
    canvas.draw_point(8, 3, RED);
    canvas.draw_line(-20, -20, -5, -5, RED);
    canvas.draw_rectangle(100, 100, 200, 200, RED);
    canvas.draw_disc(-50, -50, 10, RED);
    canvas.draw_circle(4, 4, -1, RED);
    assert!(colored(&canvas, RED).is_empty());
    // every call still flushed
    assert_eq!(canvas.display().presents(), 6);
}

#[test]
fn rectangle_ignores_corner_order() {
    let mut a = canvas(12, 12);
    let mut b = canvas(12, 12);
    a.draw_rectangle(9, 1, 3, 7, BLUE);
    b.draw_rectangle(3, 7, 9, 1, BLUE);
    assert_eq!(a.surface().pixels(), b.surface().pixels());
    assert_eq!(colored(&a, BLUE).len(), 6 * 6);
}

#[test]
fn drawing_twice_changes_nothing_more() {
    let mut once = canvas(30, 30);
    let mut twice = canvas(30, 30);
    once.draw_circle(15, 15, 10, RED);
    twice.draw_circle(15, 15, 10, RED);
    twice.draw_circle(15, 15, 10, RED);
    assert_eq!(once.surface().pixels(), twice.surface().pixels());
}

#[test]
fn manual_mode_batches_into_one_flush() {
    let mut canvas = canvas(20, 20);
    canvas.set_auto_repaint(false);
    canvas.draw_point(1, 1, RED);
    canvas.draw_line(0, 19, 19, 19, GREEN);
    canvas.draw_rectangle(5, 5, 8, 8, BLUE);
    canvas.draw_disc(15, 5, 2, BLACK);
    assert_eq!(canvas.display().presents(), 0);

    canvas.repaint();
    assert_eq!(canvas.display().presents(), 1);

    let frame = canvas.display().last_frame().unwrap();
    assert_eq!(frame.get(1, 1), Some(RED));
    assert_eq!(frame.get(10, 19), Some(GREEN));
    assert_eq!(frame.get(6, 6), Some(BLUE));
    assert_eq!(frame.get(15, 5), Some(BLACK));
}

#[test]
fn switching_to_auto_does_not_flush() {
    let mut canvas = canvas(20, 20);
    canvas.set_auto_repaint(false);
    canvas.draw_point(1, 1, RED);
    canvas.set_auto_repaint(true);
    assert_eq!(canvas.display().presents(), 0);
    canvas.draw_point(2, 2, RED);
    assert_eq!(canvas.display().presents(), 1);
    assert_eq!(canvas.display().last_frame().unwrap().get(1, 1), Some(RED));
}

#[test]
fn repaint_flushes_in_auto_mode_too() {
    let mut canvas = canvas(4, 4);
    canvas.repaint();
    canvas.repaint();
    assert_eq!(canvas.display().presents(), 2);
}

#[test]
fn presented_frame_matches_buffer() {
    let mut canvas = canvas(20, 20);
    canvas.draw_disc(10, 10, 6, RED);
    let frame = canvas.display().last_frame().unwrap();
    assert_eq!(frame.pixels.as_slice(), canvas.surface().pixels());
}

#[test]
fn invalid_dimensions_are_rejected() {
    let err = Canvas::new("empty", 0, 10, WHITE, Headless::new()).err();
    assert_eq!(
        err,
        Some(CanvasError::InvalidDimensions {
            width: 0,
            height: 10
        })
    );
}

#[derive(Clone, Default)]
struct Recording(Arc<Mutex<Vec<(String, Position, Color, Font)>>>);
impl TextRenderer for Recording {
    fn render(
        &self,
        _surface: &mut PixelSurface,
        text: &str,
        origin: Position,
        color: Color,
        font: &Font,
    ) {
        self.0
            .lock()
            .unwrap()
            .push((text.to_owned(), origin, color, font.clone()));
    }
}

#[test]
fn text_is_delegated_with_active_state() {
    let recording = Recording::default();
    let mut canvas = canvas(50, 50).with_text_renderer(recording.clone());
    canvas.set_font(Font::Mono(MonoSize::Large));
    canvas.draw_text("hello", 3, 40, BLUE);
    canvas.draw_number(-42, 5, 20, RED);

    let calls = recording.0.lock().unwrap();
    assert_eq!(
        *calls,
        vec![
            (
                "hello".to_owned(),
                Position::new(3, 40),
                BLUE,
                Font::Mono(MonoSize::Large)
            ),
            (
                "-42".to_owned(),
                Position::new(5, 20),
                RED,
                Font::Mono(MonoSize::Large)
            ),
        ]
    );
    assert_eq!(canvas.foreground_color(), RED);
    assert_eq!(canvas.display().presents(), 2);
}

#[test]
fn default_text_renderer_paints_pixels() {
    let mut canvas = canvas(80, 30);
    canvas.draw_text("42", 5, 20, BLUE);
    assert!(!colored(&canvas, BLUE).is_empty());
}

#[test]
fn pointer_listeners_are_forwarded_to_the_display() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut canvas = canvas(10, 10);
    let clicks = seen.clone();
    canvas.add_click_listener(move |event| clicks.lock().unwrap().push(*event));
    let moves = seen.clone();
    canvas.add_motion_listener(move |event| moves.lock().unwrap().push(*event));

    let press = PointerEvent {
        kind: PointerKind::Pressed,
        position: Position::new(4, 5),
        button: Some(PointerButton::Left),
    };
    let motion = PointerEvent {
        kind: PointerKind::Moved,
        position: Position::new(6, 7),
        button: None,
    };
    canvas.display_mut().dispatch(&press);
    canvas.display_mut().dispatch(&motion);

    assert_eq!(*seen.lock().unwrap(), vec![press, motion]);
}

#[derive(Clone, Default)]
struct Interruptions(Arc<Mutex<usize>>);
impl PauseObserver for Interruptions {
    fn interrupted(&self, _requested: Duration, _elapsed: Duration) {
        *self.0.lock().unwrap() += 1;
    }
}

#[test]
fn interrupted_pause_keeps_drawing_state() {
    let interruptions = Interruptions::default();
    let mut canvas = canvas(10, 10).with_pause_observer(interruptions.clone());
    canvas.draw_point(1, 1, RED);

    let interrupter = canvas.interrupter();
    let waker = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        interrupter.interrupt();
    });
    canvas.pause(10_000);
    waker.join().unwrap();

    assert_eq!(*interruptions.0.lock().unwrap(), 1);
    assert_eq!(canvas.foreground_color(), RED);
    canvas.draw_point(2, 2, BLUE);
    assert_eq!(canvas.pixel(1, 1), Some(RED));
    assert_eq!(canvas.pixel(2, 2), Some(BLUE));
}
