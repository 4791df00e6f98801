use std::{path::PathBuf, sync::mpsc};

use sketchpad::{
    display::{window, PointerKind, WindowSink},
    named, Canvas, CanvasConfig, Color,
};

const FRAME_MILLIS: u64 = 16;

fn main() -> eyre::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(CanvasConfig::default_path);
    let config = CanvasConfig::load_or_default(&path)?;
    log::info!("Starting sketchpad demo");

    window::run(config, demo)
}

/// A still scene drawn in auto mode, then a bouncing disc drawn in manual mode.
/// Clicking leaves a ring where the pointer was.
fn demo(mut canvas: Canvas<WindowSink>) {
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);

    canvas.draw_rectangle(10, 10, width - 10, 40, named::LIGHTSTEELBLUE);
    canvas.draw_text("sketchpad", 20, 30, named::BLACK);
    canvas.draw_line(10, 50, width - 10, 50, named::DIMGRAY);
    canvas.pause(500);

    let (clicks, stamps) = mpsc::channel();
    canvas.add_click_listener(move |event| {
        if event.kind == PointerKind::Pressed {
            let _ = clicks.send(event.position);
        }
    });

    canvas.set_auto_repaint(false);
    let background = canvas.pixel(width / 2, height - 1).unwrap_or(named::WHITE);
    let radius = 12;
    let (mut x, mut y) = (width / 2, height / 2);
    let (mut dx, mut dy) = (3, 2);
    let mut stamped: Vec<(i32, i32)> = Vec::new();
    let mut frame: i64 = 0;

    loop {
        canvas.draw_rectangle(0, 60, width, height, background);

        while let Ok(position) = stamps.try_recv() {
            stamped.push((position.x, position.y));
        }
        for &(sx, sy) in &stamped {
            canvas.draw_circle(sx, sy, 15, named::TOMATO);
        }

        if x - radius < 0 || x + radius >= width {
            dx = -dx;
        }
        if y - radius < 60 || y + radius >= height {
            dy = -dy;
        }
        x += dx;
        y += dy;
        canvas.draw_disc(x, y, radius, hue(frame));
        canvas.draw_number(frame, 10, height - 10, named::BLACK);

        canvas.repaint();
        canvas.pause(FRAME_MILLIS);
        frame += 1;
    }
}

/// Cycles through three colors, one second each
fn hue(frame: i64) -> Color {
    let step = (frame / 60 % 3) as usize;
    [named::CRIMSON, named::SEAGREEN, named::ROYALBLUE][step]
}
