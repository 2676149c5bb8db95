// What you SEE:
// • Type a symbol class in the header and press Enter (Tab or a click on the
//   header unlocks it again).
// • Hold Left Mouse on the white canvas to draw; releasing adds the drawing
//   to the unsaved images and clears the canvas.
// • Ctrl+S saves unsaved images to <directory>/<class>.symb.
// • Ctrl+E exports the saved images of the class as PNGs.
// • Ctrl+Z wipes the drawing in progress. ESC quits.

mod app;
mod capture;
mod config;
mod draw;
mod error;
mod geometry;
mod label;
mod pointer;
mod raster;
mod store;
mod types;

use app::App;
use capture::SampleOutcome;
use config::PainterConfig;
use draw::{
    compose, draw_disc, fill_quad, key_to_char, Drawer, BLACK, FOOTER_HEIGHT, HEADER_HEIGHT,
    WHITE,
};
use error::Error;
use log::{info, warn};
use minifb::Key;
use pointer::PointerTracker;
use raster::make_disc_stamp;
use types::FrameBuffer;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting symbol-painter");

    /* --- Config ---
       Canvas size, brush radius and output directory are fixed from here on. */
    let config = match PainterConfig::load_from_file() {
        Ok(config) => config,
        Err(e) => {
            warn!("{e}; using default configuration");
            PainterConfig::default()
        }
    };
    info!("Configuration loaded: {config:?}");
    if let Err(e) = store::ensure_root(&config.directory) {
        warn!("{e}");
    }

    let canvas = config.canvas();
    let (w, h) = (canvas.width as usize, canvas.height as usize);
    let stamp = make_disc_stamp(config.brush_radius());
    let mut app = App::new(config);

    /* --- Window ---
       Visual: header strip, white canvas, footer strip. */
    let mut drawer = Drawer::new("Creator of symbols", w, h + HEADER_HEIGHT + FOOTER_HEIGHT)?;
    let mut screen = FrameBuffer::filled(w, h + HEADER_HEIGHT + FOOTER_HEIGHT, WHITE);

    /* --- Canvas layer ---
       Visual: what you have drawn since the last release. */
    let mut ink = FrameBuffer::filled(w, h, WHITE);
    let mut ink_dirty = false;

    /* --- Pointer tracking --- */
    let mut tracker = PointerTracker::new(HEADER_HEIGHT as i32, h as i32);

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Keyboard */
        let ctrl = drawer.ctrl_down();
        let shift = drawer.shift_down();
        for key in drawer.keys_pressed() {
            match key {
                Key::S if ctrl => {
                    app.save().ok();
                }
                Key::E if ctrl => {
                    app.export().ok();
                }
                Key::Z if ctrl => app.clear_stroke(),
                Key::Enter | Key::NumPadEnter => {
                    app.submit_label().ok();
                }
                Key::Tab => app.edit_label(),
                Key::Backspace => app.backspace(),
                _ if ctrl => {}
                _ => {
                    if let Some(c) = key_to_char(key, shift) {
                        app.type_char(c);
                    }
                }
            }
        }

        /* 2) Pointer
           Visual: circles appear under the cursor, bridges close fast-drag gaps. */
        let action = tracker.update(drawer.left_mouse_down(), drawer.mouse_pos());
        if let SampleOutcome::Accepted { sample, bridge } = app.pointer(action) {
            if let Some(quad) = bridge {
                fill_quad(&mut ink, &quad, BLACK);
            }
            draw_disc(&mut ink, &stamp, sample.x, sample.y, BLACK);
            ink_dirty = true;
        }

        /* 3) The canvas mirrors the session: once it is empty (image added,
              stroke wiped, class switched) the drawing goes away. */
        if ink_dirty && app.session().is_empty() {
            ink.fill(WHITE);
            ink_dirty = false;
        }

        /* 4) Present */
        compose(&mut screen, &ink, &app);
        drawer.present(&screen)?;
    }

    if !app.pending().is_empty() {
        warn!("quitting with {} unsaved images", app.pending().len());
    }
    Ok(())
}
