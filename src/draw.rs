// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window with a header (symbol class entry), the white canvas and a footer.
// 2) Black brush circles and bridge polygons mirroring what gets saved.
// 3) A tiny 5x7 bitmap font for the header/footer text.

use crate::app::{App, Mode};
use crate::error::Error;
use crate::geometry::Quad;
use crate::raster::{for_each_disc_pixel, for_each_quad_pixel, DiscStamp};
use crate::types::{BoundingBox, CanvasSize, FrameBuffer};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub const HEADER_HEIGHT: usize = 32;
pub const FOOTER_HEIGHT: usize = 40;

pub const WHITE: u32 = 0x00_FF_FF_FF;
pub const BLACK: u32 = 0x00_00_00_00;
const PANEL: u32 = 0x00_E6_E6_E6;
const EDGE: u32 = 0x00_99_99_99;
const ENTRY_BG: u32 = 0x00_FF_FF_F0;
const TEXT: u32 = 0x00_20_20_20;

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window big enough for the canvas plus header and footer.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we’ll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, None while outside the window.
    pub fn mouse_pos(&self) -> Option<(i32, i32)> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x.floor() as i32, y.floor() as i32))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    /// Keys that went down since the last frame.
    pub fn keys_pressed(&self) -> Vec<Key> {
        self.window.get_keys_pressed(KeyRepeat::No)
    }

    /// Ctrl on Linux/Windows, Command on macOS.
    pub fn ctrl_down(&self) -> bool {
        [Key::LeftCtrl, Key::RightCtrl, Key::LeftSuper, Key::RightSuper]
            .iter()
            .any(|k| self.window.is_key_down(*k))
    }

    pub fn shift_down(&self) -> bool {
        self.window.is_key_down(Key::LeftShift) || self.window.is_key_down(Key::RightShift)
    }
}

/// Character typed by `key` into the label entry.
pub fn key_to_char(key: Key, shift: bool) -> Option<char> {
    let letter = |c: char| Some(if shift { c.to_ascii_uppercase() } else { c });
    match key {
        Key::A => letter('a'), Key::B => letter('b'), Key::C => letter('c'),
        Key::D => letter('d'), Key::E => letter('e'), Key::F => letter('f'),
        Key::G => letter('g'), Key::H => letter('h'), Key::I => letter('i'),
        Key::J => letter('j'), Key::K => letter('k'), Key::L => letter('l'),
        Key::M => letter('m'), Key::N => letter('n'), Key::O => letter('o'),
        Key::P => letter('p'), Key::Q => letter('q'), Key::R => letter('r'),
        Key::S => letter('s'), Key::T => letter('t'), Key::U => letter('u'),
        Key::V => letter('v'), Key::W => letter('w'), Key::X => letter('x'),
        Key::Y => letter('y'), Key::Z => letter('z'),

        Key::Key0 | Key::NumPad0 => Some('0'),
        Key::Key1 | Key::NumPad1 => Some('1'),
        Key::Key2 | Key::NumPad2 => Some('2'),
        Key::Key3 | Key::NumPad3 => Some('3'),
        Key::Key4 | Key::NumPad4 => Some('4'),
        Key::Key5 | Key::NumPad5 => Some('5'),
        Key::Key6 | Key::NumPad6 => Some('6'),
        Key::Key7 | Key::NumPad7 => Some('7'),
        Key::Key8 | Key::NumPad8 => Some('8'),
        Key::Key9 | Key::NumPad9 => Some('9'),

        Key::Minus => Some(if shift { '_' } else { '-' }),
        Key::Space => Some(' '),
        _ => None,
    }
}

/* ---------- Software drawing: pixels, rectangles, brush shapes ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: u32) {
    for yy in y..y + h {
        for xx in x..x + w {
            put_pixel(fb, xx, yy, color);
        }
    }
}

fn canvas_clip(ink: &FrameBuffer) -> BoundingBox {
    BoundingBox::full(CanvasSize::new(ink.width as u32, ink.height as u32))
}

/// Stamp one brush circle into the canvas layer.
/// Visual: a filled black circle appears under the cursor.
pub fn draw_disc(ink: &mut FrameBuffer, stamp: &DiscStamp, cx: i32, cy: i32, color: u32) {
    let clip = canvas_clip(ink);
    for_each_disc_pixel(stamp, cx, cy, &clip, |x, y| put_pixel(ink, x as i32, y as i32, color));
}

/// Fill a bridge polygon into the canvas layer.
/// Visual: the gap between two fast-drawn circles closes.
pub fn fill_quad(ink: &mut FrameBuffer, quad: &Quad, color: u32) {
    let clip = canvas_clip(ink);
    for_each_quad_pixel(quad, &clip, |x, y| put_pixel(ink, x as i32, y as i32, color));
}

/* ---------- Frame composition ---------- */

/// Build the whole window image: header entry, canvas layer, footer.
pub fn compose(screen: &mut FrameBuffer, ink: &FrameBuffer, app: &App) {
    let w = screen.width as i32;

    // Header: "SYMBOL CLASS:" + entry box
    fill_rect(screen, 0, 0, w, HEADER_HEIGHT as i32, PANEL);
    draw_text_5x7(screen, 8, 9, "Symbol class:", TEXT, 2);
    let entry_x = 8 + text_width("Symbol class: ", 2);
    let entry_w = (w - entry_x - 8).max(0);
    let entry_bg = if app.entry_editable() { ENTRY_BG } else { PANEL };
    fill_rect(screen, entry_x, 4, entry_w, HEADER_HEIGHT as i32 - 8, entry_bg);
    draw_line(screen, entry_x, HEADER_HEIGHT as i32 - 4, entry_x + entry_w, HEADER_HEIGHT as i32 - 4, EDGE);
    draw_text_5x7(screen, entry_x + 4, 9, app.entry(), TEXT, 2);
    if app.entry_editable() {
        let cursor_x = entry_x + 4 + text_width(app.entry(), 2);
        draw_line(screen, cursor_x, 8, cursor_x, HEADER_HEIGHT as i32 - 8, TEXT);
    }

    // Canvas
    for row in 0..ink.height {
        let dst = (HEADER_HEIGHT + row) * screen.width;
        let src = row * ink.width;
        let n = ink.width.min(screen.width);
        screen.pixels[dst..dst + n].copy_from_slice(&ink.pixels[src..src + n]);
    }

    // Footer: save path + last message
    let top = (HEADER_HEIGHT + ink.height) as i32;
    fill_rect(screen, 0, top, w, FOOTER_HEIGHT as i32, PANEL);
    draw_line(screen, 0, top, w - 1, top, EDGE);
    let target = match (app.mode(), app.save_path()) {
        (Mode::Painting, Some(path)) => format!("Saving to: {}", path.display()),
        _ => String::from("Saving to: -"),
    };
    draw_text_5x7(screen, 8, top + 8, &target, TEXT, 1);
    let pending = format!("{} unsaved | Ctrl+S save", app.pending().len());
    draw_text_5x7(screen, 8, top + 24, &format!("{} | {}", app.status(), pending), TEXT, 1);
}

/* ---------- 5x7 bitmap font ---------- */

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Letters (lowercase is drawn as uppercase)
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        // Punctuation used by paths and status messages
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00110,0b00100,0b01000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '?' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b00000,0b00100),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '_' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b11111),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '\\' => g!(0b10000,0b01000,0b01000,0b00100,0b00010,0b00010,0b00001),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '"' => g!(0b01010,0b01010,0b00000,0b00000,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Pixel width of `text` at `scale` (each glyph 5 wide + 1 spacing).
pub fn text_width(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * 6 * scale
}

/// Draw a single 5x7 character at (x,y), each font pixel a `scale`-sized block.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32, scale: i32) {
    if let Some(rows) = glyph5x7(ch) {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (*rowbits >> (4 - rx)) & 1 != 0 {
                    fill_rect(fb, x + rx * scale, y + ry as i32 * scale, scale, scale, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact line of text; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32, scale: i32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color, scale);
        x += 6 * scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PainterConfig;
    use crate::geometry::bridge;
    use crate::raster::make_disc_stamp;

    #[test]
    fn keys_map_to_label_characters() {
        assert_eq!(key_to_char(Key::C, false), Some('c'));
        assert_eq!(key_to_char(Key::C, true), Some('C'));
        assert_eq!(key_to_char(Key::Key7, false), Some('7'));
        assert_eq!(key_to_char(Key::Minus, true), Some('_'));
        assert_eq!(key_to_char(Key::Enter, false), None);
    }

    #[test]
    fn feedback_matches_saved_disc_and_bridge() {
        let mut ink = FrameBuffer::filled(60, 60, WHITE);
        let stamp = make_disc_stamp(3);
        draw_disc(&mut ink, &stamp, 10, 10, BLACK);
        draw_disc(&mut ink, &stamp, 10, 30, BLACK);
        fill_quad(&mut ink, &bridge(10, 30, 10, 10, 3).unwrap(), BLACK);

        assert_eq!(ink.pixels[10 * 60 + 10], BLACK);
        assert_eq!(ink.pixels[20 * 60 + 12], BLACK); // inside the bridge
        assert_eq!(ink.pixels[20 * 60 + 14], WHITE);
    }

    #[test]
    fn discs_at_the_border_are_clipped() {
        let mut ink = FrameBuffer::filled(8, 8, WHITE);
        draw_disc(&mut ink, &make_disc_stamp(4), 0, 0, BLACK);
        assert_eq!(ink.pixels[0], BLACK);
        assert_eq!(ink.pixels.len(), 64);
    }

    #[test]
    fn compose_places_canvas_between_header_and_footer() {
        let config = PainterConfig { width: 40, height: 20, radius: 2, ..Default::default() };
        let app = App::new(config);
        let ink = FrameBuffer::filled(40, 20, BLACK);
        let mut screen = FrameBuffer::filled(40, HEADER_HEIGHT + 20 + FOOTER_HEIGHT, WHITE);

        compose(&mut screen, &ink, &app);
        assert_eq!(screen.pixels[HEADER_HEIGHT * 40 + 5], BLACK);
        assert_eq!(screen.pixels[(HEADER_HEIGHT + 19) * 40 + 39], BLACK);
        assert_ne!(screen.pixels[(HEADER_HEIGHT + 20) * 40 + 39], BLACK);
    }

    #[test]
    fn text_is_drawn_in_blocks() {
        let mut fb = FrameBuffer::filled(20, 20, WHITE);
        draw_text_5x7(&mut fb, 0, 0, "l", BLACK, 2);
        // 'L' left column is lit; scale 2 makes it two pixels wide.
        assert_eq!(fb.pixels[0], BLACK);
        assert_eq!(fb.pixels[1], BLACK);
        assert_eq!(fb.pixels[2], WHITE);
        assert_eq!(text_width("ab", 2), 24);
    }
}
