// Core types shared by capture, rasterizer, storage and the window.

use image::GrayImage;

/// Intensity of painted pixels in a finished symbol.
pub const INK: u8 = 0;
/// Intensity of untouched pixels in a finished symbol.
pub const PAPER: u8 = 255;

/// A finished symbol: canvas-sized, black strokes on white.
pub type SymbolImage = GrayImage;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer filled with one color.
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self { width, height, pixels: vec![color; width * height] }
    }

    pub fn fill(&mut self, color: u32) {
        for p in &mut self.pixels { *p = color; }
    }
}

/// Fixed drawing surface size, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when a brush disc of radius `r` at (x, y) lies inside the canvas.
    /// The bottom edge is exclusive, the right edge inclusive.
    pub fn contains_disc(&self, x: i32, y: i32, r: i32) -> bool {
        let w = self.width as i32;
        let h = self.height as i32;
        0 <= x - r && x + r <= w - 1 && 0 <= y - r && y + r < h - 1
    }
}

/// One accepted pointer sample, numbered in capture order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub x: i32,
    pub y: i32,
    pub index: u32,
}

/// Minimal rectangle around every sample of a session (inclusive edges).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl BoundingBox {
    /// Inverted extents, so the first sample always tightens every edge.
    pub fn empty(canvas: CanvasSize) -> Self {
        Self {
            top: canvas.height as i32,
            bottom: -1,
            left: canvas.width as i32,
            right: -1,
        }
    }

    /// The whole canvas.
    pub fn full(canvas: CanvasSize) -> Self {
        Self {
            top: 0,
            bottom: canvas.height as i32 - 1,
            left: 0,
            right: canvas.width as i32 - 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top > self.bottom || self.left > self.right
    }

    pub fn include(&mut self, x: i32, y: i32) {
        self.top = self.top.min(y);
        self.bottom = self.bottom.max(y);
        self.left = self.left.min(x);
        self.right = self.right.max(x);
    }

    /// Grow every edge by `r` (the painted extent for brush radius `r`).
    pub fn inflated(&self, r: i32) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            top: self.top - r,
            bottom: self.bottom + r,
            left: self.left - r,
            right: self.right + r,
        }
    }

    pub fn intersect(&self, other: &BoundingBox) -> Self {
        Self {
            top: self.top.max(other.top),
            bottom: self.bottom.min(other.bottom),
            left: self.left.max(other.left),
            right: self.right.min(other.right),
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.left <= x && x <= self.right && self.top <= y && y <= self.bottom
    }
}
