// Bridge geometry between two consecutive brush discs.
// Visual: when the mouse moves faster than one brush width per event, the
// circles leave gaps; the bridge quad fills the band between them.

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Four corners, in winding order.
pub type Quad = [Point; 4];

/// Why no bridge was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoBridge {
    /// Both points are the same pixel; there is no direction of travel.
    Coincident,
    /// The discs already touch or overlap.
    Overlapping,
}

/// Quad joining the outer edges of the discs at (x_prev, y_prev) and (x, y).
///
/// Corners are `prev + r·n, cur + r·n, cur - r·n, prev - r·n`, where `n` is the
/// unit normal to the direction of travel. Only produced when the centers are
/// more than `radius` apart.
pub fn bridge(x: i32, y: i32, x_prev: i32, y_prev: i32, radius: i32) -> Result<Quad, NoBridge> {
    if x == x_prev && y == y_prev {
        return Err(NoBridge::Coincident);
    }

    let dx = (x - x_prev) as f32;
    let dy = (y - y_prev) as f32;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist <= radius as f32 {
        return Err(NoBridge::Overlapping);
    }

    let r = radius as f32;
    let nx = -dy / dist * r;
    let ny = dx / dist * r;
    let (px, py) = (x_prev as f32, y_prev as f32);
    let (cx, cy) = (x as f32, y as f32);

    Ok([
        Point::new(px + nx, py + ny),
        Point::new(cx + nx, cy + ny),
        Point::new(cx - nx, cy - ny),
        Point::new(px - nx, py - ny),
    ])
}

/// Pixel (px, py) lies inside the disc of radius `r` centered at (cx, cy).
#[inline]
pub fn disc_covers(cx: i32, cy: i32, r: i32, px: i32, py: i32) -> bool {
    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy <= r * r
}

/// Pixel (px, py) lies inside (or on the edge of) the convex quad.
pub fn quad_covers(quad: &Quad, px: i32, py: i32) -> bool {
    const EPS: f32 = 1e-3;
    let (x, y) = (px as f32, py as f32);
    let mut pos = false;
    let mut neg = false;
    for i in 0..4 {
        let a = quad[i];
        let b = quad[(i + 1) % 4];
        let cross = (b.x - a.x) * (y - a.y) - (b.y - a.y) * (x - a.x);
        if cross > EPS { pos = true; }
        if cross < -EPS { neg = true; }
        if pos && neg { return false; }
    }
    true
}

/// Integer pixel bounds (left, top, right, bottom) enclosing the quad.
pub fn quad_bounds(quad: &Quad) -> (i32, i32, i32, i32) {
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for p in quad {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    (min_x.floor() as i32, min_y.floor() as i32, max_x.ceil() as i32, max_y.ceil() as i32)
}
