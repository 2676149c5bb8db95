// Stroke rasterizer: turns a session's samples into one finished symbol.
// Visual expectation: the saved bitmap looks exactly like the black strokes
// you saw on the canvas, brush discs plus the bridges between them.
use crate::geometry::{bridge, disc_covers, quad_bounds, quad_covers, Quad};
use crate::types::{BoundingBox, CanvasSize, Sample, SymbolImage, INK, PAPER};
use image::Luma;

/// Precomputed hard-edged disc we stamp at every sample.
pub struct DiscStamp {
    pub radius: i32,    // pixels from center to edge
    pub mask: Vec<bool>, // (2r+1)*(2r+1), true where the disc covers the cell
}

/// Build the disc stamp once per brush radius.
pub fn make_disc_stamp(radius: i32) -> DiscStamp {
    let d = 2 * radius + 1;
    let mut mask = Vec::with_capacity((d * d) as usize);
    for y in -radius..=radius {
        for x in -radius..=radius {
            mask.push(disc_covers(0, 0, radius, x, y));
        }
    }
    DiscStamp { radius, mask }
}

/// Call `plot` for every pixel the stamp covers at (cx, cy) inside `clip`.
pub fn for_each_disc_pixel(
    stamp: &DiscStamp,
    cx: i32,
    cy: i32,
    clip: &BoundingBox,
    mut plot: impl FnMut(u32, u32),
) {
    let r = stamp.radius;
    let d = 2 * r + 1;
    for ky in 0..d {
        for kx in 0..d {
            let sx = cx + kx - r;
            let sy = cy + ky - r;
            if !clip.contains(sx, sy) { continue; }
            if stamp.mask[(ky * d + kx) as usize] {
                plot(sx as u32, sy as u32);
            }
        }
    }
}

/// Call `plot` for every pixel of the quad inside `clip`.
pub fn for_each_quad_pixel(quad: &Quad, clip: &BoundingBox, mut plot: impl FnMut(u32, u32)) {
    let (l, t, r, b) = quad_bounds(quad);
    let area = clip.intersect(&BoundingBox { top: t, bottom: b, left: l, right: r });
    if area.is_empty() {
        return;
    }
    for y in area.top..=area.bottom {
        for x in area.left..=area.right {
            if quad_covers(quad, x, y) {
                plot(x as u32, y as u32);
            }
        }
    }
}

/// Bridges between every pair of consecutive samples whose discs leave a gap.
pub fn bridges(samples: &[Sample], radius: i32) -> impl Iterator<Item = Quad> + '_ {
    samples
        .windows(2)
        .filter_map(move |w| bridge(w[1].x, w[1].y, w[0].x, w[0].y, radius).ok())
}

/// Rasterize a finished session into a canvas-sized bitmap.
///
/// Only pixels within `bounds` grown by the brush radius are touched; the
/// rest of the canvas stays paper. An empty sample list yields a blank canvas.
pub fn rasterize(
    samples: &[Sample],
    bounds: &BoundingBox,
    canvas: CanvasSize,
    radius: i32,
) -> SymbolImage {
    let mut img = SymbolImage::from_pixel(canvas.width, canvas.height, Luma([PAPER]));
    if samples.is_empty() || bounds.is_empty() {
        return img;
    }

    let clip = bounds.inflated(radius).intersect(&BoundingBox::full(canvas));
    let stamp = make_disc_stamp(radius);

    for s in samples {
        for_each_disc_pixel(&stamp, s.x, s.y, &clip, |x, y| img.put_pixel(x, y, Luma([INK])));
    }
    for quad in bridges(samples, radius) {
        for_each_quad_pixel(&quad, &clip, |x, y| img.put_pixel(x, y, Luma([INK])));
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(points: &[(i32, i32)], canvas: CanvasSize) -> (Vec<Sample>, BoundingBox) {
        let mut bounds = BoundingBox::empty(canvas);
        let samples = points
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| {
                bounds.include(x, y);
                Sample { x, y, index: i as u32 }
            })
            .collect();
        (samples, bounds)
    }

    fn ink(img: &SymbolImage, x: u32, y: u32) -> bool {
        img.get_pixel(x, y).0[0] == INK
    }

    #[test]
    fn stamp_is_a_filled_disc() {
        let s = make_disc_stamp(2);
        assert_eq!(s.mask.len(), 25);
        assert_eq!(s.mask.iter().filter(|c| **c).count(), 13);
        assert!(s.mask[12]); // center
        assert!(!s.mask[0]); // corner
    }

    #[test]
    fn output_is_always_canvas_sized() {
        let canvas = CanvasSize::new(64, 48);
        let (samples, bounds) = session(&[(20, 20)], canvas);
        let img = rasterize(&samples, &bounds, canvas, 3);
        assert_eq!(img.dimensions(), (64, 48));
    }

    #[test]
    fn single_sample_paints_one_disc() {
        let canvas = CanvasSize::new(50, 50);
        let (samples, bounds) = session(&[(20, 20)], canvas);
        let img = rasterize(&samples, &bounds, canvas, 5);

        assert!(ink(&img, 20, 20));
        assert!(ink(&img, 25, 20));
        assert!(ink(&img, 23, 24));
        assert!(!ink(&img, 26, 20));
        assert!(!ink(&img, 24, 24));
        let inked = img.pixels().filter(|p| p.0[0] == INK).count();
        assert_eq!(inked, make_disc_stamp(5).mask.iter().filter(|c| **c).count());
    }

    #[test]
    fn gaps_between_samples_are_bridged() {
        let canvas = CanvasSize::new(500, 500);
        let (samples, bounds) = session(&[(100, 100), (100, 115), (100, 130)], canvas);
        let img = rasterize(&samples, &bounds, canvas, 5);

        // Between the discs, outside both circles, inside the band.
        assert!(ink(&img, 103, 107));
        assert!(ink(&img, 97, 123));
        assert!(ink(&img, 100, 135));
        assert!(!ink(&img, 100, 136));
        assert!(!ink(&img, 106, 110));
        assert!(!ink(&img, 0, 0));
    }

    #[test]
    fn only_background_outside_inflated_bounds() {
        let canvas = CanvasSize::new(200, 200);
        let (samples, bounds) = session(&[(50, 50), (90, 80)], canvas);
        let img = rasterize(&samples, &bounds, canvas, 4);
        let area = bounds.inflated(4);
        for (x, y, p) in img.enumerate_pixels() {
            if !area.contains(x as i32, y as i32) {
                assert_eq!(p.0[0], PAPER, "stray ink at ({x}, {y})");
            }
        }
        assert!(ink(&img, 70, 65));
    }

    #[test]
    fn empty_samples_give_blank_canvas() {
        let canvas = CanvasSize::new(10, 10);
        let img = rasterize(&[], &BoundingBox::empty(canvas), canvas, 2);
        assert!(img.pixels().all(|p| p.0[0] == PAPER));
    }
}
