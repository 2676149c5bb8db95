// Stroke capture: pointer-drag samples in, indexed samples + bounding box out.
// Visual: each accepted sample is one black circle on the canvas; when two
// circles are too far apart, a bridge polygon joins them.
use crate::geometry::{bridge, NoBridge, Quad};
use crate::raster::rasterize;
use crate::types::{BoundingBox, CanvasSize, Sample, SymbolImage};
use log::{debug, info};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CaptureError {
    /// Released without a single accepted sample.
    #[error("empty stroke")]
    EmptyStroke,
}

impl From<CaptureError> for crate::error::Error {
    fn from(e: CaptureError) -> Self {
        match e {
            CaptureError::EmptyStroke => crate::error::Error::EmptyStroke,
        }
    }
}

/// What happened to one pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// The brush would poke out of the canvas; nothing recorded.
    Rejected,
    /// Recorded. `bridge` is the quad joining it to the previous sample, if any.
    Accepted { sample: Sample, bridge: Option<Quad> },
}

/// State of the image currently being drawn.
#[derive(Debug, Clone)]
pub struct StrokeSession {
    canvas: CanvasSize,
    radius: i32,
    samples: Vec<Sample>,
    next_index: u32,
    bounds: BoundingBox,
}

impl StrokeSession {
    pub fn new(canvas: CanvasSize, radius: i32) -> Self {
        Self {
            canvas,
            radius,
            samples: Vec::new(),
            next_index: 0,
            bounds: BoundingBox::empty(canvas),
        }
    }

    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// Offer one pointer position (canvas coordinates).
    pub fn record_sample(&mut self, x: i32, y: i32) -> SampleOutcome {
        if !self.canvas.contains_disc(x, y, self.radius) {
            debug!("sample ({x}, {y}) off canvas, dropped");
            return SampleOutcome::Rejected;
        }

        self.bounds.include(x, y);

        let bridge = match self.samples.last() {
            Some(prev) => self.interpolate(x, y, prev.x, prev.y),
            None => None,
        };

        let sample = Sample { x, y, index: self.next_index };
        debug!("sample #{} at ({x}, {y})", sample.index);
        self.samples.push(sample);
        self.next_index += 1;

        SampleOutcome::Accepted { sample, bridge }
    }

    /// Bridge quad between the previous and current point, if the discs leave a gap.
    pub fn interpolate(&self, x: i32, y: i32, x_prev: i32, y_prev: i32) -> Option<Quad> {
        match bridge(x, y, x_prev, y_prev, self.radius) {
            Ok(quad) => Some(quad),
            Err(NoBridge::Coincident) => {
                debug!("repeated sample at ({x}, {y}), nothing to interpolate");
                None
            }
            Err(NoBridge::Overlapping) => None,
        }
    }

    /// Rasterize the session into `collection` and start a fresh one.
    ///
    /// A session without samples is rejected and leaves `collection` untouched.
    pub fn finalize(&mut self, collection: &mut Vec<SymbolImage>) -> Result<(), CaptureError> {
        if self.samples.is_empty() {
            return Err(CaptureError::EmptyStroke);
        }

        let img = rasterize(&self.samples, &self.bounds, self.canvas, self.radius);
        info!(
            "image finalized from {} samples, bounds {:?}",
            self.samples.len(),
            self.bounds
        );
        collection.push(img);
        self.reset();
        Ok(())
    }

    /// Drop the unfinished image.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.next_index = 0;
        self.bounds = BoundingBox::empty(self.canvas);
    }
}
