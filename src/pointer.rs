// Pointer handling: turns polled button/position state into press, motion
// and release actions. minifb only reports the current state, so edges and
// movement are derived here, away from the window.
use log::debug;

/// What one frame of pointer state asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    None,
    /// Press landed on the header.
    EditLabel,
    /// The pointer moved while held on the canvas (canvas coordinates).
    Sample(i32, i32),
    /// A canvas stroke ended.
    Release,
}

#[derive(Debug, Clone)]
pub struct PointerTracker {
    header_height: i32,
    canvas_height: i32,
    was_down: bool,
    /// The current press started on the canvas.
    on_canvas: bool,
    last_pos: Option<(i32, i32)>,
}

impl PointerTracker {
    pub fn new(header_height: i32, canvas_height: i32) -> Self {
        Self {
            header_height,
            canvas_height,
            was_down: false,
            on_canvas: false,
            last_pos: None,
        }
    }

    /// Feed one frame. `pos` is in window coordinates, `None` outside the window.
    pub fn update(&mut self, down: bool, pos: Option<(i32, i32)>) -> PointerAction {
        let pressed = down && !self.was_down;
        let released = !down && self.was_down;
        self.was_down = down;

        if pressed {
            return self.press(pos);
        }

        if released {
            let action = if self.on_canvas { PointerAction::Release } else { PointerAction::None };
            self.on_canvas = false;
            self.last_pos = None;
            return action;
        }

        if down && self.on_canvas {
            if let Some((mx, my)) = pos {
                let p = (mx, my - self.header_height);
                if self.last_pos != Some(p) {
                    self.last_pos = Some(p);
                    return PointerAction::Sample(p.0, p.1);
                }
            }
        }
        PointerAction::None
    }

    // A press only arms the stroke; samples come from motion after it.
    fn press(&mut self, pos: Option<(i32, i32)>) -> PointerAction {
        match pos {
            Some((_, my)) if my < self.header_height => {
                self.on_canvas = false;
                PointerAction::EditLabel
            }
            Some((mx, my)) if my < self.header_height + self.canvas_height => {
                debug!("press on canvas at ({mx}, {})", my - self.header_height);
                self.on_canvas = true;
                self.last_pos = Some((mx, my - self.header_height));
                PointerAction::None
            }
            _ => {
                self.on_canvas = false;
                PointerAction::None
            }
        }
    }
}
