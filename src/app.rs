// Application state: label entry, current stroke session, pending images.
// Everything the window does goes through one of these methods, so the whole
// painter can be driven without opening a window.
use crate::capture::{SampleOutcome, StrokeSession};
use crate::config::{LabelSwitchPolicy, PainterConfig};
use crate::error::Error;
use crate::label;
use crate::pointer::PointerAction;
use crate::store;
use crate::types::SymbolImage;
use log::{info, warn};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No label yet; the canvas ignores the pointer.
    SettingLabel,
    /// Strokes are captured under the active label.
    Painting,
}

pub struct App {
    config: PainterConfig,
    mode: Mode,
    entry: String,
    entry_editable: bool,
    label: Option<String>,
    session: StrokeSession,
    images: Vec<SymbolImage>,
    status: String,
}

impl App {
    pub fn new(config: PainterConfig) -> Self {
        let session = StrokeSession::new(config.canvas(), config.brush_radius());
        Self {
            config,
            mode: Mode::SettingLabel,
            entry: String::new(),
            entry_editable: true,
            label: None,
            session,
            images: Vec::new(),
            status: String::from("Type a symbol class and press Enter"),
        }
    }

    pub fn mode(&self) -> Mode { self.mode }
    pub fn entry(&self) -> &str { &self.entry }
    pub fn entry_editable(&self) -> bool { self.entry_editable }
    pub fn session(&self) -> &StrokeSession { &self.session }
    pub fn pending(&self) -> &[SymbolImage] { &self.images }
    pub fn status(&self) -> &str { &self.status }

    /// File the active label saves to.
    pub fn save_path(&self) -> Option<PathBuf> {
        self.label
            .as_deref()
            .map(|l| store::label_path(&self.config.directory, l))
    }

    fn report<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(e) = &result {
            warn!("{e}");
            self.status = e.to_string();
        }
        result
    }

    /* ---------- label entry ---------- */

    pub fn type_char(&mut self, c: char) {
        if self.entry_editable {
            self.entry.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.entry_editable {
            self.entry.pop();
        }
    }

    /// Unlock the entry so the label can be changed.
    pub fn edit_label(&mut self) {
        self.entry_editable = true;
    }

    /// Start (or switch to) the session named by the entry text.
    ///
    /// Pending images of the previous label are handled according to
    /// `on_label_switch`. A locked entry ignores Enter.
    pub fn submit_label(&mut self) -> Result<(), Error> {
        if !self.entry_editable {
            return Ok(());
        }
        let result = self.switch_label();
        self.report(result)
    }

    fn switch_label(&mut self) -> Result<(), Error> {
        let new_label = label::normalize(&self.entry)?;

        if self.mode == Mode::Painting {
            match self.config.on_label_switch {
                LabelSwitchPolicy::Save => {
                    self.save_pending()?;
                }
                LabelSwitchPolicy::Discard => {
                    if !self.images.is_empty() {
                        info!("discarding {} unsaved images", self.images.len());
                    }
                    self.images.clear();
                }
            }
            self.session.reset();
        }

        info!("symbol class set to {new_label:?}");
        self.entry = new_label.clone();
        self.entry_editable = false;
        self.label = Some(new_label);
        self.mode = Mode::Painting;
        if let Some(path) = self.save_path() {
            self.status = format!("Your image will be saved to: {}", path.display());
        }
        Ok(())
    }

    /* ---------- painting ---------- */

    /// One pointer position while the button is held (canvas coordinates).
    pub fn pointer_drag(&mut self, x: i32, y: i32) -> SampleOutcome {
        if self.mode != Mode::Painting {
            return SampleOutcome::Rejected;
        }
        self.session.record_sample(x, y)
    }

    /// Button released: turn the current stroke into an image.
    pub fn pointer_release(&mut self) -> Result<(), Error> {
        let result = self.finish_image();
        self.report(result)
    }

    fn finish_image(&mut self) -> Result<(), Error> {
        if self.mode != Mode::Painting {
            return Err(Error::LabelNotSet);
        }
        self.session.finalize(&mut self.images)?;
        self.status = format!("Image has been added ({} unsaved)", self.images.len());
        Ok(())
    }

    /// Apply one frame's pointer action. Failures end up in the status line.
    pub fn pointer(&mut self, action: PointerAction) -> SampleOutcome {
        match action {
            PointerAction::Sample(x, y) => return self.pointer_drag(x, y),
            PointerAction::Release => {
                self.pointer_release().ok();
            }
            PointerAction::EditLabel => self.edit_label(),
            PointerAction::None => {}
        }
        SampleOutcome::Rejected
    }

    /// Throw away the stroke in progress.
    pub fn clear_stroke(&mut self) {
        if !self.session.is_empty() {
            self.session.reset();
            self.status = String::from("Canvas cleared");
        }
    }

    /* ---------- persistence ---------- */

    /// Append pending images to the label's file. Returns the stored total.
    pub fn save(&mut self) -> Result<usize, Error> {
        let result = self.save_pending();
        self.report(result)
    }

    fn save_pending(&mut self) -> Result<usize, Error> {
        let path = self.save_path().ok_or(Error::LabelNotSet)?;
        let added = self.images.len();
        let total = store::append(&path, &self.images)?;
        self.images.clear();
        self.status = format!("Your data has been saved: {added} new, {total} in file");
        Ok(total)
    }

    /// Dump the label's stored images as PNG files.
    pub fn export(&mut self) -> Result<Vec<PathBuf>, Error> {
        let result = self.export_stored();
        self.report(result)
    }

    fn export_stored(&mut self) -> Result<Vec<PathBuf>, Error> {
        let label = self.label.clone().ok_or(Error::LabelNotSet)?;
        let files = store::export_png(&self.config.directory, &label)?;
        self.status = format!("Exported {} images", files.len());
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::PointerTracker;
    use tempfile::TempDir;

    fn app(dir: &TempDir, policy: LabelSwitchPolicy) -> App {
        App::new(PainterConfig {
            directory: dir.path().to_path_buf(),
            on_label_switch: policy,
            ..Default::default()
        })
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.type_char(c);
        }
    }

    fn start(app: &mut App, label: &str) {
        while !app.entry().is_empty() {
            app.backspace();
        }
        type_text(app, label);
        app.submit_label().unwrap();
    }

    fn draw_image(app: &mut App, x: i32) {
        app.pointer_drag(x, 100);
        app.pointer_drag(x, 140);
        app.pointer_release().unwrap();
    }

    #[test]
    fn empty_label_keeps_entry_open() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Save);
        type_text(&mut app, "   ");
        assert!(matches!(app.submit_label(), Err(Error::EmptyLabel)));
        assert_eq!(app.mode(), Mode::SettingLabel);
        assert!(app.entry_editable());
        assert_eq!(app.status(), Error::EmptyLabel.to_string());
    }

    #[test]
    fn label_is_normalized_and_entry_locked() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Save);
        type_text(&mut app, " c a t ");
        app.submit_label().unwrap();

        assert_eq!(app.label.as_deref(), Some("cat"));
        assert_eq!(app.mode(), Mode::Painting);
        assert!(!app.entry_editable());
        assert_eq!(app.save_path().unwrap(), dir.path().join("cat.symb"));

        app.type_char('x');
        assert_eq!(app.entry(), "cat");
        app.edit_label();
        app.type_char('s');
        assert_eq!(app.entry(), "cats");
    }

    #[test]
    fn painting_needs_a_label() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Save);
        assert_eq!(app.pointer_drag(100, 100), SampleOutcome::Rejected);
        assert!(matches!(app.pointer_release(), Err(Error::LabelNotSet)));
        assert!(matches!(app.save(), Err(Error::LabelNotSet)));
        assert!(app.pending().is_empty());
    }

    #[test]
    fn release_without_drag_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Save);
        start(&mut app, "cat");
        assert!(matches!(app.pointer_release(), Err(Error::EmptyStroke)));
        assert_eq!(app.pending().len(), 0);
    }

    fn drive(app: &mut App, tracker: &mut PointerTracker, frames: &[(bool, i32, i32)]) {
        for &(down, x, y) in frames {
            app.pointer(tracker.update(down, Some((x, y))));
        }
    }

    #[test]
    fn click_without_drag_adds_no_image() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Save);
        start(&mut app, "cat");
        let mut tracker = PointerTracker::new(32, 500);

        drive(&mut app, &mut tracker, &[(true, 200, 232), (false, 200, 232)]);
        assert_eq!(app.status(), Error::EmptyStroke.to_string());
        assert_eq!(app.pending().len(), 0);
    }

    #[test]
    fn press_move_release_adds_one_image() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Save);
        start(&mut app, "cat");
        let mut tracker = PointerTracker::new(32, 500);

        drive(
            &mut app,
            &mut tracker,
            &[(true, 200, 232), (true, 200, 250), (true, 200, 270), (false, 200, 270)],
        );
        assert_eq!(app.pending().len(), 1);
        assert!(app.session().is_empty());
    }

    #[test]
    fn header_click_unlocks_entry_without_finalizing() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Save);
        start(&mut app, "cat");
        let status = app.status().to_string();
        let mut tracker = PointerTracker::new(32, 500);

        drive(&mut app, &mut tracker, &[(true, 40, 10), (true, 40, 200), (false, 40, 200)]);
        assert!(app.entry_editable());
        assert!(app.session().is_empty());
        assert_eq!(app.status(), status);
    }

    #[test]
    fn each_release_adds_one_image() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Save);
        start(&mut app, "cat");
        draw_image(&mut app, 100);
        draw_image(&mut app, 200);
        assert_eq!(app.pending().len(), 2);
        assert!(app.session().is_empty());
    }

    #[test]
    fn clear_stroke_drops_samples_without_image() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Save);
        start(&mut app, "cat");
        app.pointer_drag(100, 100);
        app.clear_stroke();
        assert!(app.session().is_empty());
        assert!(matches!(app.pointer_release(), Err(Error::EmptyStroke)));
        assert!(app.pending().is_empty());
    }

    #[test]
    fn save_writes_pending_and_clears_them() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Save);
        start(&mut app, "dog");
        draw_image(&mut app, 100);
        draw_image(&mut app, 300);
        let pending = app.pending().to_vec();

        assert_eq!(app.save().unwrap(), 2);
        assert!(app.pending().is_empty());
        let path = dir.path().join("dog.symb");
        assert_eq!(store::load(&path).unwrap(), pending);

        // Saving again with nothing new does not duplicate.
        assert_eq!(app.save().unwrap(), 2);
        draw_image(&mut app, 200);
        assert_eq!(app.save().unwrap(), 3);
    }

    #[test]
    fn switching_label_saves_under_save_policy() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Save);
        start(&mut app, "cat");
        draw_image(&mut app, 100);

        app.edit_label();
        start(&mut app, "dog");
        assert_eq!(app.label.as_deref(), Some("dog"));
        assert!(app.pending().is_empty());
        assert_eq!(store::load(&dir.path().join("cat.symb")).unwrap().len(), 1);
    }

    #[test]
    fn switching_label_drops_images_under_discard_policy() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Discard);
        start(&mut app, "cat");
        draw_image(&mut app, 100);
        app.pointer_drag(250, 250);

        app.edit_label();
        start(&mut app, "dog");
        assert!(app.pending().is_empty());
        assert!(app.session().is_empty());
        assert!(!dir.path().join("cat.symb").exists());
    }

    #[test]
    fn failed_save_keeps_old_label_active() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Save);
        start(&mut app, "cat");
        draw_image(&mut app, 100);
        std::fs::write(dir.path().join("cat.symb"), b"junk").unwrap();

        app.edit_label();
        type_text(&mut app, "x");
        assert!(matches!(app.submit_label(), Err(Error::Format { .. })));
        assert_eq!(app.label.as_deref(), Some("cat"));
        assert_eq!(app.pending().len(), 1);
    }

    #[test]
    fn export_writes_stored_images() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir, LabelSwitchPolicy::Save);
        start(&mut app, "cat");
        draw_image(&mut app, 100);
        app.save().unwrap();

        let files = app.export().unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with(dir.path().join("cat")));
    }
}
