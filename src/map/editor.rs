//! Interactive drawing of a single road geometry.
//!
//! The host activates the editor while a form needs a geometry and gets a
//! [`DrawingSession`] back. The session owns the drawing surface's events:
//! finishing a shape encodes it and hands the text to the host callback,
//! removing it hands over `""`. Only one drawn shape exists at a time, and
//! dropping the session detaches the callback and clears the shape, so no
//! state leaks into the next activation.

use std::cell::RefCell;
use std::rc::Rc;

use geo_types::{Coord, LineString};

use crate::codec;

type PathCallback = Box<dyn FnMut(&str)>;

#[derive(Default)]
struct EditorState {
    generation: u64,
    drawn: Option<LineString<f64>>,
    on_change: Option<PathCallback>,
}

#[derive(Default)]
pub struct GeometryEditor {
    state: Rc<RefCell<EditorState>>,
}

impl GeometryEditor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Starts a drawing session. Any earlier session is invalidated: its
    /// handle turns inert and its drawn shape is discarded.
    pub fn activate(&self, on_change: impl FnMut(&str) + 'static) -> DrawingSession {
        let mut state = self.state.borrow_mut();

        state.generation += 1;
        state.drawn = None;
        state.on_change = Some(Box::new(on_change));

        DrawingSession {
            state: Rc::clone(&self.state),
            generation: state.generation,
        }
    }

    /// Detaches the current session without starting a new one. Its
    /// handle turns inert; the host keeps whatever geometry it was told
    /// about last.
    pub fn deactivate(&self) {
        let mut state = self.state.borrow_mut();

        state.generation += 1;
        state.drawn = None;
        state.on_change = None;
    }

    pub fn has_drawn_shape(&self) -> bool {
        self.state.borrow().drawn.is_some()
    }
}

pub struct DrawingSession {
    state: Rc<RefCell<EditorState>>,
    generation: u64,
}

impl DrawingSession {
    /// Takes a finished shape from the drawing surface. Coordinates arrive
    /// in (lon, lat) order, the way GeoJSON-speaking surfaces emit them;
    /// the swap into the internal convention happens here.
    ///
    /// A shape the surface could not serialize into a line (fewer than two
    /// points) reports `""` instead of failing, so the host form stays
    /// usable and the user can redraw.
    pub fn complete_shape(&self, raw_coords: &[[f64; 2]]) {
        {
            let mut state = self.state.borrow_mut();
            if state.generation != self.generation {
                return;
            }

            if raw_coords.len() < 2 {
                state.drawn = None;
            } else {
                let path = LineString::new(
                    raw_coords
                        .iter()
                        .map(|c| Coord { x: c[0], y: c[1] })
                        .collect(),
                );
                // Replaces any shape drawn earlier in this session
                state.drawn = Some(path);
            }
        }

        let encoded = self
            .state
            .borrow()
            .drawn
            .as_ref()
            .map(codec::encode)
            .unwrap_or_default();
        self.emit(&encoded);
    }

    /// The user deleted the drawn shape; the host hears "path cleared".
    pub fn remove_shape(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.generation != self.generation {
                return;
            }
            state.drawn = None;
        }

        self.emit("");
    }

    // The callback runs outside the borrow so it may call back into the
    // editor without tripping the RefCell.
    fn emit(&self, encoded: &str) {
        let callback = {
            let mut state = self.state.borrow_mut();
            if state.generation != self.generation {
                return;
            }
            state.on_change.take()
        };

        if let Some(mut callback) = callback {
            callback(encoded);

            let mut state = self.state.borrow_mut();
            if state.generation == self.generation && state.on_change.is_none() {
                state.on_change = Some(callback);
            }
        }
    }
}

impl Drop for DrawingSession {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();

        if state.generation == self.generation {
            state.drawn = None;
            state.on_change = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorded() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str)) {
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |encoded: &str| {
            sink.borrow_mut().push(encoded.to_string())
        })
    }

    const LINE_A: [[f64; 2]; 2] = [[115.188919, -8.409518], [115.19, -8.41]];
    const LINE_B: [[f64; 2]; 3] = [[115.20, -8.42], [115.21, -8.43], [115.22, -8.44]];

    #[test]
    fn completing_a_shape_reports_its_encoding() {
        let editor = GeometryEditor::new();
        let (seen, callback) = recorded();

        let session = editor.activate(callback);
        session.complete_shape(&LINE_A);

        let reported = seen.borrow();
        assert_eq!(reported.len(), 1);

        // The callback got (lat, lon) semantics back out
        let decoded = codec::decode(&reported[0]).unwrap();
        assert!((decoded.0[0].y - -8.409518).abs() <= 1e-5);
        assert!((decoded.0[0].x - 115.188919).abs() <= 1e-5);
    }

    #[test]
    fn second_shape_replaces_the_first() {
        let editor = GeometryEditor::new();
        let (seen, callback) = recorded();

        let session = editor.activate(callback);
        session.complete_shape(&LINE_A);
        session.complete_shape(&LINE_B);

        assert!(editor.has_drawn_shape());

        let reported = seen.borrow();
        assert_eq!(reported.len(), 2);
        let current = codec::decode(&reported[1]).unwrap();
        assert_eq!(current.0.len(), 3);
    }

    #[test]
    fn removal_reports_an_empty_path() {
        let editor = GeometryEditor::new();
        let (seen, callback) = recorded();

        let session = editor.activate(callback);
        session.complete_shape(&LINE_A);
        session.remove_shape();

        assert!(!editor.has_drawn_shape());
        assert_eq!(seen.borrow().last().unwrap(), "");
    }

    #[test]
    fn unserializable_shape_reports_an_empty_path() {
        let editor = GeometryEditor::new();
        let (seen, callback) = recorded();

        let session = editor.activate(callback);
        session.complete_shape(&[[115.2, -8.4]]);

        assert!(!editor.has_drawn_shape());
        assert_eq!(seen.borrow().as_slice(), ["".to_string()]);
    }

    #[test]
    fn dropping_the_session_clears_everything() {
        let editor = GeometryEditor::new();
        let (seen, callback) = recorded();

        let session = editor.activate(callback);
        session.complete_shape(&LINE_A);
        drop(session);

        assert!(!editor.has_drawn_shape());
        // No "cleared" event fires on detach; the host initiated it
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn deactivation_turns_the_session_inert() {
        let editor = GeometryEditor::new();
        let (seen, callback) = recorded();

        let session = editor.activate(callback);
        session.complete_shape(&LINE_A);
        editor.deactivate();

        session.complete_shape(&LINE_B);
        session.remove_shape();

        assert!(!editor.has_drawn_shape());
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn reactivation_invalidates_the_old_session() {
        let editor = GeometryEditor::new();
        let (seen_old, callback_old) = recorded();
        let (seen_new, callback_new) = recorded();

        let stale = editor.activate(callback_old);
        let active = editor.activate(callback_new);

        stale.complete_shape(&LINE_A);
        assert!(seen_old.borrow().is_empty());
        assert!(!editor.has_drawn_shape());

        active.complete_shape(&LINE_B);
        assert_eq!(seen_new.borrow().len(), 1);
        assert!(editor.has_drawn_shape());
    }
}
