//! Moves the viewport to whichever segment the table selects.

use std::cell::RefCell;
use std::rc::Rc;

use crate::codec;
use crate::map::Viewport;
use crate::selection::SelectionStore;
use crate::util::geo::GeoBounds;

pub struct SelectionFocus;

impl SelectionFocus {
    /// Breathing room around the focused segment, in pixels per side.
    pub const PADDING_PX: u32 = 50;

    /// Subscribes the viewport to the store. Purely reactive: the store is
    /// never written from here. Deselection and undecodable or degenerate
    /// geometry leave the viewport exactly where it was; the highlight
    /// vanishing is the layer's business.
    pub fn attach(store: &mut SelectionStore, viewport: Rc<RefCell<Viewport>>) {
        store.subscribe(move |selected| {
            let Some(ruas) = selected else {
                return;
            };

            let Ok(path) = codec::decode(&ruas.paths) else {
                return;
            };
            if path.0.len() < 2 {
                return;
            }

            if let Some(bounds) = GeoBounds::from_coords(path.0.iter().copied()) {
                viewport
                    .borrow_mut()
                    .fit_bounds(&bounds, Self::PADDING_PX);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::road::segment::RuasJalan;
    use geo_types::{Coord, LineString};

    fn ruas_with_path(id: i64, points: &[(f64, f64)]) -> RuasJalan {
        RuasJalan {
            id,
            paths: codec::encode(&LineString::new(
                points.iter().map(|p| Coord { x: p.1, y: p.0 }).collect(),
            )),
            ..Default::default()
        }
    }

    #[test]
    fn selecting_fits_the_viewport_with_padding() {
        let mut store = SelectionStore::new();
        let viewport = Rc::new(RefCell::new(Viewport::new(1280, 720)));
        SelectionFocus::attach(&mut store, Rc::clone(&viewport));

        let ruas = ruas_with_path(1, &[(-8.40, 115.18), (-8.43, 115.22)]);
        store.select(ruas.clone());

        let mut expected = Viewport::new(1280, 720);
        let bounds =
            GeoBounds::from_coords(codec::decode(&ruas.paths).unwrap().0.iter().copied()).unwrap();
        expected.fit_bounds(&bounds, SelectionFocus::PADDING_PX);

        assert_eq!(*viewport.borrow(), expected);
    }

    #[test]
    fn deselecting_keeps_the_prior_viewport() {
        let mut store = SelectionStore::new();
        let viewport = Rc::new(RefCell::new(Viewport::new(1280, 720)));
        SelectionFocus::attach(&mut store, Rc::clone(&viewport));

        store.select(ruas_with_path(1, &[(-8.40, 115.18), (-8.43, 115.22)]));
        let focused = viewport.borrow().clone();

        store.clear();

        assert_eq!(*viewport.borrow(), focused);
    }

    #[test]
    fn bad_geometry_never_moves_the_viewport() {
        let mut store = SelectionStore::new();
        let viewport = Rc::new(RefCell::new(Viewport::new(1280, 720)));
        SelectionFocus::attach(&mut store, Rc::clone(&viewport));

        let before = viewport.borrow().clone();

        let mut broken = ruas_with_path(1, &[]);
        broken.paths = "!!! not encoded".into();
        store.select(broken);
        assert_eq!(*viewport.borrow(), before);

        // A single point cannot be framed as a line either
        store.select(ruas_with_path(2, &[(-8.40, 115.18)]));
        assert_eq!(*viewport.borrow(), before);
    }
}
