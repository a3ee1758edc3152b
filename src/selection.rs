//! Single-slot selection shared between the table view and the map view.
//!
//! The slot is last-write-wins and lives for the process; views that care
//! about changes subscribe instead of polling, so a store instance can be
//! handed to any number of independent views.

use crate::data_types::road::segment::RuasJalan;

pub type SelectionObserver = Box<dyn FnMut(Option<&RuasJalan>)>;

#[derive(Default)]
pub struct SelectionStore {
    current: Option<RuasJalan>,
    observers: Vec<SelectionObserver>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn current(&self) -> Option<&RuasJalan> {
        self.current.as_ref()
    }

    /// Replaces whatever was selected before.
    pub fn select(&mut self, ruas: RuasJalan) {
        self.current = Some(ruas);
        self.notify();
    }

    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            self.notify();
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(Option<&RuasJalan>) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self) {
        let current = self.current.clone();

        for observer in self.observers.iter_mut() {
            observer(current.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ruas(id: i64) -> RuasJalan {
        RuasJalan {
            id,
            nama_ruas: format!("ruas {}", id),
            ..Default::default()
        }
    }

    #[test]
    fn last_write_wins() {
        let mut store = SelectionStore::new();

        store.select(ruas(1));
        store.select(ruas(2));

        assert_eq!(store.current().unwrap().id, 2);
    }

    #[test]
    fn observers_see_every_change() {
        let seen: Rc<RefCell<Vec<Option<i64>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut store = SelectionStore::new();
        store.subscribe(move |selected| {
            sink.borrow_mut().push(selected.map(|r| r.id));
        });

        store.select(ruas(7));
        store.select(ruas(9));
        store.clear();

        assert_eq!(*seen.borrow(), vec![Some(7), Some(9), None]);
    }

    #[test]
    fn clearing_an_empty_slot_is_silent() {
        let fired = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&fired);

        let mut store = SelectionStore::new();
        store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.clear();

        assert_eq!(*fired.borrow(), 0);
    }
}
