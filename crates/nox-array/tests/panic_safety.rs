//! Element construction that panics must leave every array valid, with no
//! leaked or doubly dropped values.

use std::{
    cell::{Cell, RefCell},
    panic::{self, AssertUnwindSafe},
    rc::Rc,
};

use nox_array::{dynarr, DynArray};

#[derive(Default)]
struct Ledger {
    live: Cell<isize>,
    dropped: RefCell<Vec<usize>>,
    clones_left: Cell<Option<usize>>,
}

struct Tracked {
    id: usize,
    ledger: Rc<Ledger>,
}

impl Ledger {

    fn track(self: &Rc<Self>, id: usize) -> Tracked {
        self.live.set(self.live.get() + 1);
        Tracked { id, ledger: self.clone() }
    }

    fn allow_clones(&self, count: usize) {
        self.clones_left.set(Some(count));
    }

    fn take_dropped(&self) -> Vec<usize> {
        self.dropped.take()
    }
}

impl Clone for Tracked {

    fn clone(&self) -> Self {
        if let Some(left) = self.ledger.clones_left.get() {
            if left == 0 {
                panic!("clone budget exhausted")
            }
            self.ledger.clones_left.set(Some(left - 1));
        }
        self.ledger.track(self.id)
    }
}

impl Drop for Tracked {

    fn drop(&mut self) {
        self.ledger.live.set(self.ledger.live.get() - 1);
        self.ledger.dropped.borrow_mut().push(self.id);
    }
}

fn ids(arr: &DynArray<Tracked>) -> Vec<usize> {
    arr.iter().map(|tracked| tracked.id).collect()
}

fn filled(ledger: &Rc<Ledger>, len: usize) -> DynArray<Tracked> {
    let mut next = 0;
    DynArray::with_len_with(len, || {
        next += 1;
        ledger.track(next - 1)
    }).unwrap()
}

#[test]
fn drop_runs_in_increasing_order() {
    let ledger = Rc::new(Ledger::default());
    drop(filled(&ledger, 4));
    assert_eq!(ledger.take_dropped(), vec![0, 1, 2, 3]);
    assert_eq!(ledger.live.get(), 0);
}

#[test]
fn failed_constructor_unwinds_in_reverse() {
    let ledger = Rc::new(Ledger::default());
    let mut next = 0;
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        DynArray::with_len_with(5, || {
            if next == 3 {
                panic!("constructor failed")
            }
            next += 1;
            ledger.track(next - 1)
        })
    }));
    assert!(result.is_err());
    assert_eq!(ledger.take_dropped(), vec![2, 1, 0]);
    assert_eq!(ledger.live.get(), 0);
}

#[test]
fn failed_fill_drops_every_copy() {
    let ledger = Rc::new(Ledger::default());
    let value = ledger.track(7);
    ledger.allow_clones(2);
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        DynArray::with_len(5, value)
    }));
    assert!(result.is_err());
    assert_eq!(ledger.live.get(), 0);
}

#[test]
fn failed_copy_leaves_source_intact() {
    let ledger = Rc::new(Ledger::default());
    let source = filled(&ledger, 4);
    ledger.allow_clones(2);
    let result = panic::catch_unwind(AssertUnwindSafe(|| source.clone()));
    assert!(result.is_err());
    assert_eq!(ledger.live.get(), 4);
    assert_eq!(ids(&source), vec![0, 1, 2, 3]);
    assert_eq!(ledger.take_dropped(), vec![1, 0]);
}

#[test]
fn failed_copy_assignment_leaves_destination_empty() {
    let ledger = Rc::new(Ledger::default());
    let source = filled(&ledger, 3);
    let mut dest = filled(&ledger, 4);
    ledger.allow_clones(1);
    let result = panic::catch_unwind(AssertUnwindSafe(|| dest.clone_from(&source)));
    assert!(result.is_err());
    assert!(dest.is_empty());
    assert_eq!(dest.capacity(), 4);
    assert_eq!(ledger.live.get(), 3);
}

#[test]
fn failed_append_into_full_array_changes_nothing() {
    let ledger = Rc::new(Ledger::default());
    let mut arr = filled(&ledger, 3);
    let ptr = arr.as_ptr();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = arr.emplace_back_with(|| panic!("constructor failed"));
    }));
    assert!(result.is_err());
    assert_eq!(arr.len(), 3);
    assert_eq!(arr.capacity(), 3);
    assert_eq!(arr.as_ptr(), ptr);
    assert_eq!(ids(&arr), vec![0, 1, 2]);
    assert_eq!(ledger.live.get(), 3);
}

#[test]
fn failed_append_into_empty_array_allocates_nothing() {
    let mut arr = DynArray::<String>::new();
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = arr.emplace_back_with(|| panic!("constructor failed"));
    }));
    assert!(result.is_err());
    assert_eq!(arr.capacity(), 0);
    assert!(arr.as_ptr().is_null());
}

#[test]
fn failed_resize_within_capacity_keeps_len() {
    let ledger = Rc::new(Ledger::default());
    let mut arr = filled(&ledger, 2);
    arr.reserve(8).unwrap();
    let mut next = 10;
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = arr.resize_with(6, || {
            if next == 12 {
                panic!("constructor failed")
            }
            next += 1;
            ledger.track(next - 1)
        });
    }));
    assert!(result.is_err());
    assert_eq!(arr.len(), 2);
    assert_eq!(arr.capacity(), 8);
    assert_eq!(ledger.take_dropped(), vec![11, 10]);
    assert_eq!(ledger.live.get(), 2);
}

#[test]
fn failed_resize_past_capacity_rolls_back() {
    let ledger = Rc::new(Ledger::default());
    let mut arr = filled(&ledger, 3);
    let ptr = arr.as_ptr();
    let mut next = 3;
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let _ = arr.resize_with(7, || {
            if next == 4 {
                panic!("constructor failed")
            }
            next += 1;
            ledger.track(next - 1)
        });
    }));
    assert!(result.is_err());
    assert_eq!(arr.len(), 3);
    assert_eq!(arr.capacity(), 3);
    assert_eq!(arr.as_ptr(), ptr);
    assert_eq!(ids(&arr), vec![0, 1, 2]);
    assert_eq!(ledger.take_dropped(), vec![3]);
    assert_eq!(ledger.live.get(), 3);
}

#[test]
fn clear_and_truncate_drop_exactly_once() {
    let ledger = Rc::new(Ledger::default());
    let mut arr = filled(&ledger, 5);
    arr.truncate(3);
    assert_eq!(ledger.take_dropped(), vec![3, 4]);
    arr.clear();
    arr.clear();
    assert_eq!(ledger.take_dropped(), vec![0, 1, 2]);
    drop(arr);
    assert!(ledger.take_dropped().is_empty());
    assert_eq!(ledger.live.get(), 0);
}

#[test]
fn partially_consumed_into_iter_drops_the_rest() {
    let ledger = Rc::new(Ledger::default());
    let mut iter = filled(&ledger, 4).into_iter();
    let first = iter.next().unwrap();
    let last = iter.next_back().unwrap();
    let remaining: Vec<usize> = iter.as_slice().iter().map(|tracked| tracked.id).collect();
    assert_eq!(remaining, vec![1, 2]);
    assert!(ledger.take_dropped().is_empty());
    drop(iter);
    assert_eq!(ledger.take_dropped(), vec![1, 2]);
    assert_eq!((first.id, last.id), (0, 3));
}

#[test]
fn move_assignment_drops_old_contents() {
    let ledger = Rc::new(Ledger::default());
    let mut dest = filled(&ledger, 2);
    let mut source = dynarr![ledger.track(9)];
    dest.move_from(&mut source);
    assert_eq!(ledger.take_dropped(), vec![0, 1]);
    assert_eq!(ids(&dest), vec![9]);
    assert_eq!(source.capacity(), 0);
}
