//! This module is for testing only

use std::cell::Cell;
use std::rc::Rc;

/// Shared counter that `Tracked` values bump when dropped.
pub type DropCount = Rc<Cell<usize>>;

pub fn drop_count() -> DropCount {
    Rc::new(Cell::new(0))
}

/// A value that records its own drop in a shared counter.
#[derive(Debug)]
pub struct Tracked {
    pub value: i32,
    pub drops: DropCount,
}

impl Tracked {
    pub fn new(value: i32, drops: &DropCount) -> Tracked {
        Tracked { value, drops: drops.clone() }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Tracked::new(self.value, &self.drops)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

#[test]
fn tracked_counts_drops() {
    let drops = drop_count();
    let a = Tracked::new(1, &drops);
    let b = a.clone();
    assert_eq!(0, drops.get());
    std::mem::drop(a);
    assert_eq!(1, drops.get());
    std::mem::drop(b);
    assert_eq!(2, drops.get());
}
