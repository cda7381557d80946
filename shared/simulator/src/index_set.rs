pub use rapier2d_f64::data::arena::Index;
use std::collections::HashMap;
use std::hash::Hash;

pub trait HasIndex {
    fn index(self) -> Index;
}

/// Insertion-ordered set of arena handles.
///
/// Removal swaps the last handle into the hole, so iteration order is stable
/// between removals and deterministic for a given history of inserts and
/// removes. The AI pass walks the roster in this order.
pub struct IndexSet<T: HasIndex> {
    handles: Vec<T>,
    slots: HashMap<T, usize>,
}

impl<T: HasIndex + Eq + Hash + Copy> IndexSet<T> {
    pub fn new() -> Self {
        IndexSet::<T> {
            handles: Vec::new(),
            slots: HashMap::new(),
        }
    }

    pub fn insert(&mut self, handle: T) {
        if self.slots.contains_key(&handle) {
            return;
        }
        self.handles.push(handle);
        self.slots.insert(handle, self.handles.len() - 1);
    }

    pub fn remove(&mut self, handle: T) -> bool {
        let Some(slot) = self.slots.remove(&handle) else {
            return false;
        };
        self.handles.swap_remove(slot);
        if let Some(&moved) = self.handles.get(slot) {
            self.slots.insert(moved, slot);
        }
        true
    }

    pub fn contains(&self, handle: T) -> bool {
        self.slots.contains_key(&handle)
    }

    pub fn iter(&self) -> std::slice::Iter<T> {
        self.handles.iter()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl<T: HasIndex + Eq + Hash + Copy> Default for IndexSet<T> {
    fn default() -> IndexSet<T> {
        IndexSet::new()
    }
}
