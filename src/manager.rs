//! the boundary between wires and whoever owns the wire collection

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct WireId(pub u32);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// owner of the id -> wire mapping. wires only ever ask it to drop their id.
pub trait WireManager {
    /// forget `id`. calling this for an unknown id does nothing.
    fn delete_wire(&self, id: WireId);
}

/// minimal manager: allocates ids and tracks which are live
#[derive(Debug, Default)]
pub struct WireRegistry {
    next: Cell<u32>,
    live: RefCell<BTreeSet<WireId>>,
    deregistered: RefCell<BTreeMap<WireId, usize>>,
}

impl WireRegistry {
    pub fn allocate(&self) -> WireId {
        let id = WireId(self.next.get());
        self.next.set(id.0 + 1);
        self.live.borrow_mut().insert(id);
        id
    }
    pub fn contains(&self, id: WireId) -> bool {
        self.live.borrow().contains(&id)
    }
    pub fn len(&self) -> usize {
        self.live.borrow().len()
    }
    pub fn is_empty(&self) -> bool {
        self.live.borrow().is_empty()
    }
    pub fn ids(&self) -> Vec<WireId> {
        self.live.borrow().iter().copied().collect()
    }
    /// how many times deletion of `id` was requested
    pub fn deregistrations(&self, id: WireId) -> usize {
        self.deregistered
            .borrow()
            .get(&id)
            .copied()
            .unwrap_or_default()
    }
}

impl WireManager for WireRegistry {
    fn delete_wire(&self, id: WireId) {
        *self.deregistered.borrow_mut().entry(id).or_default() += 1;
        if !self.live.borrow_mut().remove(&id) {
            debug!(%id, "wire already deregistered");
        }
    }
}
