//! Identity Module — deterministic per-call widget identities.
//!
//! An identity is the xxh3 hash of a widget's label seeded with the identity
//! currently on top of the stack, so the same call sequence yields the same
//! identities every frame.

use std::fmt;

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64_with_seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Identity(pub u64);

impl Identity {
    pub const EMPTY: Identity = Identity(0);

    /// Derive a child identity from `label` under `parent`. Never returns `EMPTY`.
    pub fn derive(parent: Identity, label: &str) -> Self {
        match xxh3_64_with_seed(label.as_bytes(), parent.0) {
            0 => Identity(1),
            h => Identity(h),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Push/pop stack of scope identities. Popping or peeking an empty stack is a no-op.
#[derive(Debug, Clone, Default)]
pub struct IdentityStack {
    items: Vec<Identity>,
}

impl IdentityStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity `label` would receive if pushed now.
    pub fn derive(&self, label: &str) -> Identity {
        Identity::derive(self.top(), label)
    }

    pub fn push(&mut self, label: &str) -> Identity {
        let id = self.derive(label);
        self.items.push(id);
        id
    }

    pub fn pop(&mut self) -> Option<Identity> {
        self.items.pop()
    }

    pub fn top(&self) -> Identity {
        self.items.last().copied().unwrap_or(Identity::EMPTY)
    }

    pub fn depth(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drop everything pushed since the stack was `depth` deep.
    pub fn truncate(&mut self, depth: usize) {
        self.items.truncate(depth);
    }
}
