//! Append-only storage for round secrets.

use im::Vector;

/// The secrets of the current game, one per round, in order.
///
/// Backed by an `im` persistent vector so verifiers and snapshots can take
/// O(1) copies while the store keeps growing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SequenceStore {
    secrets: Vector<i32>,
}

impl SequenceStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the secret for a new round.
    pub fn push(&mut self, secret: i32) {
        self.secrets.push_back(secret);
    }

    /// Drop every secret.
    pub fn clear(&mut self) {
        self.secrets.clear();
    }

    /// Number of secrets stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    /// True when no round has been played.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }

    /// Secret at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<i32> {
        self.secrets.get(index).copied()
    }

    /// Iterate secrets in round order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.secrets.iter().copied()
    }

    /// O(1) copy of the current secrets.
    #[must_use]
    pub fn share(&self) -> Vector<i32> {
        self.secrets.clone()
    }

    /// Copy the secrets into a plain `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<i32> {
        self.iter().collect()
    }
}
