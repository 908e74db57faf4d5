//! The live identity mapping of one epoch.

use relay_types::{Address, Epoch};
use std::collections::HashSet;

/// Membership flags for a single epoch.
///
/// Only the ledger's current epoch keeps one of these. The zero address is
/// never admitted as a member.
#[derive(Clone, Debug, Default)]
pub struct IdentitySet {
    epoch: Epoch,
    members: HashSet<Address>,
}

impl IdentitySet {
    pub fn empty(epoch: Epoch) -> Self {
        Self {
            epoch,
            members: HashSet::new(),
        }
    }

    /// Build the mapping for `epoch`, skipping sentinel entries.
    pub fn from_addresses<I>(epoch: Epoch, addresses: I) -> Self
    where
        I: IntoIterator<Item = Address>,
    {
        Self {
            epoch,
            members: addresses.into_iter().filter(|a| !a.is_zero()).collect(),
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.members.contains(address)
    }

    /// Number of distinct live members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Clear a member's flag. Returns `false` if it was not set.
    pub fn revoke(&mut self, address: &Address) -> bool {
        self.members.remove(address)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.members.iter()
    }

    /// Members in ascending byte order.
    pub fn sorted_members(&self) -> Vec<Address> {
        let mut members: Vec<Address> = self.members.iter().copied().collect();
        members.sort_unstable();
        members
    }
}
