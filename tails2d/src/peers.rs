use crate::{AppearanceConfig, PeerId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Read-only view of the peer table at one point in time.
pub type PeerSnapshot = Arc<HashMap<PeerId, AppearanceConfig>>;

/// Appearance settings received from remote peers.
///
/// Entries are upserted whole and never removed. Writers clone and replace the map; readers take
/// an [`Arc`] snapshot, so a frame always sees one consistent table and never blocks on a writer
/// for longer than a pointer copy.
#[derive(Debug, Default)]
pub struct PeerSettingsTable {
    entries: RwLock<PeerSnapshot>,
}

static GLOBAL: OnceLock<PeerSettingsTable> = OnceLock::new();

impl PeerSettingsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide table shared by the network receive path and the simulation.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// Inserts or replaces `peer`'s settings.
    ///
    /// The copy is built outside the lock; the write lock is only held to swap the pointer. If
    /// another writer swapped first, the copy is rebuilt from the newer map.
    pub fn upsert(&self, peer: PeerId, settings: AppearanceConfig) {
        loop {
            // Holding `current` keeps its allocation alive, so pointer equality can't be fooled
            // by a reused address.
            let current = self.snapshot();
            let mut next = HashMap::clone(&current);
            next.insert(peer, settings);

            // The map is swapped whole, so a poisoned lock never guards a partial write.
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            if Arc::ptr_eq(&*entries, &current) {
                *entries = Arc::new(next);
                return;
            }
        }
    }

    pub fn get(&self, peer: PeerId) -> Option<AppearanceConfig> {
        self.snapshot().get(&peer).copied()
    }

    pub fn snapshot(&self) -> PeerSnapshot {
        Arc::clone(&self.entries.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
