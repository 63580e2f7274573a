use std::fs;
use std::path::Path;

use hashbrown::HashMap;

use crate::{MemoryWorld, SharedWorld, WorldError, WorldStore, share};

/// Snapshot file extension for worlds on disk.
pub const WORLD_EXT: &str = "wfw";

/// Live set of loaded worlds, keyed by name.
#[derive(Default)]
pub struct WorldCatalog {
    worlds: HashMap<String, SharedWorld>,
}

impl WorldCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.wfw` snapshot directly under `dir`. Snapshots that
    /// fail to load are logged and skipped so one corrupt file cannot hide
    /// the remaining worlds.
    pub fn load_dir(dir: &Path) -> Result<Self, WorldError> {
        let mut catalog = Self::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(WORLD_EXT) {
                continue;
            }
            match MemoryWorld::load(&path) {
                Ok(world) => {
                    log::debug!(
                        "loaded world '{}' ({} columns, height {})",
                        world.name(),
                        world.column_count(),
                        world.max_height()
                    );
                    catalog.insert(world);
                }
                Err(err) => {
                    log::warn!("skipping world snapshot {}: {}", path.display(), err);
                }
            }
        }
        Ok(catalog)
    }

    /// Registers a world under its own name, replacing any previous entry,
    /// and returns the shared handle.
    pub fn insert<W: WorldStore + Send + Sync + 'static>(&mut self, world: W) -> SharedWorld {
        let name = world.name().to_string();
        let handle = share(world);
        self.worlds.insert(name, handle.clone());
        handle
    }

    pub fn get(&self, name: &str) -> Option<SharedWorld> {
        self.worlds.get(name).cloned()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    /// World names in stable order, for reports and logs.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.worlds.keys().cloned().collect();
        names.sort();
        names
    }
}
