use std::collections::BTreeMap;
use std::fmt;

use hashbrown::HashMap;
use weft_map::ColorKey;
use weft_world::{SharedWorld, WorldCatalog};

/// Resolution of one template color against the live world set.
#[derive(Clone)]
pub enum Mapping {
    /// No registry entry for this color.
    Unmapped,
    /// Color is mapped and its world is loaded.
    Resolved(SharedWorld),
    /// Color is mapped but the named world is not loaded; the name is kept
    /// for diagnostics.
    Unresolvable(String),
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mapping::Unmapped => write!(f, "Unmapped"),
            Mapping::Resolved(_) => write!(f, "Resolved(..)"),
            Mapping::Unresolvable(name) => write!(f, "Unresolvable({:?})", name),
        }
    }
}

/// Color registry built once per preparation: exact template color to the
/// world its columns come from.
#[derive(Default)]
pub struct MapPalette {
    entries: HashMap<ColorKey, Mapping>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaletteStats {
    /// Entries whose world is loaded.
    pub resolved: usize,
    /// Entries naming a world that is not loaded.
    pub unresolvable: usize,
}

impl MapPalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry from configured color/world pairs.
    ///
    /// Entries naming a missing world are kept as [`Mapping::Unresolvable`]
    /// so their columns fail loudly instead of skipping silently. Keys that
    /// do not parse, and the reserved sentinel color, are warned about and
    /// dropped.
    pub fn build(mappings: &BTreeMap<String, String>, catalog: &WorldCatalog) -> Self {
        let mut entries = HashMap::with_capacity(mappings.len());
        for (key, world_name) in mappings {
            let color: ColorKey = match key.parse() {
                Ok(color) => color,
                Err(err) => {
                    log::warn!("ignoring color mapping '{} = {}': {}", key, world_name, err);
                    continue;
                }
            };
            if color.is_sentinel() {
                log::warn!(
                    "color {} is reserved for unmerged columns; ignoring its mapping to '{}'",
                    color,
                    world_name
                );
                continue;
            }
            let mapping = match catalog.get(world_name) {
                Some(world) => Mapping::Resolved(world),
                None => {
                    log::warn!("mapped world '{}' for color {} is not loaded", world_name, color);
                    Mapping::Unresolvable(world_name.clone())
                }
            };
            entries.insert(color, mapping);
        }
        Self { entries }
    }

    /// Looks up the mapping for an exact color. Colors never configured
    /// resolve as [`Mapping::Unmapped`].
    pub fn resolve(&self, color: ColorKey) -> Mapping {
        self.entries
            .get(&color)
            .cloned()
            .unwrap_or(Mapping::Unmapped)
    }

    /// Resolved source handles with their colors, for height checks.
    pub fn resolved(&self) -> impl Iterator<Item = (ColorKey, &SharedWorld)> {
        self.entries.iter().filter_map(|(color, mapping)| match mapping {
            Mapping::Resolved(world) => Some((*color, world)),
            Mapping::Unmapped | Mapping::Unresolvable(_) => None,
        })
    }

    pub fn stats(&self) -> PaletteStats {
        let mut stats = PaletteStats::default();
        for mapping in self.entries.values() {
            match mapping {
                Mapping::Resolved(_) => stats.resolved += 1,
                Mapping::Unresolvable(_) => stats.unresolvable += 1,
                Mapping::Unmapped => {}
            }
        }
        stats
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
