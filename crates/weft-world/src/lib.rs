//! Voxel world model: cell payloads, the storage capability trait, the
//! in-memory store with snapshot persistence, and the world catalog.
#![forbid(unsafe_code)]

mod catalog;
mod memory;
mod snapshot;
mod store;
mod voxel;

pub use catalog::{WORLD_EXT, WorldCatalog};
pub use memory::MemoryWorld;
pub use store::{SharedWorld, WorldError, WorldStore, share};
pub use voxel::{SurfaceClass, Voxel};
