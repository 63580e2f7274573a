use std::fmt;
use std::sync::{Arc, RwLock};

use crate::{SurfaceClass, Voxel};

/// Capability interface over one voxel world.
///
/// The merge pipeline is agnostic to concrete storage: anything that can
/// read and write voxels and surface classes by integer coordinate, report
/// a fixed height, and flush itself qualifies. Writes must be plain data
/// writes with no simulation side effects.
pub trait WorldStore {
    /// Identifier used for catalog lookup and log messages.
    fn name(&self) -> &str;

    /// Fixed number of vertical levels; valid y is `0..max_height()`.
    fn max_height(&self) -> i32;

    fn voxel(&self, wx: i32, wy: i32, wz: i32) -> Result<Voxel, WorldError>;

    fn set_voxel(&mut self, wx: i32, wy: i32, wz: i32, voxel: Voxel) -> Result<(), WorldError>;

    fn surface_class(&self, wx: i32, wz: i32) -> Result<SurfaceClass, WorldError>;

    fn set_surface_class(&mut self, wx: i32, wz: i32, class: SurfaceClass)
    -> Result<(), WorldError>;

    /// Flushes persisted state. Stores without a backing file treat this as
    /// a successful no-op.
    fn save(&mut self) -> Result<(), WorldError>;
}

/// Shared handle to a world, usable as both a merge source and a target.
pub type SharedWorld = Arc<RwLock<dyn WorldStore + Send + Sync>>;

/// Wraps a concrete store into a [`SharedWorld`] handle.
pub fn share<W: WorldStore + Send + Sync + 'static>(world: W) -> SharedWorld {
    Arc::new(RwLock::new(world))
}

#[derive(Debug)]
pub enum WorldError {
    /// A voxel access outside `0..max_height`.
    HeightOutOfRange { y: i32, max: i32 },
    /// Failure reported by a concrete storage backend.
    Backend(String),
    Io(std::io::Error),
    /// Snapshot bytes that do not decode as a world.
    Codec(String),
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::HeightOutOfRange { y, max } => {
                write!(f, "voxel level {} outside world height 0..{}", y, max)
            }
            WorldError::Backend(msg) => write!(f, "world backend error: {}", msg),
            WorldError::Io(err) => write!(f, "world i/o error: {}", err),
            WorldError::Codec(msg) => write!(f, "world snapshot error: {}", msg),
        }
    }
}

impl std::error::Error for WorldError {}

impl From<std::io::Error> for WorldError {
    fn from(err: std::io::Error) -> Self {
        WorldError::Io(err)
    }
}
