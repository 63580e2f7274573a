use serde::{Deserialize, Serialize};

/// Opaque per-cell payload copied verbatim between worlds.
///
/// The merge pipeline never interprets `id` or `state`; equality is the
/// only operation it relies on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voxel {
    pub id: u16,
    pub state: u16,
}

impl Voxel {
    pub const AIR: Voxel = Voxel { id: 0, state: 0 };

    #[inline]
    pub const fn new(id: u16, state: u16) -> Self {
        Self { id, state }
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == Self::AIR
    }
}

/// Categorical terrain value carried per (x, z) column, independent of the
/// column's voxel contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceClass(pub u16);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_is_the_default() {
        assert_eq!(Voxel::default(), Voxel::AIR);
        assert!(Voxel::AIR.is_air());
        assert!(!Voxel::new(1, 0).is_air());
        assert!(!Voxel::new(0, 1).is_air());
    }
}
