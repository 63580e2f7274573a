use std::path::{Path, PathBuf};

use hashbrown::HashMap;

use crate::snapshot;
use crate::{SurfaceClass, Voxel, WorldError, WorldStore};

/// One vertical voxel stack plus its surface classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Column {
    pub voxels: Vec<Voxel>,
    pub surface: SurfaceClass,
}

impl Column {
    pub(crate) fn air(max_height: i32) -> Self {
        Self {
            voxels: vec![Voxel::AIR; max_height.max(0) as usize],
            surface: SurfaceClass::default(),
        }
    }
}

/// In-memory world: a sparse column map where absent columns read as air,
/// with an optional snapshot file behind `save()`.
pub struct MemoryWorld {
    name: String,
    max_height: i32,
    columns: HashMap<(i32, i32), Column>,
    path: Option<PathBuf>,
    dirty: bool,
}

impl MemoryWorld {
    /// Unbacked store; `save()` succeeds without touching disk.
    pub fn new(name: impl Into<String>, max_height: i32) -> Self {
        Self {
            name: name.into(),
            max_height,
            columns: HashMap::new(),
            path: None,
            dirty: false,
        }
    }

    /// Store that persists to `path` on save. The file is not created
    /// until the first save.
    pub fn create(name: impl Into<String>, max_height: i32, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            max_height,
            columns: HashMap::new(),
            path: Some(path.into()),
            dirty: true,
        }
    }

    /// Loads a snapshot file; the world keeps the file's stem as its name
    /// and writes back to the same path on save.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorldError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("world")
            .to_string();
        let (max_height, columns) = snapshot::read(path)?;
        Ok(Self {
            name,
            max_height,
            columns,
            path: Some(path.to_path_buf()),
            dirty: false,
        })
    }

    /// Number of columns holding explicit data.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn check_y(&self, y: i32) -> Result<usize, WorldError> {
        if y < 0 || y >= self.max_height {
            return Err(WorldError::HeightOutOfRange {
                y,
                max: self.max_height,
            });
        }
        Ok(y as usize)
    }
}

impl WorldStore for MemoryWorld {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_height(&self) -> i32 {
        self.max_height
    }

    fn voxel(&self, wx: i32, wy: i32, wz: i32) -> Result<Voxel, WorldError> {
        let y = self.check_y(wy)?;
        Ok(self
            .columns
            .get(&(wx, wz))
            .map(|c| c.voxels[y])
            .unwrap_or(Voxel::AIR))
    }

    fn set_voxel(&mut self, wx: i32, wy: i32, wz: i32, voxel: Voxel) -> Result<(), WorldError> {
        let y = self.check_y(wy)?;
        let max_height = self.max_height;
        let column = self
            .columns
            .entry((wx, wz))
            .or_insert_with(|| Column::air(max_height));
        column.voxels[y] = voxel;
        self.dirty = true;
        Ok(())
    }

    fn surface_class(&self, wx: i32, wz: i32) -> Result<SurfaceClass, WorldError> {
        Ok(self
            .columns
            .get(&(wx, wz))
            .map(|c| c.surface)
            .unwrap_or_default())
    }

    fn set_surface_class(
        &mut self,
        wx: i32,
        wz: i32,
        class: SurfaceClass,
    ) -> Result<(), WorldError> {
        let max_height = self.max_height;
        self.columns
            .entry((wx, wz))
            .or_insert_with(|| Column::air(max_height))
            .surface = class;
        self.dirty = true;
        Ok(())
    }

    fn save(&mut self) -> Result<(), WorldError> {
        if let Some(path) = &self.path {
            if self.dirty {
                snapshot::write(path, self.max_height, &self.columns)?;
            }
        }
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_columns_read_as_air() {
        let world = MemoryWorld::new("empty", 16);
        assert_eq!(world.voxel(4, 0, -9).unwrap(), Voxel::AIR);
        assert_eq!(world.surface_class(4, -9).unwrap(), SurfaceClass::default());
        assert_eq!(world.column_count(), 0);
    }

    #[test]
    fn writes_round_trip_per_cell() {
        let mut world = MemoryWorld::new("w", 8);
        world.set_voxel(-3, 5, 7, Voxel::new(42, 9)).unwrap();
        world.set_surface_class(-3, 7, SurfaceClass(2)).unwrap();
        assert_eq!(world.voxel(-3, 5, 7).unwrap(), Voxel::new(42, 9));
        assert_eq!(world.voxel(-3, 4, 7).unwrap(), Voxel::AIR);
        assert_eq!(world.surface_class(-3, 7).unwrap(), SurfaceClass(2));
        assert_eq!(world.column_count(), 1);
    }

    #[test]
    fn rejects_out_of_range_levels() {
        let mut world = MemoryWorld::new("w", 8);
        for y in [-1, 8, 100] {
            assert!(matches!(
                world.voxel(0, y, 0),
                Err(WorldError::HeightOutOfRange { .. })
            ));
            assert!(matches!(
                world.set_voxel(0, y, 0, Voxel::new(1, 0)),
                Err(WorldError::HeightOutOfRange { .. })
            ));
        }
        // Failed writes leave the world untouched.
        assert_eq!(world.column_count(), 0);
        assert!(!world.is_dirty());
    }

    #[test]
    fn save_without_backing_is_a_noop() {
        let mut world = MemoryWorld::new("scratch", 4);
        world.set_voxel(0, 0, 0, Voxel::new(1, 1)).unwrap();
        assert!(world.is_dirty());
        world.save().unwrap();
        assert!(!world.is_dirty());
        assert!(world.path().is_none());
    }

    #[test]
    fn save_and_load_preserve_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.wfw");
        let mut world = MemoryWorld::create("alpha", 12, &path);
        world.set_voxel(1, 3, -2, Voxel::new(7, 1)).unwrap();
        world.set_voxel(1, 11, -2, Voxel::new(8, 0)).unwrap();
        world.set_surface_class(1, -2, SurfaceClass(5)).unwrap();
        world.save().unwrap();

        let loaded = MemoryWorld::load(&path).unwrap();
        assert_eq!(loaded.name(), "alpha");
        assert_eq!(loaded.max_height(), 12);
        assert_eq!(loaded.voxel(1, 3, -2).unwrap(), Voxel::new(7, 1));
        assert_eq!(loaded.voxel(1, 11, -2).unwrap(), Voxel::new(8, 0));
        assert_eq!(loaded.voxel(1, 0, -2).unwrap(), Voxel::AIR);
        assert_eq!(loaded.surface_class(1, -2).unwrap(), SurfaceClass(5));
        assert!(!loaded.is_dirty());
    }

    #[test]
    fn clean_save_skips_rewriting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beta.wfw");
        let mut world = MemoryWorld::create("beta", 4, &path);
        world.save().unwrap();
        let first = std::fs::metadata(&path).unwrap().modified().unwrap();
        world.save().unwrap();
        let second = std::fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(first, second);
    }
}
