use weft_world::{SharedWorld, WorldError};

/// Copies the full voxel stack and the surface class of one (x, z) column
/// from `source` into `target`.
///
/// All reads complete under the source lock before the first write, so a
/// failed read leaves the target untouched for this column, and merging a
/// world into itself cannot deadlock or observe its own writes. The copied
/// range is the smaller of the two world heights; writes can never land
/// out of range when the heights differ.
pub fn transfer_column(
    source: &SharedWorld,
    target: &SharedWorld,
    wx: i32,
    wz: i32,
) -> Result<(), WorldError> {
    let target_height = target.read().unwrap().max_height();
    let (stack, surface) = {
        let src = source.read().unwrap();
        let copy_height = src.max_height().min(target_height);
        let mut stack = Vec::with_capacity(copy_height.max(0) as usize);
        for y in 0..copy_height {
            stack.push(src.voxel(wx, y, wz)?);
        }
        let surface = src.surface_class(wx, wz)?;
        (stack, surface)
    };

    let mut tgt = target.write().unwrap();
    for (y, voxel) in stack.iter().enumerate() {
        tgt.set_voxel(wx, y as i32, wz, *voxel)?;
    }
    tgt.set_surface_class(wx, wz, surface)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_world::{MemoryWorld, SurfaceClass, Voxel, WorldStore, share};

    fn stacked_world(name: &str, max_height: i32, wx: i32, wz: i32) -> MemoryWorld {
        let mut world = MemoryWorld::new(name, max_height);
        for y in 0..max_height {
            world
                .set_voxel(wx, y, wz, Voxel::new(y as u16 + 1, y as u16 * 31))
                .unwrap();
        }
        world.set_surface_class(wx, wz, SurfaceClass(7)).unwrap();
        world
    }

    #[test]
    fn copies_whole_column_and_surface() {
        let source = share(stacked_world("src", 16, 3, -8));
        let target = share(MemoryWorld::new("dst", 16));
        transfer_column(&source, &target, 3, -8).unwrap();

        let tgt = target.read().unwrap();
        for y in 0..16 {
            assert_eq!(
                tgt.voxel(3, y, -8).unwrap(),
                Voxel::new(y as u16 + 1, y as u16 * 31)
            );
        }
        assert_eq!(tgt.surface_class(3, -8).unwrap(), SurfaceClass(7));
    }

    #[test]
    fn overwrites_existing_target_column() {
        let source = share(stacked_world("src", 8, 0, 0));
        let target = share(MemoryWorld::new("dst", 8));
        {
            let mut tgt = target.write().unwrap();
            for y in 0..8 {
                tgt.set_voxel(0, y, 0, Voxel::new(231, 5)).unwrap();
            }
        }
        transfer_column(&source, &target, 0, 0).unwrap();
        let tgt = target.read().unwrap();
        for y in 0..8 {
            assert_eq!(tgt.voxel(0, y, 0).unwrap(), Voxel::new(y as u16 + 1, y as u16 * 31));
        }
    }

    #[test]
    fn clamps_to_the_shorter_world() {
        // Taller source into shorter target.
        let source = share(stacked_world("tall", 12, 1, 1));
        let target = share(MemoryWorld::new("short", 4));
        transfer_column(&source, &target, 1, 1).unwrap();
        {
            let tgt = target.read().unwrap();
            for y in 0..4 {
                assert_eq!(tgt.voxel(1, y, 1).unwrap(), Voxel::new(y as u16 + 1, y as u16 * 31));
            }
        }

        // Shorter source into taller target leaves the upper levels alone.
        let source = share(stacked_world("short", 4, 2, 2));
        let target = share(MemoryWorld::new("tall", 12));
        transfer_column(&source, &target, 2, 2).unwrap();
        let tgt = target.read().unwrap();
        assert_eq!(tgt.voxel(2, 3, 2).unwrap(), Voxel::new(4, 93));
        for y in 4..12 {
            assert_eq!(tgt.voxel(2, y, 2).unwrap(), Voxel::AIR);
        }
    }

    #[test]
    fn self_transfer_is_a_lossless_identity() {
        let world = share(stacked_world("loop", 8, 5, 5));
        transfer_column(&world, &world, 5, 5).unwrap();
        let w = world.read().unwrap();
        for y in 0..8 {
            assert_eq!(w.voxel(5, y, 5).unwrap(), Voxel::new(y as u16 + 1, y as u16 * 31));
        }
        assert_eq!(w.surface_class(5, 5).unwrap(), SurfaceClass(7));
    }
}
