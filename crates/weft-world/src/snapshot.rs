//! On-disk world snapshots: a bincode frame holding run-length encoded
//! columns, written atomically via a temp file rename.

use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::memory::Column;
use crate::{SurfaceClass, Voxel, WorldError};

pub(crate) const MAGIC: [u8; 4] = *b"WFW1";
pub(crate) const VERSION: u16 = 1;

#[derive(Serialize, Deserialize)]
struct SnapshotData {
    magic: [u8; 4],
    version: u16,
    max_height: i32,
    columns: Vec<ColumnRecord>,
}

#[derive(Serialize, Deserialize)]
struct ColumnRecord {
    x: i32,
    z: i32,
    surface: SurfaceClass,
    runs: Vec<(Voxel, u16)>,
}

/// Collapses a voxel stack into (value, length) runs. Runs cap at u16::MAX
/// so a run length always fits its field.
fn rle_encode(voxels: &[Voxel]) -> Vec<(Voxel, u16)> {
    let mut runs: Vec<(Voxel, u16)> = Vec::new();
    for &voxel in voxels {
        match runs.last_mut() {
            Some((value, len)) if *value == voxel && *len < u16::MAX => *len += 1,
            _ => runs.push((voxel, 1)),
        }
    }
    runs
}

/// Expands runs back into `out`, ignoring anything past the stack height.
fn rle_decode(runs: &[(Voxel, u16)], out: &mut [Voxel]) {
    let mut i = 0;
    for &(voxel, len) in runs {
        for _ in 0..len {
            if i >= out.len() {
                return;
            }
            out[i] = voxel;
            i += 1;
        }
    }
}

pub(crate) fn write(
    path: &Path,
    max_height: i32,
    columns: &HashMap<(i32, i32), Column>,
) -> Result<(), WorldError> {
    let mut records: Vec<ColumnRecord> = columns
        .iter()
        .map(|(&(x, z), column)| ColumnRecord {
            x,
            z,
            surface: column.surface,
            runs: rle_encode(&column.voxels),
        })
        .collect();
    // Stable column order keeps repeated saves byte-identical.
    records.sort_by_key(|r| (r.x, r.z));
    let data = SnapshotData {
        magic: MAGIC,
        version: VERSION,
        max_height,
        columns: records,
    };
    let bytes = bincode::serialize(&data).map_err(|e| WorldError::Codec(e.to_string()))?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("wfw.tmp");
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub(crate) fn read(path: &Path) -> Result<(i32, HashMap<(i32, i32), Column>), WorldError> {
    let bytes = fs::read(path)?;
    let data: SnapshotData =
        bincode::deserialize(&bytes).map_err(|e| WorldError::Codec(e.to_string()))?;
    if data.magic != MAGIC {
        return Err(WorldError::Codec("bad snapshot magic".into()));
    }
    if data.version != VERSION {
        return Err(WorldError::Codec(format!(
            "unsupported snapshot version {}",
            data.version
        )));
    }
    if data.max_height <= 0 {
        return Err(WorldError::Codec(format!(
            "invalid snapshot height {}",
            data.max_height
        )));
    }
    let mut columns = HashMap::with_capacity(data.columns.len());
    for record in data.columns {
        let mut column = Column::air(data.max_height);
        rle_decode(&record.runs, &mut column.voxels);
        column.surface = record.surface;
        columns.insert((record.x, record.z), column);
    }
    Ok((data.max_height, columns))
}
