//! Merge configuration loaded from `weft.toml` in the data dir.

use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use weft_map::MapOffset;

/// Name of the configuration file inside the data dir.
pub const CONFIG_FILE: &str = "weft.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MergeConfig {
    /// World that receives merged columns.
    #[serde(default)]
    pub target_world: String,
    /// Template image path, relative to the data dir.
    #[serde(default = "default_map_image_file")]
    pub map_image_file: String,
    #[serde(default)]
    pub offset: OffsetConfig,
    /// Hex color key (`#RRGGBB`) to source world name. Ordered so palette
    /// build warnings come out in a stable order.
    #[serde(default)]
    pub color_mappings: BTreeMap<String, String>,
}

fn default_map_image_file() -> String {
    "map.png".to_string()
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            target_world: String::new(),
            map_image_file: default_map_image_file(),
            offset: OffsetConfig::default(),
            color_mappings: BTreeMap::new(),
        }
    }
}

/// Pixel-to-world translation as written in the config file.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct OffsetConfig {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub z: i32,
}

impl MergeConfig {
    pub fn offset(&self) -> MapOffset {
        MapOffset::new(self.offset.x, self.offset.z)
    }
}

pub fn load_config(path: &Path) -> Result<MergeConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let config: MergeConfig = toml::from_str(&s)?;
    Ok(config)
}

/// Commented starter configuration written on first start.
pub const DEFAULT_CONFIG: &str = r##"# weft configuration
#
# target-world     world that receives merged columns
# map-image-file   template image, relative to this directory
# offset           added to pixel coordinates to get world coordinates
# color-mappings   hex color (#RRGGBB) to source world name;
#                  pure black (#000000) is reserved and always skipped

target-world = ""
map-image-file = "map.png"

[offset]
x = 0
z = 0

[color-mappings]
# "#FF0000" = "alpha"
"##;

/// Writes the starter config if `path` does not exist yet. Returns true
/// when a new file was written.
pub fn write_default_config(path: &Path) -> io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    fs::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}
