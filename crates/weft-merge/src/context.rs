use std::fmt;
use std::path::{Path, PathBuf};

use weft_map::{MapOffset, TemplateMap};
use weft_world::{SharedWorld, WorldCatalog};

use crate::config::{self, CONFIG_FILE, MergeConfig};
use crate::palette::MapPalette;
use crate::report::RunSummary;
use crate::run::{CancelToken, MergeRunner};

/// Subdirectory of the data dir holding world snapshots.
pub const WORLDS_DIR: &str = "worlds";

/// Everything one merge needs, rebuilt wholesale by [`prepare`].
///
/// Constructed once and passed around explicitly; there is no process-wide
/// instance.
///
/// [`prepare`]: MergeContext::prepare
pub struct MergeContext {
    data_dir: PathBuf,
    catalog: WorldCatalog,
    config: MergeConfig,
    target: Option<SharedWorld>,
    template: Option<TemplateMap>,
    offset: MapOffset,
    palette: MapPalette,
}

impl MergeContext {
    /// Loads the world catalog from `<data_dir>/worlds`, writes a starter
    /// config when none exists, and runs the first preparation pass.
    ///
    /// Never fails: each missing piece is logged and leaves its slot
    /// empty, and [`merge_all`](Self::merge_all) refuses to run until the
    /// required pieces exist.
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let worlds_dir = data_dir.join(WORLDS_DIR);
        let catalog = if worlds_dir.is_dir() {
            match WorldCatalog::load_dir(&worlds_dir) {
                Ok(catalog) => catalog,
                Err(err) => {
                    log::error!("unable to load worlds from {}: {}", worlds_dir.display(), err);
                    WorldCatalog::new()
                }
            }
        } else {
            log::warn!("worlds directory {} does not exist", worlds_dir.display());
            WorldCatalog::new()
        };
        if catalog.is_empty() {
            log::warn!("no worlds loaded from {}", worlds_dir.display());
        } else {
            log::info!("loaded {} world(s): {}", catalog.len(), catalog.names().join(", "));
        }

        let config_path = data_dir.join(CONFIG_FILE);
        match config::write_default_config(&config_path) {
            Ok(true) => log::info!("wrote starter configuration to {}", config_path.display()),
            Ok(false) => {}
            Err(err) => log::error!("unable to write starter configuration: {}", err),
        }
        Self::with_catalog(data_dir, catalog)
    }

    /// Builds a context over a caller-supplied catalog and prepares it.
    /// No starter config is written; `data_dir` still locates the config
    /// file and template image.
    pub fn with_catalog(data_dir: impl Into<PathBuf>, catalog: WorldCatalog) -> Self {
        let mut ctx = Self {
            data_dir: data_dir.into(),
            catalog,
            config: MergeConfig::default(),
            target: None,
            template: None,
            offset: MapOffset::default(),
            palette: MapPalette::new(),
        };
        ctx.prepare();
        ctx
    }

    fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Reloads the config file and rebuilds the target handle, template
    /// image, offset, and palette from scratch. Safe to call repeatedly;
    /// each failure is logged and leaves that slot unset.
    pub fn prepare(&mut self) {
        let config_path = self.config_path();
        self.config = match config::load_config(&config_path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("unable to load {}: {}", config_path.display(), err);
                MergeConfig::default()
            }
        };

        self.target = self.catalog.get(&self.config.target_world);
        if self.target.is_none() {
            log::error!("target world '{}' is not loaded", self.config.target_world);
        }

        let image_path = self.data_dir.join(&self.config.map_image_file);
        self.template = match TemplateMap::from_path(&image_path) {
            Ok(template) => {
                log::info!(
                    "loaded template {} ({}x{})",
                    image_path.display(),
                    template.width(),
                    template.height()
                );
                Some(template)
            }
            Err(err) => {
                log::error!("unable to load map image {}: {}", image_path.display(), err);
                None
            }
        };

        self.offset = self.config.offset();
        self.palette = MapPalette::build(&self.config.color_mappings, &self.catalog);
        self.warn_height_mismatches();
    }

    /// One warning per source world whose height differs from the target;
    /// those columns only copy the overlapping levels.
    fn warn_height_mismatches(&self) {
        let Some(target) = &self.target else { return };
        let target_height = target.read().unwrap().max_height();
        let mut warned: Vec<String> = Vec::new();
        for (_, world) in self.palette.resolved() {
            let guard = world.read().unwrap();
            let height = guard.max_height();
            if height != target_height && !warned.iter().any(|n| n == guard.name()) {
                log::warn!(
                    "world '{}' height {} differs from target height {}; columns will copy the lower {} levels",
                    guard.name(),
                    height,
                    target_height,
                    height.min(target_height)
                );
                warned.push(guard.name().to_string());
            }
        }
    }

    /// Full merge pass without cancellation.
    pub fn merge_all(&self, verbose: bool) -> Result<RunSummary, MergeError> {
        self.merge_all_with_cancel(verbose, &CancelToken::new())
    }

    /// Runs the full scan over the template. Fails fast when preparation
    /// left no target world or no template, instead of scanning to a
    /// summary of zero useful columns.
    pub fn merge_all_with_cancel(
        &self,
        verbose: bool,
        cancel: &CancelToken,
    ) -> Result<RunSummary, MergeError> {
        let target = self.target.as_ref().ok_or(MergeError::NoTargetWorld)?;
        let template = self.template.as_ref().ok_or(MergeError::NoTemplate)?;
        log::info!(
            "starting merge into '{}' from '{}' ({}x{} template)",
            self.config.target_world,
            self.config.map_image_file,
            template.width(),
            template.height()
        );
        let summary = MergeRunner::new(template, &self.palette, self.offset, target)
            .verbose(verbose)
            .run_with_cancel(cancel);
        log::info!("merge complete: {}", summary);
        Ok(summary)
    }

    #[inline]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[inline]
    pub fn catalog(&self) -> &WorldCatalog {
        &self.catalog
    }

    #[inline]
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    #[inline]
    pub fn target(&self) -> Option<&SharedWorld> {
        self.target.as_ref()
    }

    #[inline]
    pub fn template(&self) -> Option<&TemplateMap> {
        self.template.as_ref()
    }

    #[inline]
    pub fn offset(&self) -> MapOffset {
        self.offset
    }

    #[inline]
    pub fn palette(&self) -> &MapPalette {
        &self.palette
    }
}

/// Preconditions a merge refuses to start without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeError {
    /// Preparation found no loaded world under the configured target name.
    NoTargetWorld,
    /// Preparation could not decode the configured template image.
    NoTemplate,
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeError::NoTargetWorld => {
                write!(f, "no target world is loaded; fix 'target-world' and reload")
            }
            MergeError::NoTemplate => {
                write!(f, "no template image is loaded; fix 'map-image-file' and reload")
            }
        }
    }
}

impl std::error::Error for MergeError {}
