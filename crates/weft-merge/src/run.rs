use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use weft_map::{ColorKey, MapOffset, TemplateMap};
use weft_world::{SharedWorld, WorldError};

use crate::palette::{MapPalette, Mapping};
use crate::report::RunSummary;
use crate::transfer::transfer_column;

/// Cooperative stop flag checked once per column; clones share the flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Classification of one template pixel's column. Exactly one outcome per
/// pixel visited.
#[derive(Debug)]
pub enum MergeOutcome {
    /// Column copied from a live source world.
    Copied,
    /// Sentinel pixel; the column is deliberately left alone.
    NoMapping,
    /// Non-sentinel color without a live world behind it, either because
    /// the color is unconfigured or the configured world is not loaded.
    MissingWorld {
        color: ColorKey,
        world: Option<String>,
    },
    /// The transfer itself failed. The target column is only ever partial
    /// past the read stage, never on a read failure.
    Failed(WorldError),
}

/// Walks every template pixel column-major and merges mapped columns into
/// the target.
pub struct MergeRunner<'a> {
    template: &'a TemplateMap,
    palette: &'a MapPalette,
    offset: MapOffset,
    target: &'a SharedWorld,
    verbose: bool,
}

impl<'a> MergeRunner<'a> {
    pub fn new(
        template: &'a TemplateMap,
        palette: &'a MapPalette,
        offset: MapOffset,
        target: &'a SharedWorld,
    ) -> Self {
        Self {
            template,
            palette,
            offset,
            target,
            verbose: false,
        }
    }

    /// Verbose runs also log every merged and skipped column; failures are
    /// logged either way.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Full scan with no cancellation.
    pub fn run(&self) -> RunSummary {
        self.run_with_cancel(&CancelToken::new())
    }

    /// Full scan: outer loop over pixel x, inner over pixel y, with a
    /// target checkpoint after every completed x slice. Cancellation is
    /// honored between columns; a cancelled run still flushes the target.
    pub fn run_with_cancel(&self, cancel: &CancelToken) -> RunSummary {
        let started = Instant::now();
        let mut summary = RunSummary::default();
        let width = self.template.width() as i32;
        let height = self.template.height() as i32;
        'scan: for px in 0..width {
            for py in 0..height {
                if cancel.is_cancelled() {
                    log::warn!("merge cancelled at pixel ({}, {})", px, py);
                    summary.cancelled = true;
                    break 'scan;
                }
                let outcome = self.merge_pixel(px, py);
                self.log_outcome(px, py, &outcome);
                summary.record(&outcome);
            }
            self.checkpoint();
            log::debug!("checkpointed column slice {} of {}", px + 1, width);
        }
        if summary.cancelled {
            // Partial slices are flushed too, so at most the column in
            // flight is lost.
            self.checkpoint();
        }
        summary.elapsed = started.elapsed();
        summary
    }

    /// One pixel: classify its color, then transfer when a live source
    /// world exists.
    fn merge_pixel(&self, px: i32, py: i32) -> MergeOutcome {
        let color = self.template.color_at(px, py);
        if color.is_sentinel() {
            return MergeOutcome::NoMapping;
        }
        match self.palette.resolve(color) {
            Mapping::Unmapped => MergeOutcome::MissingWorld { color, world: None },
            Mapping::Unresolvable(name) => MergeOutcome::MissingWorld {
                color,
                world: Some(name),
            },
            Mapping::Resolved(source) => {
                let (wx, wz) = self.offset.pixel_to_world(px, py);
                match transfer_column(&source, self.target, wx, wz) {
                    Ok(()) => MergeOutcome::Copied,
                    Err(err) => MergeOutcome::Failed(err),
                }
            }
        }
    }

    fn log_outcome(&self, px: i32, py: i32, outcome: &MergeOutcome) {
        match outcome {
            MergeOutcome::Copied => {
                if self.verbose {
                    log::info!("merged column at pixel ({}, {})", px, py);
                }
            }
            MergeOutcome::NoMapping => {
                if self.verbose {
                    log::info!("no mapping at pixel ({}, {}); column skipped", px, py);
                }
            }
            MergeOutcome::MissingWorld {
                color,
                world: Some(name),
            } => {
                log::warn!(
                    "merge failed at pixel ({}, {}): world '{}' for color {} is not loaded",
                    px,
                    py,
                    name,
                    color
                );
            }
            MergeOutcome::MissingWorld { color, world: None } => {
                log::warn!(
                    "merge failed at pixel ({}, {}): color {} has no mapping",
                    px,
                    py,
                    color
                );
            }
            MergeOutcome::Failed(err) => {
                log::warn!("merge failed at pixel ({}, {}): {}", px, py, err);
            }
        }
    }

    fn checkpoint(&self) {
        if let Err(err) = self.target.write().unwrap().save() {
            log::error!("checkpoint save of target world failed: {}", err);
        }
    }
}
