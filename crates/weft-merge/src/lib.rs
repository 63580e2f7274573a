//! Image-templated world merging: the color palette, column transfer, the
//! pixel scan, and the orchestrating context.
#![forbid(unsafe_code)]

pub mod config;
mod context;
mod palette;
mod report;
mod run;
mod transfer;

pub use context::{MergeContext, MergeError, WORLDS_DIR};
pub use palette::{MapPalette, Mapping, PaletteStats};
pub use report::RunSummary;
pub use run::{CancelToken, MergeOutcome, MergeRunner};
pub use transfer::transfer_column;
