use std::fmt;
use std::time::Duration;

use crate::run::MergeOutcome;

/// Counters for one merge invocation. Rebuilt per run, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Columns copied from a source world.
    pub merged: u64,
    /// Sentinel-colored columns left untouched.
    pub skipped: u64,
    /// Columns with a missing world or a failed transfer.
    pub failed: u64,
    pub elapsed: Duration,
    /// True when the scan stopped early through a cancel token.
    pub cancelled: bool,
}

impl RunSummary {
    /// Total columns classified; equals template width x height for an
    /// uncancelled run.
    pub fn columns(&self) -> u64 {
        self.merged + self.skipped + self.failed
    }

    pub(crate) fn record(&mut self, outcome: &MergeOutcome) {
        match outcome {
            MergeOutcome::Copied => self.merged += 1,
            MergeOutcome::NoMapping => self.skipped += 1,
            MergeOutcome::MissingWorld { .. } | MergeOutcome::Failed(_) => self.failed += 1,
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} columns merged, {} columns skipped, {} columns failed in {:.2?}",
            self.merged, self.skipped, self.failed, self.elapsed
        )?;
        if self.cancelled {
            write!(f, " (cancelled)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weft_map::ColorKey;
    use weft_world::WorldError;

    #[test]
    fn records_each_outcome_in_exactly_one_counter() {
        let mut summary = RunSummary::default();
        summary.record(&MergeOutcome::Copied);
        summary.record(&MergeOutcome::NoMapping);
        summary.record(&MergeOutcome::MissingWorld {
            color: ColorKey::new(1, 2, 3),
            world: None,
        });
        summary.record(&MergeOutcome::MissingWorld {
            color: ColorKey::new(1, 2, 3),
            world: Some("ghost".to_string()),
        });
        summary.record(&MergeOutcome::Failed(WorldError::Backend("boom".into())));

        assert_eq!(summary.merged, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 3);
        assert_eq!(summary.columns(), 5);
    }

    #[test]
    fn display_reports_all_three_counts() {
        let summary = RunSummary {
            merged: 12,
            skipped: 3,
            failed: 1,
            elapsed: Duration::from_millis(250),
            cancelled: false,
        };
        let text = summary.to_string();
        assert!(text.contains("12 columns merged"), "got {}", text);
        assert!(text.contains("3 columns skipped"), "got {}", text);
        assert!(text.contains("1 columns failed"), "got {}", text);
        assert!(!text.contains("cancelled"), "got {}", text);
    }

    #[test]
    fn display_marks_cancelled_runs() {
        let summary = RunSummary {
            cancelled: true,
            ..RunSummary::default()
        };
        assert!(summary.to_string().ends_with("(cancelled)"));
    }
}
