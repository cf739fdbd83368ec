use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

struct ProgressState {
    rows_done: u32,
    accepted_samples: u64,
    ceiling_hits: u64,
    next_snapshot: u32,
}

/// Scanline progress shared by all workers. Also decides when a snapshot
/// of the partial image is due and accumulates sampling statistics for
/// the end-of-render report.
pub struct ProgressReporter {
    bar: ProgressBar,
    state: Mutex<ProgressState>,
    snapshot_rows: u32,
    height: u32,
}

impl ProgressReporter {
    pub fn new(height: u32, snapshot_rows: u32) -> Self {
        let bar = ProgressBar::new(height as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} (eta: {eta})")
                .progress_chars("#>-"),
        );
        Self {
            bar,
            state: Mutex::new(ProgressState {
                rows_done: 0,
                accepted_samples: 0,
                ceiling_hits: 0,
                next_snapshot: snapshot_rows,
            }),
            snapshot_rows,
            height,
        }
    }

    /// Records one finished scanline and returns whether a snapshot should
    /// be written now.
    pub fn row_done(&self, accepted_samples: u64, ceiling_hits: u64) -> bool {
        let mut state = self.state.lock().unwrap();
        state.rows_done += 1;
        state.accepted_samples += accepted_samples;
        state.ceiling_hits += ceiling_hits;
        self.bar.inc(1);

        if self.snapshot_rows > 0
            && state.rows_done >= state.next_snapshot
            && state.rows_done < self.height
        {
            state.next_snapshot += self.snapshot_rows;
            return true;
        }
        false
    }

    pub fn finish(&self, width: u32) {
        self.bar.finish();
        let state = self.state.lock().unwrap();
        let pixels = (width as u64 * state.rows_done as u64).max(1);
        log::info!(
            "average {:.1} samples per pixel, {} pixels hit the sample ceiling",
            state.accepted_samples as f64 / pixels as f64,
            state.ceiling_hits,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshots_fire_every_interval_but_not_at_the_end() {
        let progress = ProgressReporter::new(10, 4);
        let mut snapshots = 0;
        for _ in 0..10 {
            if progress.row_done(1, 0) {
                snapshots += 1;
            }
        }
        // rows 4 and 8; the final row never snapshots
        assert_eq!(snapshots, 2);
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let progress = ProgressReporter::new(10, 0);
        for _ in 0..10 {
            assert!(!progress.row_done(1, 0));
        }
    }
}
