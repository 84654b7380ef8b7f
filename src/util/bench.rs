use crate::compactor::{BlockSize, CompactionReport};
use comfy_table::{Cell, Table};
use indexmap::IndexMap;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// A timed pass, numbered from 1 in recording order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sample {
    idx: u32,
    elapsed: Duration,
}

impl Display for Sample {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{}", self.elapsed, self.idx)
    }
}

#[derive(Debug, Default)]
struct Stat {
    passes: u32,
    total: Duration,
    fastest: Option<Sample>,
    slowest: Option<Sample>,
    bytes_moved: usize,
    bytes_freed: usize,
}

impl Stat {
    fn record(&mut self, report: &CompactionReport, elapsed: Duration) {
        self.passes += 1;
        self.total += elapsed;
        self.bytes_moved += report.moved_bytes();
        self.bytes_freed += report.freed_bytes;

        let sample = Sample {
            idx: self.passes,
            elapsed,
        };
        if self.fastest.map_or(true, |s| elapsed < s.elapsed) {
            self.fastest = Some(sample);
        }
        if self.slowest.map_or(true, |s| elapsed > s.elapsed) {
            self.slowest = Some(sample);
        }
    }

    fn avg(&self) -> Duration {
        self.total.checked_div(self.passes).unwrap_or_default()
    }
}

fn sample_cell(sample: Option<Sample>) -> Cell {
    sample.map_or_else(|| Cell::new("-"), Cell::new)
}

/// Timing and volume of compaction passes, grouped by block size.
///
/// Owned by the caller; compaction itself never records anything.
#[derive(Debug, Default)]
pub struct CompactionStats {
    // IndexMap keeps first-seen order
    stats: IndexMap<BlockSize, Stat>,
}

impl CompactionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one pass that produced `report` and took `d`.
    pub fn record(&mut self, report: &CompactionReport, d: Duration) {
        self.stats
            .entry(report.block_size)
            .or_default()
            .record(report, d);
    }

    /// Number of passes recorded for `block_size`.
    pub fn passes(&self, block_size: BlockSize) -> u32 {
        self.stats.get(&block_size).map_or(0, |st| st.passes)
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Table of avg / fastest / slowest / passes / moved / freed per block size,
    /// in the order each block size was first recorded.
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_header(vec![
            Cell::new("Block"),
            Cell::new("Avg"),
            Cell::new("Fastest@Idx"),
            Cell::new("Slowest@Idx"),
            Cell::new("Passes"),
            Cell::new("Moved"),
            Cell::new("Freed"),
        ]);

        for (block_size, st) in &self.stats {
            table.add_row(vec![
                Cell::new(block_size),
                Cell::new(format!("{:?}", st.avg())),
                sample_cell(st.fastest),
                sample_cell(st.slowest),
                Cell::new(st.passes),
                Cell::new(st.bytes_moved),
                Cell::new(st.bytes_freed),
            ]);
        }
        table
    }

    /// Emit [`CompactionStats::table`] at debug level.
    pub fn summary(&self) {
        log::debug!("\n{}", self.table());
    }
}
