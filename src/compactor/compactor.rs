use super::live_map::{check_geometry, resolve_reference, LiveMap};
use super::{BlockSize, Result};

/// Outcome of one successful compaction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompactionReport {
    pub block_size: BlockSize,
    /// Distinct live blocks, duplicates counted once.
    pub live_blocks: usize,
    /// Live blocks whose offset changed.
    pub moved_blocks: usize,
    /// Length of the packed prefix.
    pub live_bytes: usize,
    /// Length of the zeroed tail.
    pub freed_bytes: usize,
}

impl CompactionReport {
    /// True when every live block was already in place.
    pub fn is_noop(&self) -> bool {
        self.moved_blocks == 0
    }

    pub fn moved_bytes(&self) -> usize {
        self.moved_blocks * self.block_size.bytes()
    }
}

/// Packs referenced blocks of a byte buffer into a gap-free prefix.
///
/// A `Compactor` only carries its block size; buffers and reference slots are
/// borrowed per call and nothing survives between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Compactor {
    block_size: BlockSize,
}

impl Compactor {
    pub fn new(block_size: BlockSize) -> Self {
        Self { block_size }
    }

    /// Creates a compactor from a raw block width in bytes.
    pub fn try_from_bytes(block_size: usize) -> Result<Self> {
        Ok(Self::new(BlockSize::try_from(block_size)?))
    }

    pub fn block_size(&self) -> BlockSize {
        self.block_size
    }

    /// Compacts `buffer` in place and rewrites every slot of `references` to the
    /// new offset of the block it designates.
    ///
    /// Live blocks keep their ascending-offset order. Everything after the last
    /// packed block is zeroed. Slots keep their positions; only their values
    /// change. On error neither `buffer` nor `references` has been touched.
    pub fn compact(
        &self,
        buffer: &mut [u8],
        references: &mut [Option<usize>],
    ) -> Result<CompactionReport> {
        if buffer.is_empty() {
            return Ok(CompactionReport {
                block_size: self.block_size,
                ..Default::default()
            });
        }

        check_geometry(buffer.len(), self.block_size)?;
        let live = LiveMap::build(buffer, references, self.block_size)?;

        let block_size = self.block_size.bytes();
        let mut write = 0;
        let mut moved_blocks = 0;
        for (read, slots) in live.iter() {
            if write != read {
                // write < read and both are block aligned, so the ranges are disjoint
                buffer.copy_within(read..read + block_size, write);
                moved_blocks += 1;
                log::trace!("moved block {} -> {}", read, write);
            }
            for &slot in slots {
                references[slot] = Some(write);
            }
            write += block_size;
        }
        buffer[write..].fill(0x00);

        let report = CompactionReport {
            block_size: self.block_size,
            live_blocks: live.len(),
            moved_blocks,
            live_bytes: write,
            freed_bytes: buffer.len() - write,
        };
        log::debug!(
            "compacted {} bytes ({} blocks): {} live, {} moved, {} bytes freed",
            buffer.len(),
            self.block_size,
            report.live_blocks,
            report.moved_blocks,
            report.freed_bytes
        );
        Ok(report)
    }

    /// Returns the block a reference designates, applying the same checks as
    /// [`Compactor::compact`] does to each slot. Errors name the reference as slot 0.
    pub fn block<'a>(&self, buffer: &'a [u8], reference: Option<usize>) -> Result<&'a [u8]> {
        check_geometry(buffer.len(), self.block_size)?;
        let offset = resolve_reference(buffer, 0, reference, self.block_size)?;
        Ok(&buffer[offset..offset + self.block_size.bytes()])
    }
}

/// Compacts `buffer` with blocks of `block_size` bytes.
///
/// A zero-length buffer is returned untouched without looking at
/// `block_size` or `references`.
pub fn compact(
    buffer: &mut [u8],
    references: &mut [Option<usize>],
    block_size: usize,
) -> Result<CompactionReport> {
    if buffer.is_empty() {
        return Ok(CompactionReport::default());
    }
    Compactor::try_from_bytes(block_size)?.compact(buffer, references)
}
