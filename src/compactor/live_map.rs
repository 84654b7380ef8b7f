use super::{BlockSize, CompactError, Result};
use std::collections::BTreeMap;

/// Checks that a buffer of `len` bytes splits evenly into blocks of `block_size`.
pub(super) fn check_geometry(len: usize, block_size: BlockSize) -> Result<()> {
    let block_size = block_size.bytes();
    if block_size > len {
        return Err(CompactError::BlockSizeExceedsBuffer { block_size, len });
    }
    if len % block_size != 0 {
        return Err(CompactError::MisalignedBufferLength { len, block_size });
    }
    Ok(())
}

/// Resolves the reference held in `slot` to the offset of a live block.
///
/// Checks run in a fixed order: null, bounds, alignment, then the marker byte.
pub(super) fn resolve_reference(
    buffer: &[u8],
    slot: usize,
    reference: Option<usize>,
    block_size: BlockSize,
) -> Result<usize> {
    let offset = reference.ok_or(CompactError::NullReference { slot })?;

    let len = buffer.len();
    // last valid block start is len - block_size
    if len < block_size.bytes() || offset > len - block_size.bytes() {
        return Err(CompactError::OutOfBounds { slot, offset, len });
    }
    if !block_size.is_aligned(offset) {
        return Err(CompactError::UnalignedReference {
            slot,
            offset,
            block_size: block_size.bytes(),
        });
    }
    if buffer[offset] == 0x00 {
        return Err(CompactError::ReferenceToFreeBlock { slot, offset });
    }
    Ok(offset)
}

/// Live blocks keyed by byte offset, each with the reference slots that designate it.
///
/// Built once by validation. Iteration is in ascending offset order, which is
/// the order blocks are packed into the prefix.
#[derive(Debug, Default)]
pub(super) struct LiveMap {
    blocks: BTreeMap<usize, Vec<usize>>,
}

impl LiveMap {
    /// Validates every reference slot and groups the slots by block.
    ///
    /// Reads `buffer` only. The first failing slot, in slot order, is reported.
    pub fn build(
        buffer: &[u8],
        references: &[Option<usize>],
        block_size: BlockSize,
    ) -> Result<Self> {
        let mut blocks: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (slot, &reference) in references.iter().enumerate() {
            let offset = resolve_reference(buffer, slot, reference, block_size)?;
            blocks.entry(offset).or_default().push(slot);
        }
        Ok(Self { blocks })
    }

    /// Number of distinct live blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.blocks
            .iter()
            .map(|(&offset, slots)| (offset, slots.as_slice()))
    }
}
