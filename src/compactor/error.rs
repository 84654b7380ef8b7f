use thiserror::Error;

/// Precondition violations detected before a compaction touches the buffer.
///
/// Every variant is raised by validation, so a returned error always means the
/// buffer and the reference slots are exactly as the caller passed them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompactError {
    #[error("unsupported block size {size}, expected one of 1, 2, 4 or 8")]
    InvalidBlockSize { size: usize },

    #[error("block size {block_size} exceeds buffer length {len}")]
    BlockSizeExceedsBuffer { block_size: usize, len: usize },

    #[error("buffer length {len} is not a multiple of block size {block_size}")]
    MisalignedBufferLength { len: usize, block_size: usize },

    #[error("reference slot {slot} is null")]
    NullReference { slot: usize },

    #[error("reference slot {slot} points at offset {offset}, outside buffer of length {len}")]
    OutOfBounds {
        slot: usize,
        offset: usize,
        len: usize,
    },

    #[error("reference slot {slot} points at offset {offset}, not aligned to {block_size}-byte blocks")]
    UnalignedReference {
        slot: usize,
        offset: usize,
        block_size: usize,
    },

    #[error("reference slot {slot} points at free block at offset {offset}")]
    ReferenceToFreeBlock { slot: usize, offset: usize },
}

/// Fieldless discriminant of [`CompactError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidBlockSize,
    BlockSizeExceedsBuffer,
    MisalignedBufferLength,
    NullReference,
    OutOfBounds,
    UnalignedReference,
    ReferenceToFreeBlock,
}

impl CompactError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompactError::InvalidBlockSize { .. } => ErrorKind::InvalidBlockSize,
            CompactError::BlockSizeExceedsBuffer { .. } => ErrorKind::BlockSizeExceedsBuffer,
            CompactError::MisalignedBufferLength { .. } => ErrorKind::MisalignedBufferLength,
            CompactError::NullReference { .. } => ErrorKind::NullReference,
            CompactError::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            CompactError::UnalignedReference { .. } => ErrorKind::UnalignedReference,
            CompactError::ReferenceToFreeBlock { .. } => ErrorKind::ReferenceToFreeBlock,
        }
    }

    /// Reference slot that failed validation, if the error concerns one.
    pub fn slot(&self) -> Option<usize> {
        match self {
            CompactError::NullReference { slot }
            | CompactError::OutOfBounds { slot, .. }
            | CompactError::UnalignedReference { slot, .. }
            | CompactError::ReferenceToFreeBlock { slot, .. } => Some(*slot),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompactError>;
