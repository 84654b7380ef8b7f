use super::CompactError;
use std::fmt::{Display, Formatter};

/// Width of one block in bytes. Only powers of two up to a machine word are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum BlockSize {
    #[default]
    One,
    Two,
    Four,
    Eight,
}

impl BlockSize {
    pub const ALL: [BlockSize; 4] = [
        BlockSize::One,
        BlockSize::Two,
        BlockSize::Four,
        BlockSize::Eight,
    ];

    /// Number of bytes in one block.
    pub const fn bytes(self) -> usize {
        match self {
            BlockSize::One => 1,
            BlockSize::Two => 2,
            BlockSize::Four => 4,
            BlockSize::Eight => 8,
        }
    }

    /// True if `offset` falls on a block boundary.
    pub const fn is_aligned(self, offset: usize) -> bool {
        offset % self.bytes() == 0
    }
}

impl TryFrom<usize> for BlockSize {
    type Error = CompactError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        match size {
            1 => Ok(BlockSize::One),
            2 => Ok(BlockSize::Two),
            4 => Ok(BlockSize::Four),
            8 => Ok(BlockSize::Eight),
            _ => Err(CompactError::InvalidBlockSize { size }),
        }
    }
}

impl From<BlockSize> for usize {
    fn from(block_size: BlockSize) -> Self {
        block_size.bytes()
    }
}

impl Display for BlockSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}B", self.bytes())
    }
}
