//! In-place block compaction for flat byte buffers.
//!
//! A buffer is split into fixed-size blocks. Blocks designated by at least one
//! reference slot are live; [`compact`] packs them to the front in their
//! original order, zeroes the rest and rewrites the slots to the new offsets.

pub mod compactor;
pub mod util;

pub use compactor::{
    compact, BlockSize, CompactError, CompactionReport, Compactor, ErrorKind, Result,
};
