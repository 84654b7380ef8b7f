mod error;
pub use error::*;

mod block_size;
pub use block_size::*;

mod live_map;

mod compactor;
pub use compactor::*;
