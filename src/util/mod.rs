mod bench;
pub use bench::*;

mod timer;
pub use timer::*;
