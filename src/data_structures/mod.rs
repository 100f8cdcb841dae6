mod bit_iter;
mod slab;
pub use bit_iter::*;
pub use slab::{Slab, SlabIndex};
