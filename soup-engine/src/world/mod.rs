// world/ - Viewport geometry
//
// Pure functions over the container bounds. No state, no allocation.

mod bounds;

pub use bounds::*;
