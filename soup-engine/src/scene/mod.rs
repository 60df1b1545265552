// scene/ - Static scene data
//
// Colours used by the renderer and the text shown by the host shell.

mod palette;
mod text;

pub use palette::*;
pub use text::*;
