pub use enums::*;
pub use result::*;

mod enums;
mod result;
