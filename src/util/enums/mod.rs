pub mod axis;
pub mod goto_status;
pub mod mount_kind;
pub mod pier_side;
pub mod pointing_model;
pub mod slew_phase;

pub use axis::*;
pub use goto_status::*;
pub use mount_kind::*;
pub use pier_side::*;
pub use pointing_model::*;
pub use slew_phase::*;

pub use crate::astro_math::{Degrees, Hours, Radians};
