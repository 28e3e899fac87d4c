#[cfg(test)]
#[macro_use]
extern crate assert_float_eq;

pub mod astro_math;
pub mod clock;
pub mod config;
pub mod telescope_control;
pub mod util;

pub use astro_math::{Degrees, Hours, Radians};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use telescope_control::Mount;
