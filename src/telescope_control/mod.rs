pub use mount::Mount;

pub mod connection;
mod commands {
    pub mod model;
    pub mod observing_pos;
    pub mod pointing_pos;
    pub mod slew;
    pub mod sync;
    pub mod tracking;
}
pub mod encoder;
pub mod mount_limits;
mod mount;
pub mod pointing;
pub mod slew_def;
#[cfg(test)]
pub(in crate::telescope_control) mod test_util;
