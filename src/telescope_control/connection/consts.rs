use crate::util::Axis;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Motor controller addresses on the mount bus
#[derive(Debug, Eq, PartialEq, Copy, Clone, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Destination {
    PrimaryMotor = 0x10,
    SecondaryMotor = 0x11,
}

impl From<Axis> for Destination {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Primary => Destination::PrimaryMotor,
            Axis::Secondary => Destination::SecondaryMotor,
        }
    }
}

impl From<Destination> for Axis {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::PrimaryMotor => Axis::Primary,
            Destination::SecondaryMotor => Axis::Secondary,
        }
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum MessageId {
    GetPosition = 0x01,
    GotoFast = 0x02,
    SetPosition = 0x04,
    PositiveGuideRate = 0x06,
    NegativeGuideRate = 0x07,
    SlewDone = 0x13,
    GotoSlow = 0x17,
    MovePositive = 0x24,
}

pub const SIDEREAL_RATE: [u8; 2] = [0xff, 0xff];
pub const ZERO_RATE: [u8; 2] = [0x00, 0x00];
pub const STOP_MOVE: u8 = 0x00;

pub const POSITION_RESPONSE_LEN: usize = 3;
pub const SLEW_DONE_RESPONSE_LEN: usize = 1;
/// Slew-done reply while the axis is still moving
pub const SLEW_MOVING: u8 = 0x00;
