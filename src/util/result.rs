use crate::telescope_control::connection::LinkError;
use crate::{Degrees, Hours};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointingError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Out of range: {0}")]
    Range(String),
    #[error("Alignment rejected: {0}")]
    AlignmentRejected(String),
    #[error("Mount link failed: {0}")]
    TransportTimeout(#[from] LinkError),
    #[error("Parameters are locked while a detour slew is in progress")]
    SlewInProgress,
}

pub type PointingResult<T> = Result<T, PointingError>;

impl PointingError {
    pub fn range(args: std::fmt::Arguments) -> Self {
        Self::Range(args.to_string())
    }

    pub fn alignment(args: std::fmt::Arguments) -> Self {
        Self::AlignmentRejected(args.to_string())
    }
}

pub fn check_dec(dec: Degrees) -> PointingResult<()> {
    if (-90. ..=90.).contains(&dec) {
        Ok(())
    } else {
        Err(PointingError::range(format_args!(
            "Declination of {} is not valid",
            dec
        )))
    }
}

pub fn check_ra(ra: Hours) -> PointingResult<()> {
    if (0. ..24.).contains(&ra) {
        Ok(())
    } else {
        Err(PointingError::range(format_args!(
            "Right Ascension of {} is not valid",
            ra
        )))
    }
}

pub fn check_latitude(lat: Degrees) -> PointingResult<()> {
    if (-90. ..=90.).contains(&lat) {
        Ok(())
    } else {
        Err(PointingError::Configuration(format!(
            "Latitude of {} is not valid",
            lat
        )))
    }
}
