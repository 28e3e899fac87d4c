use super::Correction;
use crate::astro_math::normalize_ha_dec;
use crate::config::{ObservingLocation, OffsetSettings};
use crate::util::*;

pub const MAX_HA_OFFSET: Hours = 1.;
pub const MAX_DEC_OFFSET: Degrees = 15.;

/// Additive bias between apparent and real coordinates, real = apparent + offset
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Offset {
    pub ha: Hours,
    pub dec: Degrees,
}

impl Offset {
    pub const ZERO: Self = Self { ha: 0., dec: 0. };

    /// Fails if either component reaches its bound
    pub fn new(ha: Hours, dec: Degrees) -> PointingResult<Self> {
        if dec.abs() >= MAX_DEC_OFFSET || ha.abs() >= MAX_HA_OFFSET {
            return Err(PointingError::alignment(format_args!(
                "Offset of {:.4}h / {:.4}deg exceeds {}h / {}deg",
                ha, dec, MAX_HA_OFFSET, MAX_DEC_OFFSET
            )));
        }
        Ok(Self { ha, dec })
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl TryFrom<OffsetSettings> for Offset {
    type Error = PointingError;

    fn try_from(settings: OffsetSettings) -> PointingResult<Self> {
        Self::new(settings.ha, settings.dec)
    }
}

impl From<Offset> for OffsetSettings {
    fn from(offset: Offset) -> Self {
        Self {
            ha: offset.ha,
            dec: offset.dec,
        }
    }
}

impl Correction for Offset {
    fn real_from_apparent(
        &self,
        ha: Hours,
        dec: Degrees,
        _site: &ObservingLocation,
    ) -> (Hours, Degrees) {
        normalize_ha_dec(ha + self.ha, dec + self.dec)
    }

    fn apparent_from_real(
        &self,
        ha: Hours,
        dec: Degrees,
        _site: &ObservingLocation,
    ) -> (Hours, Degrees) {
        normalize_ha_dec(ha - self.ha, dec - self.dec)
    }
}
