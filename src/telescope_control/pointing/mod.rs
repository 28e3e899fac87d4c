//! Corrections between real sky coordinates and the apparent coordinates the
//! mount's own kinematics would put on target.
//!
//! Real to apparent runs Offset, Refraction, Dynamic, Polar; apparent to real
//! runs the same stages backwards. Every stage works in hour angle so the
//! caller converts RA with a single sidereal time sample.

pub use dynamic::DynamicModel;
pub use offset::{Offset, MAX_DEC_OFFSET, MAX_HA_OFFSET};
pub use polar::PolarMisalignment;
pub use refraction::Refraction;

use crate::astro_math::{map12, normalize_ha_dec};
use crate::config::{Config, ObservingLocation};
use crate::util::*;

mod dynamic;
mod offset;
mod polar;
mod refraction;

pub trait Correction {
    fn real_from_apparent(&self, ha: Hours, dec: Degrees, site: &ObservingLocation)
        -> (Hours, Degrees);
    fn apparent_from_real(&self, ha: Hours, dec: Degrees, site: &ObservingLocation)
        -> (Hours, Degrees);
}

const MAX_REFINEMENTS: usize = 50;

/// Solves `x = step(x)` by fixed point iteration, starting from the given position.
/// Inverts the dynamic stage, which is only defined in the real to apparent direction
/// and contracts by its drift rate.
fn refine<F>(ha: Hours, dec: Degrees, step: F) -> (Hours, Degrees)
where
    F: Fn(Hours, Degrees) -> (Hours, Degrees),
{
    let (mut rha, mut rdec) = step(ha, dec);
    for _ in 0..MAX_REFINEMENTS {
        let (nha, ndec) = step(rha, rdec);
        let converged = map12(nha - rha).abs() < 1E-12 && (ndec - rdec).abs() < 1E-11;
        (rha, rdec) = (nha, ndec);
        if converged {
            return normalize_ha_dec(rha, rdec);
        }
    }
    tracing::debug!("No fixed point near HA {} / Dec {}", ha, dec);
    normalize_ha_dec(rha, rdec)
}

/// Every parameter the correction chain reads
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CorrectionChain {
    pub site: ObservingLocation,
    pub polar: PolarMisalignment,
    pub dynamic: DynamicModel,
    pub offset: Offset,
}

impl CorrectionChain {
    pub fn new(config: &Config) -> PointingResult<Self> {
        Ok(Self {
            site: config.observation_location,
            polar: PolarMisalignment::new(config.alignment),
            dynamic: DynamicModel::new(&config.dynamic_model),
            offset: Offset::try_from(config.offset)?,
        })
    }

    /// Stages in the order they run from apparent to real
    fn stages(&self, flags: PointingModelFlags) -> [(bool, &dyn Correction); 4] {
        [
            (flags.polar, &self.polar as &dyn Correction),
            (flags.dynamic, &self.dynamic),
            (flags.refraction, &Refraction),
            (flags.offset, &self.offset),
        ]
    }

    pub fn real_from_apparent(
        &self,
        ha: Hours,
        dec: Degrees,
        flags: PointingModelFlags,
    ) -> (Hours, Degrees) {
        let start = normalize_ha_dec(ha, dec);
        self.stages(flags)
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .fold(start, |(ha, dec), (_, stage)| {
                stage.real_from_apparent(ha, dec, &self.site)
            })
    }

    pub fn apparent_from_real(
        &self,
        ha: Hours,
        dec: Degrees,
        flags: PointingModelFlags,
    ) -> (Hours, Degrees) {
        let start = normalize_ha_dec(ha, dec);
        self.stages(flags)
            .into_iter()
            .rev()
            .filter(|(enabled, _)| *enabled)
            .fold(start, |(ha, dec), (_, stage)| {
                stage.apparent_from_real(ha, dec, &self.site)
            })
    }
}
