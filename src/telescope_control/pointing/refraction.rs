use super::Correction;
use crate::astro_math::{deg_to_rad, equatorial_to_horizontal, horizontal_to_equatorial};
use crate::config::ObservingLocation;
use crate::util::*;

/// Below this the bend is held at its 15 degree value
const ALTITUDE_FLOOR: Degrees = 15.;

/// Empirical fit of the bend, in arcseconds, as a cubic in the cotangent of altitude
#[derive(Debug, Copy, Clone)]
struct BendFit {
    linear: f64,
    cubic: f64,
}

// Separate fits for each direction; one is not the negation of the other
const TO_APPARENT: BendFit = BendFit {
    linear: 58.276,
    cubic: 0.0824,
};
const TO_REAL: BendFit = BendFit {
    linear: 58.294,
    cubic: 0.0668,
};

/// Atmospheric refraction, scaled from standard conditions by site pressure and temperature
#[derive(Debug, Copy, Clone, Default)]
pub struct Refraction;

impl Refraction {
    fn bend(fit: BendFit, alt: Degrees, site: &ObservingLocation) -> Degrees {
        let t = deg_to_rad(90. - alt.max(ALTITUDE_FLOOR)).tan();
        let arcsec = fit.linear * t - fit.cubic * t.powi(3);
        let pressure = site.pressure / (760. * 1.01);
        let temperature = 283. / (273. + site.temperature);
        arcsec / 3600. * pressure * temperature
    }

    fn shift_altitude(
        ha: Hours,
        dec: Degrees,
        site: &ObservingLocation,
        fit: BendFit,
        sign: f64,
    ) -> (Hours, Degrees) {
        let (az, alt) = equatorial_to_horizontal(ha, dec, site.latitude);
        let alt = alt + sign * Self::bend(fit, alt, site);
        horizontal_to_equatorial(az, alt, site.latitude)
    }
}

impl Correction for Refraction {
    fn real_from_apparent(
        &self,
        ha: Hours,
        dec: Degrees,
        site: &ObservingLocation,
    ) -> (Hours, Degrees) {
        Self::shift_altitude(ha, dec, site, TO_REAL, -1.)
    }

    fn apparent_from_real(
        &self,
        ha: Hours,
        dec: Degrees,
        site: &ObservingLocation,
    ) -> (Hours, Degrees) {
        Self::shift_altitude(ha, dec, site, TO_APPARENT, 1.)
    }
}
