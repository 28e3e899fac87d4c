use nalgebra::{UnitQuaternion, Vector3};

use super::Correction;
use crate::astro_math::{deg_to_rad, hours_to_rad, normalize_ha_dec, rad_to_deg, rad_to_hours};
use crate::config::{Alignment, ObservingLocation};
use crate::util::*;

/// Correction for a polar axis that misses the celestial pole.
///
/// The misalignment is a small rotation of the hour angle/declination frame, so the
/// two directions are exact inverses of each other everywhere, including at the pole
/// where the hour angle term of the first-order model grows with tan(dec).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PolarMisalignment {
    pub alignment: Alignment,
}

impl PolarMisalignment {
    pub fn new(alignment: Alignment) -> Self {
        Self { alignment }
    }

    /// Takes real to apparent directions. To first order this moves
    /// dec by `db cos(ha) - da cos(lat) sin(ha)` and
    /// ha by `db tan(dec) sin(ha) - da (sin(lat) - tan(dec) cos(ha) cos(lat))`.
    fn rotation(&self, latitude: Degrees) -> UnitQuaternion<f64> {
        let da = deg_to_rad(self.alignment.polar_az);
        let db = deg_to_rad(self.alignment.polar_alt);
        let lat = deg_to_rad(latitude);
        UnitQuaternion::from_scaled_axis(Vector3::new(-da * lat.cos(), -db, -da * lat.sin()))
    }
}

/// Unit vector with x toward the meridian on the equator and z toward the pole
fn direction(ha: Hours, dec: Degrees) -> Vector3<f64> {
    let ha = hours_to_rad(ha);
    let dec = deg_to_rad(dec);
    Vector3::new(dec.cos() * ha.cos(), dec.cos() * ha.sin(), dec.sin())
}

fn ha_dec(v: Vector3<f64>) -> (Hours, Degrees) {
    let ha = rad_to_hours(v.y.atan2(v.x));
    let dec = rad_to_deg(v.z.atan2(v.x.hypot(v.y)));
    normalize_ha_dec(ha, dec)
}

impl Correction for PolarMisalignment {
    fn real_from_apparent(
        &self,
        ha: Hours,
        dec: Degrees,
        site: &ObservingLocation,
    ) -> (Hours, Degrees) {
        ha_dec(
            self.rotation(site.latitude)
                .inverse_transform_vector(&direction(ha, dec)),
        )
    }

    fn apparent_from_real(
        &self,
        ha: Hours,
        dec: Degrees,
        site: &ObservingLocation,
    ) -> (Hours, Degrees) {
        ha_dec(self.rotation(site.latitude) * direction(ha, dec))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro_math::map12;
    use proptest::prelude::*;

    fn site() -> ObservingLocation {
        ObservingLocation {
            latitude: 38.33,
            ..Default::default()
        }
    }

    fn misaligned() -> PolarMisalignment {
        PolarMisalignment::new(Alignment {
            polar_az: 0.25,
            polar_alt: -0.15,
        })
    }

    /// Angular distance in degrees
    fn separation(a: (Hours, Degrees), b: (Hours, Degrees)) -> Degrees {
        rad_to_deg(direction(a.0, a.1).angle(&direction(b.0, b.1)))
    }

    #[test]
    fn test_aligned_mount_is_identity() {
        let polar = PolarMisalignment::default();
        let (ha, dec) = polar.apparent_from_real(2., 45., &site());
        assert_float_absolute_eq!(ha, 2., 1E-12);
        assert_float_absolute_eq!(dec, 45., 1E-12);
    }

    #[test]
    fn test_altitude_error_on_meridian() {
        let polar = PolarMisalignment::new(Alignment {
            polar_az: 0.,
            polar_alt: 0.1,
        });
        let (ha, dec) = polar.apparent_from_real(0., 0., &site());
        assert_float_absolute_eq!(ha, 0., 1E-12);
        assert_float_absolute_eq!(dec, 0.1, 1E-12);
    }

    #[test]
    fn test_azimuth_error_at_six_hours() {
        let polar = PolarMisalignment::new(Alignment {
            polar_az: 0.2,
            polar_alt: 0.,
        });
        let (_, dec) = polar.apparent_from_real(6., 0., &site());
        assert_float_absolute_eq!(dec, -0.2 * deg_to_rad(38.33).cos(), 1E-6);
    }

    #[test]
    fn test_matches_first_order_model() {
        let polar = misaligned();
        let (da, db) = (deg_to_rad(0.25), deg_to_rad(-0.15));
        let lat = deg_to_rad(38.33);

        for (ha, dec) in [(2., 45.), (-4., 30.), (7., -20.)] {
            let (h, d) = (hours_to_rad(ha), deg_to_rad(dec));
            let eps_ha = db * d.tan() * h.sin() - da * (lat.sin() - d.tan() * h.cos() * lat.cos());
            let eps_dec = db * h.cos() - da * h.sin() * lat.cos();

            let (aha, adec) = polar.apparent_from_real(ha, dec, &site());
            // second order terms are a few thousandths of a degree
            assert_float_absolute_eq!(map12(aha - ha), rad_to_hours(eps_ha), 1E-3);
            assert_float_absolute_eq!(adec - dec, rad_to_deg(eps_dec), 5E-3);
        }
    }

    #[test]
    fn test_inverse_close_to_pole() {
        let polar = misaligned();
        for dec in [60., 89.5, 89.8, 89.9, 89.95, -89.95] {
            let apparent = polar.apparent_from_real(2., dec, &site());
            let real = polar.real_from_apparent(apparent.0, apparent.1, &site());
            assert_float_absolute_eq!(map12(real.0 - 2.), 0., 1E-6);
            assert_float_absolute_eq!(real.1, dec, 1E-9);
        }
    }

    #[test]
    fn test_shift_is_bounded_by_misalignment() {
        // Total misalignment is hypot(0.25, 0.15) deg
        let polar = misaligned();
        for dec in [0., 45., 89.9, 90.] {
            let apparent = polar.apparent_from_real(-3., dec, &site());
            assert!(separation(apparent, (-3., dec)) <= 0.2916);
        }
    }

    proptest! {
        #[test]
        fn round_trip_up_to_pole(ha in -12f64..12., dec in -89.95f64..89.95) {
            let polar = misaligned();
            let (aha, adec) = polar.real_from_apparent(ha, dec, &site());
            let (rha, rdec) = polar.apparent_from_real(aha, adec, &site());
            prop_assert!(map12(rha - ha).abs() < 1E-6);
            prop_assert!((rdec - dec).abs() < 1E-6);
        }
    }
}
