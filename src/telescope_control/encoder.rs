use crate::astro_math::{
    deg_to_hours, equatorial_to_horizontal, horizontal_to_equatorial, hours_to_deg, map12, map180,
    normalize_ha_dec,
};
use crate::config::MountDetails;
use crate::util::*;

/// Signed counts wrap modulo 2^24 + 1
pub const COUNTS_MODULUS: i64 = 16_777_217;
/// Registers above 2^23 read back as negative counts
pub const SIGN_THRESHOLD: u32 = 8_388_608;
const REGISTER_MASK: u32 = 0xFF_FFFF;

/// Raw 24-bit register values of both axes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct EncoderCounts {
    pub primary: u32,
    pub secondary: u32,
}

impl EncoderCounts {
    pub fn new(primary: u32, secondary: u32) -> Self {
        Self { primary, secondary }
    }

    pub fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Primary => self.primary,
            Axis::Secondary => self.secondary,
        }
    }
}

pub fn register_from_signed(count: i64) -> u32 {
    let count = count % COUNTS_MODULUS;
    let register = if count < 0 {
        COUNTS_MODULUS + count
    } else {
        count
    };
    // -1 lands on 2^24, which has no 24-bit form and goes out as zero
    (register as u32) & REGISTER_MASK
}

pub fn signed_from_register(register: u32) -> i64 {
    let register = register & REGISTER_MASK;
    if register > SIGN_THRESHOLD {
        -(COUNTS_MODULUS - register as i64)
    } else {
        register as i64
    }
}

/// Encoder positions of both axes in degrees from the mechanical zero.
/// For equatorial mounts the primary axis is hour angle and the secondary is declination;
/// for alt-az mounts they are azimuth and altitude.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct EncoderAngles {
    pub primary: Degrees,
    pub secondary: Degrees,
}

impl EncoderAngles {
    pub fn new(primary: Degrees, secondary: Degrees) -> Self {
        Self { primary, secondary }
    }
}

/// Converts between apparent coordinates and encoder positions for one mount.
/// German equatorial encoders read zero with the tube over the pier pointed at the pole.
#[derive(Debug, Copy, Clone)]
pub struct EncoderMapper {
    kind: MountKind,
    latitude: Degrees,
    minimum_altitude: Degrees,
    primary_counts_per_degree: f64,
    secondary_counts_per_degree: f64,
}

impl EncoderMapper {
    pub fn new(kind: MountKind, latitude: Degrees, details: &MountDetails) -> Self {
        Self {
            kind,
            latitude,
            minimum_altitude: details.minimum_altitude,
            primary_counts_per_degree: details.primary_counts_per_degree,
            secondary_counts_per_degree: details.secondary_counts_per_degree,
        }
    }

    pub fn kind(&self) -> MountKind {
        self.kind
    }

    pub fn latitude(&self) -> Degrees {
        self.latitude
    }

    pub fn minimum_altitude(&self) -> Degrees {
        self.minimum_altitude
    }

    pub fn with_minimum_altitude(self, minimum_altitude: Degrees) -> Self {
        Self {
            minimum_altitude,
            ..self
        }
    }

    fn southern(&self) -> bool {
        self.latitude < 0.
    }

    /* Counts */

    pub fn counts_from_angles(&self, angles: EncoderAngles) -> EncoderCounts {
        EncoderCounts {
            primary: register_from_signed(
                (angles.primary * self.primary_counts_per_degree).round() as i64,
            ),
            secondary: register_from_signed(
                (angles.secondary * self.secondary_counts_per_degree).round() as i64,
            ),
        }
    }

    pub fn angles_from_counts(&self, counts: EncoderCounts) -> EncoderAngles {
        EncoderAngles {
            primary: signed_from_register(counts.primary) as f64 / self.primary_counts_per_degree,
            secondary: signed_from_register(counts.secondary) as f64
                / self.secondary_counts_per_degree,
        }
    }

    /* Apparent <-> encoder */

    /// Rejects declinations past the pole, hour angles beyond 6h on mounts without a
    /// meridian flip, and targets below the minimum altitude.
    pub fn angles_from_apparent(&self, ha: Hours, dec: Degrees) -> PointingResult<EncoderAngles> {
        check_dec(dec)?;
        let ha = map12(ha);

        if !self.kind.is_german() && !(-6. ..=6.).contains(&ha) {
            return Err(PointingError::range(format_args!(
                "Hour angle {} is outside the {:?} range",
                ha, self.kind
            )));
        }

        let (az, alt) = equatorial_to_horizontal(ha, dec, self.latitude);
        if alt < self.minimum_altitude {
            return Err(PointingError::range(format_args!(
                "Altitude {:.3} is below the limit of {}",
                alt, self.minimum_altitude
            )));
        }

        Ok(match self.kind {
            MountKind::AltAzimuth => EncoderAngles::new(map180(az), alt),
            MountKind::EquatorialFork => {
                let (ha, dec) = self.to_northern(ha, dec);
                EncoderAngles::new(hours_to_deg(ha), dec)
            }
            MountKind::GermanEquatorial => {
                let (ha, dec) = self.to_northern(ha, dec);
                if ha <= 0. {
                    // Tube west of the pier, including on the meridian
                    EncoderAngles::new(hours_to_deg(ha) + 90., dec - 90.)
                } else {
                    EncoderAngles::new(hours_to_deg(ha) - 90., 90. - dec)
                }
            }
        })
    }

    pub fn apparent_from_angles(&self, angles: EncoderAngles) -> (Hours, Degrees) {
        let EncoderAngles { primary, secondary } = angles;
        match self.kind {
            MountKind::AltAzimuth => horizontal_to_equatorial(primary, secondary, self.latitude),
            MountKind::EquatorialFork => {
                let (ha, dec) = normalize_ha_dec(deg_to_hours(primary), secondary);
                self.to_northern(ha, dec)
            }
            MountKind::GermanEquatorial => {
                let (ha, dec) = if secondary <= 0. {
                    (deg_to_hours(primary - 90.), secondary + 90.)
                } else {
                    (deg_to_hours(primary + 90.), 90. - secondary)
                };
                let (ha, dec) = normalize_ha_dec(ha, dec);
                self.to_northern(ha, dec)
            }
        }
    }

    pub fn encoder_from_apparent(&self, ha: Hours, dec: Degrees) -> PointingResult<EncoderCounts> {
        Ok(self.counts_from_angles(self.angles_from_apparent(ha, dec)?))
    }

    pub fn apparent_from_encoder(&self, counts: EncoderCounts) -> (Hours, Degrees) {
        self.apparent_from_angles(self.angles_from_counts(counts))
    }

    /// Side of the pier the tube ends up on for a target. Only German mounts have one.
    pub fn pier_side(&self, ha: Hours, dec: Degrees) -> PierSide {
        if !self.kind.is_german() {
            return PierSide::Unknown;
        }
        let (ha, _) = self.to_northern(map12(ha), dec);
        if ha <= 0. {
            PierSide::West
        } else {
            PierSide::East
        }
    }

    /// Southern sites mirror HA and Dec; the mirror is its own inverse
    fn to_northern(&self, ha: Hours, dec: Degrees) -> (Hours, Degrees) {
        if self.southern() {
            (map12(-ha), -dec)
        } else {
            (ha, dec)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_COUNTS_PER_DEGREE;
    use proptest::prelude::*;

    fn mapper(kind: MountKind, latitude: Degrees) -> EncoderMapper {
        EncoderMapper::new(kind, latitude, &MountDetails::default())
    }

    fn unlimited(kind: MountKind, latitude: Degrees) -> EncoderMapper {
        EncoderMapper::new(
            kind,
            latitude,
            &MountDetails {
                minimum_altitude: -91.,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_register_sign_convention() {
        assert_eq!(register_from_signed(0), 0);
        assert_eq!(register_from_signed(100), 100);
        assert_eq!(register_from_signed(-2), 16_777_215);
        assert_eq!(signed_from_register(16_777_215), -2);
        assert_eq!(signed_from_register(SIGN_THRESHOLD), SIGN_THRESHOLD as i64);
        assert_eq!(signed_from_register(SIGN_THRESHOLD + 1), -8_388_608);
    }

    #[test]
    fn test_counts_round_not_truncate() {
        let m = mapper(MountKind::EquatorialFork, 40.);
        let counts = m.counts_from_angles(EncoderAngles::new(1.7 / DEFAULT_COUNTS_PER_DEGREE, 0.));
        assert_eq!(counts.primary, 2);
    }

    #[test]
    fn test_gem_meridian_is_west_of_pier() {
        let m = mapper(MountKind::GermanEquatorial, 38.33);
        for dec in [-20., 0., 30., 60., 89.] {
            let angles = m.angles_from_apparent(0., dec).unwrap();
            assert_float_absolute_eq!(angles.primary, 90., 1E-9);
            assert_float_absolute_eq!(angles.secondary, dec - 90., 1E-9);
            assert_eq!(m.pier_side(0., dec), PierSide::West);
        }
        // Approaching from either side does not change the branch at zero
        let east = m.angles_from_apparent(-1E-9, 30.).unwrap();
        let meridian = m.angles_from_apparent(0., 30.).unwrap();
        assert_eq!(east.secondary <= 0., meridian.secondary <= 0.);
        let west = m.angles_from_apparent(1E-6, 30.).unwrap();
        assert!(west.secondary > 0.);
        assert_eq!(m.pier_side(1E-6, 30.), PierSide::East);
    }

    #[test]
    fn test_gem_branches() {
        let m = mapper(MountKind::GermanEquatorial, 38.33);
        let angles = m.angles_from_apparent(2., 0.).unwrap();
        assert_float_absolute_eq!(angles.primary, -60., 1E-9);
        assert_float_absolute_eq!(angles.secondary, 90., 1E-9);

        let angles = m.angles_from_apparent(-3., 45.).unwrap();
        assert_float_absolute_eq!(angles.primary, 45., 1E-9);
        assert_float_absolute_eq!(angles.secondary, -45., 1E-9);

        let (ha, dec) = m.apparent_from_angles(EncoderAngles::new(0., -1.));
        assert_float_absolute_eq!(ha, -6., 1E-9);
        assert_float_absolute_eq!(dec, 89., 1E-9);
    }

    #[test]
    fn test_fork_mapping() {
        let m = mapper(MountKind::EquatorialFork, 38.33);
        let angles = m.angles_from_apparent(1.5, 20.).unwrap();
        assert_float_absolute_eq!(angles.primary, 22.5, 1E-9);
        assert_float_absolute_eq!(angles.secondary, 20., 1E-9);

        assert!(matches!(
            m.angles_from_apparent(6.5, 60.),
            Err(PointingError::Range(_))
        ));
    }

    #[test]
    fn test_altaz_mapping() {
        let m = mapper(MountKind::AltAzimuth, 43.07833);
        let angles = m.angles_from_apparent(deg_to_hours(336.683), 19.1824).unwrap();
        assert_float_absolute_eq!(angles.primary, 133.308, 1E-2);
        assert_float_absolute_eq!(angles.secondary, 59.086, 1E-2);

        // West of the meridian the azimuth goes out as a negative count
        let angles = m.angles_from_apparent(3., 10.).unwrap();
        assert!(angles.primary < 0.);
        let counts = m.counts_from_angles(angles);
        assert!(counts.primary > SIGN_THRESHOLD);
        let (ha, dec) = m.apparent_from_encoder(counts);
        assert_float_absolute_eq!(ha, 3., 1E-4);
        assert_float_absolute_eq!(dec, 10., 1E-3);
    }

    #[test]
    fn test_rejections() {
        let m = mapper(MountKind::GermanEquatorial, 38.33);
        assert!(matches!(
            m.angles_from_apparent(0., 90.5),
            Err(PointingError::Range(_))
        ));
        // Below the horizon
        assert!(matches!(
            m.angles_from_apparent(11., -30.),
            Err(PointingError::Range(_))
        ));
        // German mounts have no hour angle band
        assert!(m.angles_from_apparent(8., 80.).is_ok());
        let alt_az = mapper(MountKind::AltAzimuth, 38.33);
        assert!(alt_az.angles_from_apparent(8., 80.).is_err());
    }

    #[test]
    fn test_hemisphere_symmetry() {
        for kind in [MountKind::GermanEquatorial, MountKind::EquatorialFork] {
            let south = unlimited(kind, -30.);
            let north = unlimited(kind, 30.);
            assert_eq!(
                south.encoder_from_apparent(3., 10.).unwrap(),
                north.encoder_from_apparent(-3., -10.).unwrap()
            );
            let (ha, dec) = south.apparent_from_encoder(south.encoder_from_apparent(3., 10.).unwrap());
            assert_float_absolute_eq!(ha, 3., 1E-4);
            assert_float_absolute_eq!(dec, 10., 1E-4);
        }
    }

    fn count_in(range: std::ops::Range<i64>) -> impl Strategy<Value = u32> {
        range.prop_map(register_from_signed)
    }

    const LIMIT_90: i64 = 4_194_304; // 90 degrees at the default scale

    proptest! {
        #[test]
        fn register_wrap_is_consistent(register in 0u32..16_777_216) {
            prop_assert_eq!(register_from_signed(signed_from_register(register)), register);
        }

        // German mounts reach primary angles strictly inside +-90 degrees
        #[test]
        fn gem_counts_round_trip(
            primary in count_in(-LIMIT_90 + 1..LIMIT_90),
            secondary in 0u32..16_777_216,
            south in any::<bool>(),
        ) {
            let m = unlimited(MountKind::GermanEquatorial, if south { -38.33 } else { 38.33 });
            let counts = EncoderCounts::new(primary, secondary);
            let (ha, dec) = m.apparent_from_encoder(counts);
            prop_assert_eq!(m.encoder_from_apparent(ha, dec).unwrap(), counts);
        }

        #[test]
        fn fork_counts_round_trip(
            primary in count_in(-LIMIT_90..LIMIT_90 + 1),
            secondary in count_in(-LIMIT_90..LIMIT_90 + 1),
        ) {
            let m = unlimited(MountKind::EquatorialFork, 38.33);
            let counts = EncoderCounts::new(primary, secondary);
            let (ha, dec) = m.apparent_from_encoder(counts);
            prop_assert_eq!(m.encoder_from_apparent(ha, dec).unwrap(), counts);
        }

        #[test]
        fn altaz_counts_round_trip(
            primary in count_in(-8_388_000..8_388_000),
            secondary in count_in(466_034..3_728_270), // 10 to 80 degrees
        ) {
            let m = unlimited(MountKind::AltAzimuth, 38.33);
            let counts = EncoderCounts::new(primary, secondary);
            let (ha, dec) = m.apparent_from_encoder(counts);
            prop_assume!(ha.abs() <= 6.);
            prop_assert_eq!(m.encoder_from_apparent(ha, dec).unwrap(), counts);
        }
    }
}
