use crate::config::GotoSettings;
use crate::telescope_control::encoder::EncoderAngles;
use crate::util::*;

/// Defines where a direct slew is unsafe for a German mount.
/// Long moves that start near the pole can wrap cables or end on the wrong side of the pier,
/// so they are routed through the switch position first.
#[derive(Debug, Clone, Copy)]
pub struct MountLimits {
    excursion: Degrees,     // Largest single-axis move allowed near the pole
    pole_distance: Degrees, // How close to the pole the restriction starts
}

impl MountLimits {
    pub fn new(settings: &GotoSettings) -> Self {
        Self {
            excursion: settings.detour_excursion,
            pole_distance: settings.detour_pole_distance,
        }
    }

    pub fn is_near_pole(&self, dec: Degrees) -> bool {
        dec.abs() >= 90. - self.pole_distance
    }

    pub fn is_long_excursion(&self, from: EncoderAngles, to: EncoderAngles) -> bool {
        (to.primary - from.primary).abs() > self.excursion
            || (to.secondary - from.secondary).abs() > self.excursion
    }

    pub fn requires_detour(
        &self,
        kind: MountKind,
        current_dec: Degrees,
        from: EncoderAngles,
        to: EncoderAngles,
    ) -> bool {
        kind.is_german() && self.is_near_pole(current_dec) && self.is_long_excursion(from, to)
    }
}
