use crate::config::SwitchPosition;
use crate::telescope_control::encoder::{EncoderAngles, EncoderCounts, EncoderMapper};
use crate::telescope_control::mount_limits::MountLimits;
use crate::util::*;

/// One commanded segment of a GoTo
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slew {
    phase: SlewPhase,
    start: EncoderAngles,
    end: EncoderAngles,
}

impl Slew {
    /// Goes straight to the target unless the move is unsafe near the pole and a
    /// detour is still allowed, in which case the segment ends at the switch position.
    pub fn plan(
        mapper: &EncoderMapper,
        limits: &MountLimits,
        switch_position: SwitchPosition,
        current: EncoderAngles,
        current_dec: Degrees,
        target: EncoderAngles,
        allow_detour: bool,
    ) -> Self {
        if allow_detour && limits.requires_detour(mapper.kind(), current_dec, current, target) {
            Self {
                phase: SlewPhase::DetourSegment,
                start: current,
                end: EncoderAngles::new(switch_position.primary, switch_position.secondary),
            }
        } else {
            Self {
                phase: SlewPhase::DirectSegment,
                start: current,
                end: target,
            }
        }
    }

    pub fn phase(&self) -> SlewPhase {
        self.phase
    }

    pub fn end(&self) -> EncoderAngles {
        self.end
    }

    pub fn end_counts(&self, mapper: &EncoderMapper) -> EncoderCounts {
        mapper.counts_from_angles(self.end)
    }

    /// Largest single-axis move of the segment
    pub fn excursion(&self) -> Degrees {
        (self.end.primary - self.start.primary)
            .abs()
            .max((self.end.secondary - self.start.secondary).abs())
    }
}
