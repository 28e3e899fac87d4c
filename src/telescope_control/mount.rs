use std::time::Duration;

use crate::clock::Clock;
use crate::config::{Config, GotoSettings, MountDetails, SwitchPosition};
use crate::telescope_control::connection::{Connection, Transport};
use crate::telescope_control::encoder::EncoderMapper;
use crate::telescope_control::mount_limits::MountLimits;
use crate::telescope_control::pointing::CorrectionChain;
use crate::util::*;

/// One pointing session with a mount. All state lives here and every operation takes
/// `&mut self`, so a single control loop drives it without locks.
pub struct Mount<T: Transport, C: Clock> {
    pub(in crate::telescope_control) settings: Settings,
    pub(in crate::telescope_control) connection: Connection<T>,
    pub(in crate::telescope_control) clock: C,
    pub(in crate::telescope_control) phase: SlewPhase,
}

impl<T: Transport, C: Clock> Mount<T, C> {
    /// Fails with a configuration error when the mount kind is missing or a setting
    /// cannot be used.
    pub fn new(config: &Config, transport: T, clock: C) -> PointingResult<Self> {
        let settings = Settings::new(config)?;
        tracing::info!(
            "Mount session for {:?} at latitude {}",
            settings.kind,
            settings.chain.site.latitude
        );

        Ok(Mount {
            settings,
            connection: Connection::new(
                transport,
                Duration::from_millis(config.link_settings.timeout_millis as u64),
            ),
            clock,
            phase: SlewPhase::Idle,
        })
    }

    pub fn kind(&self) -> MountKind {
        self.settings.kind
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn transport(&self) -> &T {
        self.connection.transport()
    }

    pub fn transport_mut(&mut self) -> &mut T {
        self.connection.transport_mut()
    }

    /// Parameters the correction chain reads may not change while a detour is under way,
    /// since the direct segment that follows is computed from them.
    pub(in crate::telescope_control) fn check_parameter_lease(&self) -> PointingResult<()> {
        if self.phase == SlewPhase::DetourSegment {
            tracing::warn!("Rejected parameter change during a detour slew");
            Err(PointingError::SlewInProgress)
        } else {
            Ok(())
        }
    }
}

pub(in crate::telescope_control) struct Settings {
    pub kind: MountKind,
    pub chain: CorrectionChain,
    pub mapper: EncoderMapper,
    pub details: MountDetails,
    pub limits: MountLimits,
    pub switch_position: SwitchPosition,
    pub pointing_model: PointingModelFlags,
    pub goto: GotoSettings,
}

impl Settings {
    pub fn new(config: &Config) -> PointingResult<Self> {
        let kind = config.mount_details.kind.ok_or_else(|| {
            PointingError::Configuration("Mount kind is not set".to_string())
        })?;
        check_latitude(config.observation_location.latitude)?;

        let details = config.mount_details;
        if details.primary_counts_per_degree <= 0. || details.secondary_counts_per_degree <= 0. {
            return Err(PointingError::Configuration(
                "Counts per degree must be positive".to_string(),
            ));
        }
        if !(-90. ..=90.).contains(&details.minimum_altitude) {
            return Err(PointingError::Configuration(format!(
                "Minimum altitude of {} is not valid",
                details.minimum_altitude
            )));
        }

        let goto = config.goto_settings;
        if goto.ra_tolerance <= 0. || goto.dec_tolerance <= 0. {
            return Err(PointingError::Configuration(
                "Arrival tolerances must be positive".to_string(),
            ));
        }

        let chain = CorrectionChain::new(config).map_err(|e| {
            PointingError::Configuration(format!("Stored offset is unusable: {}", e))
        })?;

        Ok(Settings {
            kind,
            chain,
            mapper: EncoderMapper::new(kind, config.observation_location.latitude, &details),
            details,
            limits: MountLimits::new(&goto),
            switch_position: details
                .switch_position
                .unwrap_or(SwitchPosition::GERMAN_EQUATORIAL),
            pointing_model: config.pointing_model,
            goto,
        })
    }
}
