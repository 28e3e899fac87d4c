use chrono::{DateTime, Utc};

use crate::clock::Clock;
use crate::config::{Alignment, ObservingLocation};
use crate::telescope_control::connection::Transport;
use crate::telescope_control::encoder::EncoderMapper;
use crate::telescope_control::pointing::PolarMisalignment;
use crate::telescope_control::Mount;
use crate::util::*;

impl<T: Transport, C: Clock> Mount<T, C> {
    /*** Date ***/

    /// The UTC date/time of the session clock
    pub fn get_utc_date(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// The local apparent sidereal time from the session clock (hours)
    pub fn get_sidereal_time(&self) -> Hours {
        self.local_sidereal_time()
    }

    /*** Site ***/

    /// Latitude, longitude (positive East), elevation, pressure and temperature of the site
    pub fn site(&self) -> ObservingLocation {
        self.settings.chain.site
    }

    /// Replaces the site parameters. Not allowed while a detour slew is under way.
    pub fn set_site(&mut self, site: ObservingLocation) -> PointingResult<()> {
        self.check_parameter_lease()?;
        check_latitude(site.latitude)?;
        if !(-180. ..=180.).contains(&site.longitude) {
            return Err(PointingError::Configuration(format!(
                "Longitude of {} is outside the valid range of -180 to 180",
                site.longitude
            )));
        }
        if site.pressure <= 0. || site.temperature <= -273. {
            return Err(PointingError::Configuration(format!(
                "Pressure {} / temperature {} are not valid",
                site.pressure, site.temperature
            )));
        }

        self.settings.chain.site = site;
        self.settings.mapper =
            EncoderMapper::new(self.settings.kind, site.latitude, &self.settings.details);
        tracing::info!("Site set to {:?}", site);
        Ok(())
    }

    /*** Polar alignment ***/

    pub fn alignment(&self) -> Alignment {
        self.settings.chain.polar.alignment
    }

    /// Sets the measured polar axis errors. Not allowed while a detour slew is under way.
    pub fn set_alignment(&mut self, alignment: Alignment) -> PointingResult<()> {
        self.check_parameter_lease()?;
        self.settings.chain.polar = PolarMisalignment::new(alignment);
        tracing::info!("Polar alignment set to {:?}", alignment);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Alignment, ObservingLocation};
    use crate::telescope_control::encoder::{EncoderAngles, EncoderCounts};
    use crate::telescope_control::test_util::*;
    use crate::util::*;

    #[test]
    fn test_clock_passthrough() {
        let mount = create_mount(&test_config(MountKind::EquatorialFork), EncoderCounts::default());
        assert_eq!(mount.get_sidereal_time(), 6.);
        assert_eq!(mount.get_utc_date(), test_clock().utc);
    }

    #[tokio::test]
    async fn test_set_site_remaps_encoders() {
        let mut mount = create_mount(
            &test_config(MountKind::GermanEquatorial),
            EncoderCounts::default(),
        );
        mount.transport_mut().registers = mount
            .settings
            .mapper
            .counts_from_angles(EncoderAngles::new(45., -45.));

        mount
            .set_site(ObservingLocation {
                latitude: -30.,
                ..mount.site()
            })
            .unwrap();
        // The same pose is mirrored in the southern sky
        let ha = mount.get_hour_angle(PointingModelFlags::RAW).await.unwrap();
        assert_float_absolute_eq!(ha, 3., 1E-4);

        assert!(mount
            .set_site(ObservingLocation {
                longitude: 200.,
                ..mount.site()
            })
            .is_err());
    }

    #[tokio::test]
    async fn test_parameters_locked_during_detour() {
        let mut mount = create_mount(
            &test_config(MountKind::GermanEquatorial),
            EncoderCounts::default(),
        );
        mount.transport_mut().registers = mount
            .settings
            .mapper
            .counts_from_angles(EncoderAngles::new(0., -1.));
        let ra = crate::astro_math::ra_from_hour_angle(6., 2.);
        mount.goto(ra, 0., PointingModelFlags::RAW).await.unwrap();
        assert_eq!(mount.slew_phase(), SlewPhase::DetourSegment);

        let site = mount.site();
        assert_eq!(mount.set_site(site), Err(PointingError::SlewInProgress));
        assert_eq!(
            mount.set_alignment(Alignment::default()),
            Err(PointingError::SlewInProgress)
        );
        assert_eq!(
            mount.set_pointing_model(PointingModelFlags::ALL),
            Err(PointingError::SlewInProgress)
        );

        mount.abort_slew().await.unwrap();
        assert!(mount.set_site(site).is_ok());
        assert!(mount
            .set_alignment(Alignment {
                polar_az: 0.1,
                polar_alt: 0.
            })
            .is_ok());
        assert_eq!(mount.alignment().polar_az, 0.1);
    }
}
