use crate::astro_math::{calculate_alt_from_ha_dec, map12};
use crate::clock::Clock;
use crate::telescope_control::connection::Transport;
use crate::telescope_control::encoder::EncoderCounts;
use crate::telescope_control::Mount;
use crate::util::*;

impl<T: Transport, C: Clock> Mount<T, C> {
    /// Sets the encoder registers so the mount's current pose reads back as the given
    /// apparent hour angle and declination.
    pub async fn sync_encoders(&mut self, ha: Hours, dec: Degrees) -> PointingResult<EncoderCounts> {
        if !(-6. ..=6.).contains(&ha) {
            return Err(PointingError::range(format_args!(
                "Hour angle of {} is outside the sync range",
                ha
            )));
        }
        check_dec(dec)?;

        let latitude = self.settings.chain.site.latitude;
        if calculate_alt_from_ha_dec(ha, dec, latitude) < 0. {
            return Err(PointingError::range(format_args!(
                "HA {} / Dec {} is below the horizon",
                ha, dec
            )));
        }

        let counts = self
            .settings
            .mapper
            .with_minimum_altitude(0.)
            .encoder_from_apparent(ha, dec)?;
        self.connection.set_encoders(counts).await?;
        tracing::info!("Encoders synced to HA {} / Dec {}", ha, dec);
        Ok(counts)
    }

    /// Matches the scope's equatorial coordinates to the given real coordinates.
    pub async fn sync_to_coordinates(
        &mut self,
        ra: Hours,
        dec: Degrees,
        flags: PointingModelFlags,
    ) -> PointingResult<EncoderCounts> {
        check_ra(ra)?;
        check_dec(dec)?;
        let lst = self.local_sidereal_time();
        let (ha, dec) = self.apparent_from_real(lst, ra, dec, flags);
        self.sync_encoders(map12(ha), dec).await
    }
}

#[cfg(test)]
mod tests {
    use crate::astro_math::ra_from_hour_angle;
    use crate::telescope_control::encoder::EncoderCounts;
    use crate::telescope_control::test_util::*;
    use crate::util::*;

    #[tokio::test]
    async fn test_sync_then_read_back() {
        let mut mount = create_mount(
            &test_config(MountKind::GermanEquatorial),
            EncoderCounts::default(),
        );
        let counts = mount.sync_encoders(1.5, 35.).await.unwrap();
        assert_eq!(mount.transport().registers, counts);

        let ha = mount
            .get_hour_angle(PointingModelFlags::RAW)
            .await
            .unwrap();
        assert_float_absolute_eq!(ha, 1.5, 1E-4);
    }

    #[tokio::test]
    async fn test_sync_below_minimum_altitude_is_allowed() {
        let mut mount = create_mount(
            &test_config(MountKind::EquatorialFork),
            EncoderCounts::default(),
        );
        // About 5 degrees up, under the 10 degree goto limit
        assert!(mount.sync_encoders(0., -46.67).await.is_ok());
    }

    #[tokio::test]
    async fn test_sync_rejections() {
        let mut mount = create_mount(
            &test_config(MountKind::GermanEquatorial),
            EncoderCounts::default(),
        );
        assert!(matches!(
            mount.sync_encoders(6.5, 30.).await,
            Err(PointingError::Range(_))
        ));
        assert!(mount.sync_encoders(0., 91.).await.is_err());
        assert!(mount.sync_encoders(0., -60.).await.is_err());
        assert!(mount.transport().sent.is_empty());
    }

    #[tokio::test]
    async fn test_sync_to_coordinates() {
        let mut mount = create_mount(
            &test_config(MountKind::GermanEquatorial),
            EncoderCounts::default(),
        );
        let ra = ra_from_hour_angle(6., -2.5);
        mount
            .sync_to_coordinates(ra, 10., PointingModelFlags::RAW)
            .await
            .unwrap();
        let (read_ra, read_dec) = mount.get_position(PointingModelFlags::RAW).await.unwrap();
        assert_float_absolute_eq!(read_ra, ra, 1E-4);
        assert_float_absolute_eq!(read_dec, 10., 1E-4);
    }
}
