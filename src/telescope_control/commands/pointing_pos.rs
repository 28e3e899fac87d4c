use crate::astro_math::{equatorial_to_horizontal, hour_angle_from_ra, ra_from_hour_angle};
use crate::clock::Clock;
use crate::telescope_control::connection::Transport;
use crate::telescope_control::Mount;
use crate::util::*;

impl<T: Transport, C: Clock> Mount<T, C> {
    /// Local sidereal time at the site, sampled once per operation
    pub(in crate::telescope_control) fn local_sidereal_time(&self) -> Hours {
        self.clock
            .local_sidereal_time(self.settings.chain.site.longitude)
    }

    /// Real RA/Dec to the apparent HA/Dec the mount has to be put on
    pub(in crate::telescope_control) fn apparent_from_real(
        &self,
        lst: Hours,
        ra: Hours,
        dec: Degrees,
        flags: PointingModelFlags,
    ) -> (Hours, Degrees) {
        self.settings
            .chain
            .apparent_from_real(hour_angle_from_ra(lst, ra), dec, flags)
    }

    /// Real HA/Dec of the current encoder readings
    pub(in crate::telescope_control) async fn read_real_ha_dec(
        &mut self,
        flags: PointingModelFlags,
    ) -> PointingResult<(Hours, Degrees)> {
        let counts = self.connection.read_encoders().await?;
        let (ha, dec) = self.settings.mapper.apparent_from_encoder(counts);
        Ok(self.settings.chain.real_from_apparent(ha, dec, flags))
    }

    /// The right ascension (hours) and declination (degrees) the telescope points at,
    /// corrected by the selected pointing model stages.
    pub async fn get_position(&mut self, flags: PointingModelFlags) -> PointingResult<(Hours, Degrees)> {
        let lst = self.local_sidereal_time();
        let (ha, dec) = self.read_real_ha_dec(flags).await?;
        Ok((ra_from_hour_angle(lst, ha), dec))
    }

    /// The uncorrected right ascension and declination the encoders report
    pub async fn get_apparent_position(&mut self) -> PointingResult<(Hours, Degrees)> {
        self.get_position(PointingModelFlags::RAW).await
    }

    /// The hour angle (hours) of the telescope's current position
    pub async fn get_hour_angle(&mut self, flags: PointingModelFlags) -> PointingResult<Hours> {
        Ok(self.read_real_ha_dec(flags).await?.0)
    }

    /// The azimuth (degrees, North-referenced, positive East/clockwise) and altitude
    /// (degrees, positive up) of the telescope's current position
    pub async fn get_altitude_azimuth(
        &mut self,
        flags: PointingModelFlags,
    ) -> PointingResult<(Degrees, Degrees)> {
        let (ha, dec) = self.read_real_ha_dec(flags).await?;
        Ok(equatorial_to_horizontal(ha, dec, self.settings.chain.site.latitude))
    }

    /// Predicts the pointing state a German mount would be in after slewing to the given
    /// coordinates. Other mounts have no pier side.
    pub fn predict_pier_side(&self, ra: Hours, dec: Degrees) -> PointingResult<PierSide> {
        check_ra(ra)?;
        check_dec(dec)?;
        let lst = self.local_sidereal_time();
        let (ha, dec) = self.apparent_from_real(lst, ra, dec, self.settings.pointing_model);
        Ok(self.settings.mapper.pier_side(ha, dec))
    }
}
