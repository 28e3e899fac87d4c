use crate::astro_math::map12;
use crate::clock::Clock;
use crate::telescope_control::connection::Transport;
use crate::telescope_control::slew_def::Slew;
use crate::telescope_control::Mount;
use crate::util::*;

impl<T: Transport, C: Clock> Mount<T, C> {
    /// Current phase of the GoTo lifecycle
    pub fn slew_phase(&self) -> SlewPhase {
        self.phase
    }

    /// True if either axis is currently moving
    pub async fn is_slewing(&mut self) -> PointingResult<bool> {
        Ok(self.connection.is_slewing().await?)
    }

    /// Move the telescope to the given real equatorial coordinates and return immediately.
    /// Any slew in progress is stopped and replaced. Returns the phase entered: a long move
    /// that starts near the pole on a German mount first goes to the switch position.
    /// Nothing is sent to the mount if the target cannot be reached.
    pub async fn goto(
        &mut self,
        ra: Hours,
        dec: Degrees,
        flags: PointingModelFlags,
    ) -> PointingResult<SlewPhase> {
        self.goto_segment(ra, dec, flags, true).await
    }

    async fn goto_segment(
        &mut self,
        ra: Hours,
        dec: Degrees,
        flags: PointingModelFlags,
        allow_detour: bool,
    ) -> PointingResult<SlewPhase> {
        check_ra(ra)?;
        check_dec(dec)?;
        let lst = self.local_sidereal_time();
        let (ha, apparent_dec) = self.apparent_from_real(lst, ra, dec, flags);
        let target = self
            .settings
            .mapper
            .angles_from_apparent(ha, apparent_dec)
            .map_err(|e| {
                tracing::warn!("GoTo to {} / {} rejected: {}", ra, dec, e);
                e
            })?;

        if !self.phase.is_idle() {
            tracing::info!("Replacing slew in {:?}", self.phase);
        }
        self.phase = SlewPhase::Idle;
        self.connection.full_stop().await?;

        let counts = self.connection.read_encoders().await?;
        let current = self.settings.mapper.angles_from_counts(counts);
        let (_, current_dec) = self.settings.mapper.apparent_from_angles(current);

        let slew = Slew::plan(
            &self.settings.mapper,
            &self.settings.limits,
            self.settings.switch_position,
            current,
            current_dec,
            target,
            allow_detour,
        );
        let end = slew.end_counts(&self.settings.mapper);
        for axis in Axis::BOTH {
            self.connection
                .goto_axis(axis, end.get(axis), self.settings.goto.fast_goto)
                .await?;
            // An axis is moving, so the segment has to be polled to its end
            self.phase = slew.phase();
        }

        tracing::info!(
            "Slewing {:.2} deg to {:?} in {:?}",
            slew.excursion(),
            slew.end(),
            slew.phase()
        );
        Ok(self.phase)
    }

    /// Polled while a GoTo is under way. Moves on from the switch position once both axes
    /// stop there; after the direct segment stops, resumes tracking and compares the final
    /// position with the target.
    pub async fn check_goto(
        &mut self,
        ra: Hours,
        dec: Degrees,
        flags: PointingModelFlags,
    ) -> PointingResult<GotoStatus> {
        if self.phase.is_idle() {
            tracing::warn!("Checked a GoTo while none is in progress");
            return Ok(GotoStatus::Arrived);
        }

        if self.connection.is_slewing().await? {
            return Ok(GotoStatus::InProgress);
        }

        match self.phase {
            SlewPhase::DetourSegment => {
                tracing::info!("Reached the switch position");
                // The mount is still near the pole here, so the detour rule would fire again
                self.goto_segment(ra, dec, flags, false).await?;
                Ok(GotoStatus::InProgress)
            }
            _ => self.finish_goto(ra, dec, flags).await,
        }
    }

    async fn finish_goto(
        &mut self,
        ra: Hours,
        dec: Degrees,
        flags: PointingModelFlags,
    ) -> PointingResult<GotoStatus> {
        self.phase = SlewPhase::Idle;
        if self.settings.kind.is_equatorial() {
            self.connection
                .start_tracking(self.settings.chain.site.latitude < 0.)
                .await?;
        }

        let (ra_now, dec_now) = self.get_position(flags).await?;
        let ra_error = map12(ra_now - ra);
        let dec_error = dec_now - dec;

        if ra_error.abs() <= self.settings.goto.ra_tolerance
            && dec_error.abs() <= self.settings.goto.dec_tolerance
        {
            tracing::info!("GoTo arrived");
            Ok(GotoStatus::Arrived)
        } else {
            tracing::warn!(
                "GoTo finished {:.5}h / {:.4}deg from the target",
                ra_error,
                dec_error
            );
            Ok(GotoStatus::ArrivedOutOfTolerance {
                ra_error,
                dec_error,
            })
        }
    }

    /// Immediately stops a slew in progress.
    pub async fn abort_slew(&mut self) -> PointingResult<()> {
        if !self.phase.is_idle() {
            tracing::info!("Aborting slew in {:?}", self.phase);
        }
        self.phase = SlewPhase::Idle;
        self.connection.full_stop().await?;
        Ok(())
    }
}
