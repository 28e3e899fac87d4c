use crate::clock::Clock;
use crate::telescope_control::connection::Transport;
use crate::telescope_control::Mount;
use crate::util::*;

impl<T: Transport, C: Clock> Mount<T, C> {
    /// Turns sidereal tracking on the primary axis on or off.
    /// Alt-az mounts cannot track with one axis, so nothing is sent for them.
    pub async fn set_tracking(&mut self, tracking: bool) -> PointingResult<()> {
        if !self.settings.kind.is_equatorial() {
            tracing::warn!("Tracking is not available on an alt-az mount");
            return Ok(());
        }

        if tracking {
            self.connection
                .start_tracking(self.settings.chain.site.latitude < 0.)
                .await?;
        } else {
            self.connection.stop_tracking().await?;
        }
        Ok(())
    }
}
